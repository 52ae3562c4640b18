mod boot;
mod dom;
mod input;
mod lightbox_view;
mod page_config;
mod runtime;
mod tween;

fn main() {
    runtime::start();
}
