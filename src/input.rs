use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, TouchEvent, WheelEvent, Window};

use crate::dom::{self, PageElements};
use crate::runtime::App;

const ACTIVE_OPTIONS: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: false,
};

const PASSIVE_OPTIONS: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: true,
};

fn first_changed_touch_x(event: &Event) -> Option<f64> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touch = event.changed_touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

/// Wheel, touch, indicator and resize listeners for section navigation.
pub(crate) fn install_navigation(app: &Rc<App>, window: &Window, page: &PageElements) {
    let mut listeners = Vec::new();

    let app_for_wheel = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        window,
        "wheel",
        ACTIVE_OPTIONS,
        move |event: &Event| {
            event.prevent_default();
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            app_for_wheel.on_wheel(event.delta_x(), event.delta_y());
        },
    ));

    let app_for_touch = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        window,
        "touchstart",
        PASSIVE_OPTIONS,
        move |event: &Event| {
            if let Some(x) = first_changed_touch_x(event) {
                app_for_touch.on_touch_start(x);
            }
        },
    ));

    let app_for_touch = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        window,
        "touchend",
        PASSIVE_OPTIONS,
        move |event: &Event| {
            if let Some(x) = first_changed_touch_x(event) {
                app_for_touch.on_touch_end(x);
            }
        },
    ));

    let app_for_touch = Rc::clone(app);
    listeners.push(EventListener::new_with_options(
        window,
        "touchcancel",
        PASSIVE_OPTIONS,
        move |_event: &Event| {
            app_for_touch.on_touch_cancel();
        },
    ));

    for indicator in &page.indicators {
        let Some(target) = dom::indicator_target(indicator) else {
            continue;
        };
        let app_for_click = Rc::clone(app);
        listeners.push(EventListener::new_with_options(
            indicator,
            "click",
            ACTIVE_OPTIONS,
            move |event: &Event| {
                event.prevent_default();
                app_for_click.go_to(target);
            },
        ));
    }

    let app_for_resize = Rc::clone(app);
    listeners.push(EventListener::new(window, "resize", move |_event| {
        app_for_resize.schedule_resize();
    }));

    app.listeners.borrow_mut().extend(listeners);
}

/// Keyboard routing: the open lightbox first, then section navigation.
/// Default browser handling is suppressed only for keys that were used.
pub(crate) fn install_keyboard(app: &Rc<App>, window: &Window) {
    let app_for_key = Rc::clone(app);
    let listener = EventListener::new_with_options(
        window,
        "keydown",
        ACTIVE_OPTIONS,
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if app_for_key.on_key(&event.key()) {
                event.prevent_default();
            }
        },
    );
    app.listeners.borrow_mut().push(listener);
}

/// Clicks on gallery images and on the overlay controls.
pub(crate) fn install_lightbox(app: &Rc<App>) {
    let mut listeners = Vec::new();
    let gallery = app.lightbox_dom();

    for image in &gallery.images {
        let app_for_click = Rc::clone(app);
        let project = image.project.clone();
        let index = image.index;
        listeners.push(EventListener::new(
            &image.element,
            "click",
            move |_event| {
                app_for_click.open_lightbox(&project, index);
            },
        ));
    }

    if let Some(button) = gallery.close_button.as_ref() {
        let app_for_click = Rc::clone(app);
        listeners.push(EventListener::new(button, "click", move |_event| {
            app_for_click.close_lightbox();
        }));
    }
    if let Some(button) = gallery.prev_button.as_ref() {
        let app_for_click = Rc::clone(app);
        listeners.push(EventListener::new(button, "click", move |_event| {
            app_for_click.step_lightbox(false);
        }));
    }
    if let Some(button) = gallery.next_button.as_ref() {
        let app_for_click = Rc::clone(app);
        listeners.push(EventListener::new(button, "click", move |_event| {
            app_for_click.step_lightbox(true);
        }));
    }

    app.listeners.borrow_mut().extend(listeners);
}
