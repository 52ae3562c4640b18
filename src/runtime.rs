use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::Date;
use web_sys::Performance;

use folio_core::{Lightbox, NavigatorError, SectionNavigator, SwipeTracker, TransitionTicket};

use crate::boot;
use crate::dom;
use crate::input;
use crate::lightbox_view::LightboxDom;
use crate::page_config;
use crate::tween::{CompletionHook, TweenStage};

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = RefCell::new(None);
}

pub(crate) type Navigator = SectionNavigator<TweenStage>;

/// Page-session state: the section navigator (absent when the page has no
/// navigable structure), the lightbox and the listeners feeding them.
pub(crate) struct App {
    navigator: RefCell<Option<Navigator>>,
    lightbox: RefCell<Lightbox>,
    lightbox_dom: LightboxDom,
    swipe: RefCell<SwipeTracker>,
    resize_timer: RefCell<Option<Timeout>>,
    performance: Option<Performance>,
    pub(crate) listeners: RefCell<Vec<EventListener>>,
    trace_input: bool,
    resize_debounce_ms: u32,
}

pub(crate) fn start() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_event| boot_app()).forget();
    } else {
        boot_app();
    }
}

fn boot_app() {
    if APP.with(|slot| slot.borrow().is_some()) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let config = page_config::load_navigator_config(&document);
    let app = Rc::new(App {
        navigator: RefCell::new(None),
        lightbox: RefCell::new(Lightbox::new()),
        lightbox_dom: LightboxDom::discover(&document),
        swipe: RefCell::new(SwipeTracker::new()),
        resize_timer: RefCell::new(None),
        performance: window.performance(),
        listeners: RefCell::new(Vec::new()),
        trace_input: config.trace_input,
        resize_debounce_ms: config.resize_debounce_ms,
    });
    app.lightbox_dom.register_all(&mut app.lightbox.borrow_mut());

    match dom::discover(&document) {
        None => boot::fail("no-container", "no .container element on the page"),
        Some(page) => {
            let page = Rc::new(page);
            let weak = Rc::downgrade(&app);
            let on_complete: CompletionHook = Rc::new(move |ticket| {
                if let Some(app) = weak.upgrade() {
                    app.complete_transition(ticket);
                }
            });
            let stage = TweenStage::new(window.clone(), page.clone(), on_complete);
            match SectionNavigator::new(config, page.sections.len(), stage) {
                Ok(navigator) => {
                    *app.navigator.borrow_mut() = Some(navigator);
                    input::install_navigation(&app, &window, &page);
                    boot::ready();
                }
                Err(err) => boot::fail(error_code(&err), &err.to_string()),
            }
        }
    }
    input::install_keyboard(&app, &window);
    input::install_lightbox(&app);
    APP.with(|slot| {
        *slot.borrow_mut() = Some(app);
    });
}

fn error_code(err: &NavigatorError) -> &'static str {
    match err {
        NavigatorError::NoSections => "no-sections",
        NavigatorError::Config(_) => "bad-config",
        NavigatorError::Layout(_) => "bad-layout",
    }
}

impl App {
    fn with_navigator<R>(&self, action: impl FnOnce(&mut Navigator) -> R) -> Option<R> {
        self.navigator.borrow_mut().as_mut().map(action)
    }

    fn trace(&self, label: &str, detail: String) {
        if self.trace_input {
            gloo::console::log!(label, detail);
        }
    }

    /// Monotonic page time in milliseconds. Wall-clock time only when the
    /// page has no `performance` object.
    fn now_ms(&self) -> f64 {
        match self.performance.as_ref() {
            Some(performance) => performance.now(),
            None => Date::now(),
        }
    }

    pub(crate) fn on_wheel(&self, delta_x: f64, delta_y: f64) {
        let now = self.now_ms();
        let outcome = self.with_navigator(|nav| nav.handle_wheel(delta_x, delta_y, now));
        if let Some(outcome) = outcome {
            self.trace("wheel", format!("dx={delta_x} dy={delta_y} -> {outcome:?}"));
        }
    }

    pub(crate) fn on_touch_start(&self, x: f64) {
        self.swipe.borrow_mut().begin(x);
    }

    pub(crate) fn on_touch_end(&self, x: f64) {
        let Some((start_x, end_x)) = self.swipe.borrow_mut().finish(x) else {
            return;
        };
        let outcome = self.with_navigator(|nav| nav.handle_touch_gesture(start_x, end_x));
        if let Some(outcome) = outcome {
            self.trace("swipe", format!("{start_x} -> {end_x}: {outcome:?}"));
        }
    }

    pub(crate) fn on_touch_cancel(&self) {
        self.swipe.borrow_mut().cancel();
    }

    /// Lightbox gets first refusal while open. Returns whether the key was
    /// handled, so the caller can suppress the browser default.
    pub(crate) fn on_key(&self, key: &str) -> bool {
        if self.lightbox.borrow().is_active() {
            let consumed = self.lightbox.borrow_mut().handle_key(key);
            self.render_lightbox();
            return consumed;
        }
        match self.with_navigator(|nav| nav.handle_key(key)).flatten() {
            Some(outcome) => {
                self.trace("key", format!("{key}: {outcome:?}"));
                true
            }
            None => false,
        }
    }

    pub(crate) fn go_to(&self, index: usize) {
        if let Some(outcome) = self.with_navigator(|nav| nav.go_to_section(index)) {
            self.trace("indicator", format!("{index}: {outcome:?}"));
        }
    }

    /// Restarts the quiet window; the resize runs once the burst is over.
    pub(crate) fn schedule_resize(self: &Rc<Self>) {
        let app = Rc::clone(self);
        let timeout = Timeout::new(self.resize_debounce_ms, move || {
            app.with_navigator(|nav| nav.handle_resize());
        });
        *self.resize_timer.borrow_mut() = Some(timeout);
    }

    fn complete_transition(&self, ticket: TransitionTicket) {
        let target = ticket.target();
        let released = self.with_navigator(|nav| nav.complete_transition(ticket));
        self.trace("transition done", format!("{target}: {released:?}"));
    }

    pub(crate) fn open_lightbox(&self, project: &str, index: usize) {
        if self.lightbox.borrow_mut().open(project, index) {
            self.render_lightbox();
        }
    }

    pub(crate) fn close_lightbox(&self) {
        if self.lightbox.borrow_mut().close() {
            self.render_lightbox();
        }
    }

    pub(crate) fn step_lightbox(&self, forward: bool) {
        let moved = {
            let mut lightbox = self.lightbox.borrow_mut();
            if forward {
                lightbox.next()
            } else {
                lightbox.previous()
            }
        };
        if moved {
            self.render_lightbox();
        }
    }

    pub(crate) fn lightbox_dom(&self) -> &LightboxDom {
        &self.lightbox_dom
    }

    fn render_lightbox(&self) {
        let view = self.lightbox.borrow().view();
        self.lightbox_dom.render(view);
    }
}
