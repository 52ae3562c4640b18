use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::{HtmlElement, Window};

use folio_core::{Easing, Stage, TransitionTicket, Translation, Tween, Viewport};

use crate::dom::{self, PageElements};

pub(crate) type CompletionHook = Rc<dyn Fn(TransitionTicket)>;

struct TweenState {
    position: Translation,
    tween: Option<Tween<TransitionTicket>>,
    frame: Option<AnimationFrame>,
}

/// `Stage` backed by the page DOM, with tweens stepped on
/// `requestAnimationFrame`.
pub(crate) struct TweenStage {
    window: Window,
    page: Rc<PageElements>,
    state: Rc<RefCell<TweenState>>,
    on_complete: CompletionHook,
}

impl TweenStage {
    pub(crate) fn new(window: Window, page: Rc<PageElements>, on_complete: CompletionHook) -> Self {
        Self {
            window,
            page,
            state: Rc::new(RefCell::new(TweenState {
                position: Translation::origin(Default::default()),
                tween: None,
                frame: None,
            })),
            on_complete,
        }
    }
}

impl Stage for TweenStage {
    fn viewport(&self) -> Viewport {
        dom::viewport_size(&self.window)
    }

    fn place_sections(&mut self, origins: &[Translation]) {
        let viewport = self.viewport();
        for (section, origin) in self.page.sections.iter().zip(origins) {
            dom::place_section(section, *origin, viewport);
        }
    }

    fn set_position(&mut self, target: Translation) {
        self.state.borrow_mut().position = target;
        dom::apply_transform(&self.page.container, target);
    }

    fn animate_to(
        &mut self,
        target: Translation,
        duration_secs: f64,
        easing: Easing,
        ticket: TransitionTicket,
    ) {
        {
            let mut state = self.state.borrow_mut();
            let from = state.position;
            state.tween = Some(Tween::new(from, target, duration_secs, easing, ticket));
        }
        schedule_frame(
            self.state.clone(),
            self.page.container.clone(),
            self.on_complete.clone(),
        );
    }

    fn mark_active(&mut self, index: usize) {
        dom::set_indicator_active(&self.page.indicators, index);
    }
}

fn schedule_frame(state: Rc<RefCell<TweenState>>, container: HtmlElement, on_complete: CompletionHook) {
    let state_for_frame = state.clone();
    let handle = request_animation_frame(move |timestamp| {
        step_frame(state_for_frame, container, on_complete, timestamp);
    });
    state.borrow_mut().frame = Some(handle);
}

fn step_frame(
    state: Rc<RefCell<TweenState>>,
    container: HtmlElement,
    on_complete: CompletionHook,
    timestamp: f64,
) {
    let finished = {
        let mut guard = state.borrow_mut();
        guard.frame.take();
        let Some(tween) = guard.tween.as_mut() else {
            return;
        };
        let frame = tween.step(timestamp);
        dom::apply_transform(&container, frame.position);
        guard.position = frame.position;
        if frame.finished.is_some() {
            guard.tween = None;
        }
        frame.finished
    };
    match finished {
        Some(ticket) => on_complete(ticket),
        None => {
            let still_running = state.borrow().tween.is_some();
            if still_running {
                schedule_frame(state, container, on_complete);
            }
        }
    }
}
