#![allow(dead_code)]

use folio_core::{
    Easing, NavigatorConfig, SectionNavigator, Stage, TransitionTicket, Translation, Viewport,
};

#[derive(Clone, Debug, PartialEq)]
pub enum StageCall {
    Place(usize),
    Set(Translation),
    Animate {
        target: Translation,
        duration_secs: f64,
        easing: Easing,
    },
    Active(usize),
}

/// Records every call and holds the pending ticket until a test finishes it.
pub struct RecordingStage {
    pub viewport: Viewport,
    pub calls: Vec<StageCall>,
    pub pending: Option<TransitionTicket>,
}

impl RecordingStage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            calls: Vec::new(),
            pending: None,
        }
    }

    pub fn animations(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, StageCall::Animate { .. }))
            .count()
    }

    pub fn last_set(&self) -> Option<Translation> {
        self.calls.iter().rev().find_map(|call| match call {
            StageCall::Set(target) => Some(*target),
            _ => None,
        })
    }
}

impl Stage for RecordingStage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn place_sections(&mut self, origins: &[Translation]) {
        self.calls.push(StageCall::Place(origins.len()));
    }

    fn set_position(&mut self, target: Translation) {
        self.calls.push(StageCall::Set(target));
    }

    fn animate_to(
        &mut self,
        target: Translation,
        duration_secs: f64,
        easing: Easing,
        ticket: TransitionTicket,
    ) {
        assert!(
            self.pending.is_none(),
            "second transition started while one is in flight"
        );
        self.calls.push(StageCall::Animate {
            target,
            duration_secs,
            easing,
        });
        self.pending = Some(ticket);
    }

    fn mark_active(&mut self, index: usize) {
        self.calls.push(StageCall::Active(index));
    }
}

pub fn navigator(config: NavigatorConfig, sections: usize) -> SectionNavigator<RecordingStage> {
    SectionNavigator::new(config, sections, RecordingStage::new(1280.0, 720.0))
        .expect("navigator builds")
}

/// Delivers the pending completion, as the animation engine would.
pub fn finish(nav: &mut SectionNavigator<RecordingStage>) -> bool {
    match nav.stage_mut().pending.take() {
        Some(ticket) => nav.complete_transition(ticket),
        None => false,
    }
}

pub fn settle_at(nav: &mut SectionNavigator<RecordingStage>, index: usize) {
    if nav.current_section() != index {
        assert!(nav.go_to_section(index).started());
        assert!(finish(nav));
    }
}
