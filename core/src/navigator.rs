//! Section navigation state machine.
//!
//! `SectionNavigator` owns the current section, the animation lock and the
//! input cooldown. Every input handler resolves to at most one step, and
//! every step is a single tween on the moving container driven through a
//! [`Stage`]. The stage hands the [`TransitionTicket`] back through
//! [`SectionNavigator::complete_transition`] once the tween is done; until
//! then every navigation request is dropped.

use std::fmt;

use crate::config::{ConfigError, NavigatorConfig};
use crate::easing::Easing;
use crate::layout::{LayoutError, LayoutTable, LayoutUnits, Translation, Viewport};

/// Animation engine and layout collaborator.
pub trait Stage {
    fn viewport(&self) -> Viewport;
    fn place_sections(&mut self, origins: &[Translation]);
    fn set_position(&mut self, target: Translation);
    /// Starts a tween to `target`. The ticket must be returned to the
    /// navigator exactly once, after the tween finishes.
    fn animate_to(
        &mut self,
        target: Translation,
        duration_secs: f64,
        easing: Easing,
        ticket: TransitionTicket,
    );
    fn mark_active(&mut self, _index: usize) {}
}

/// Single-use completion token for one transition.
#[derive(Debug, PartialEq, Eq)]
pub struct TransitionTicket {
    seq: u64,
    target: usize,
}

impl TransitionTicket {
    pub fn target(&self) -> usize {
        self.target
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Animating { target: usize, seq: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Started { from: usize, to: usize },
    Busy,
    AtBoundary,
    Unchanged,
    OutOfRange,
}

impl NavOutcome {
    pub fn started(self) -> bool {
        matches!(self, NavOutcome::Started { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelOutcome {
    Busy,
    CoolingDown,
    BelowThreshold,
    Gallery(NavOutcome),
    Step(Direction, NavOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    BelowThreshold,
    Step(Direction, NavOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigatorError {
    NoSections,
    Config(ConfigError),
    Layout(LayoutError),
}

impl fmt::Display for NavigatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigatorError::NoSections => write!(f, "no sections to navigate"),
            NavigatorError::Config(err) => write!(f, "invalid navigator config: {err}"),
            NavigatorError::Layout(err) => write!(f, "invalid layout: {err}"),
        }
    }
}

impl std::error::Error for NavigatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigatorError::NoSections => None,
            NavigatorError::Config(err) => Some(err),
            NavigatorError::Layout(err) => Some(err),
        }
    }
}

impl From<ConfigError> for NavigatorError {
    fn from(err: ConfigError) -> Self {
        NavigatorError::Config(err)
    }
}

impl From<LayoutError> for NavigatorError {
    fn from(err: LayoutError) -> Self {
        NavigatorError::Layout(err)
    }
}

pub struct SectionNavigator<S: Stage> {
    config: NavigatorConfig,
    layout: LayoutTable,
    total: usize,
    current: usize,
    phase: NavPhase,
    last_input_ms: Option<f64>,
    next_seq: u64,
    stage: S,
}

impl<S: Stage> SectionNavigator<S> {
    /// Places every section, snaps the container to section 0 and starts idle.
    pub fn new(
        config: NavigatorConfig,
        section_count: usize,
        mut stage: S,
    ) -> Result<Self, NavigatorError> {
        config.validate()?;
        if section_count == 0 {
            return Err(NavigatorError::NoSections);
        }
        let layout = LayoutTable::build(&config.layout, section_count)?;
        let viewport = stage.viewport();
        stage.place_sections(&layout.section_origins(config.units, viewport));
        let start = layout
            .container_offset(0, config.units, viewport)
            .unwrap_or(Translation::origin(config.units));
        stage.set_position(start);
        stage.mark_active(0);
        Ok(Self {
            config,
            layout,
            total: section_count,
            current: 0,
            phase: NavPhase::Idle,
            last_input_ms: None,
            next_seq: 0,
            stage,
        })
    }

    pub fn current_section(&self) -> usize {
        self.current
    }

    pub fn total_sections(&self) -> usize {
        self.total
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, NavPhase::Animating { .. })
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// A clock reading earlier than the last stamp counts as expired.
    fn cooling_down(&self, now_ms: f64) -> bool {
        self.last_input_ms
            .map(|last| now_ms >= last && now_ms - last < self.config.scroll_cooldown_ms)
            .unwrap_or(false)
    }

    /// Wheel input. The caller always suppresses native scrolling, whatever
    /// the outcome.
    ///
    /// Inside the gallery range a dominant horizontal delta steps within the
    /// range. Any event that reaches a step decision (gallery or vertical)
    /// stamps the cooldown, including steps that stop at a boundary.
    pub fn handle_wheel(&mut self, delta_x: f64, delta_y: f64, now_ms: f64) -> WheelOutcome {
        if self.is_animating() {
            return WheelOutcome::Busy;
        }
        if self.cooling_down(now_ms) {
            return WheelOutcome::CoolingDown;
        }
        let threshold = self.config.scroll_delta_threshold;
        if let Some(range) = self.config.gallery {
            if range.contains(self.current)
                && delta_x.abs() > delta_y.abs()
                && delta_x.abs() > threshold
            {
                self.last_input_ms = Some(now_ms);
                let outcome = if delta_x > 0.0 && self.current < range.last {
                    self.go_to_section(self.current + 1)
                } else if delta_x < 0.0 && self.current > range.first {
                    self.go_to_section(self.current - 1)
                } else {
                    NavOutcome::AtBoundary
                };
                return WheelOutcome::Gallery(outcome);
            }
        }
        if delta_y.is_nan() || delta_y == 0.0 || delta_y.abs() < threshold {
            return WheelOutcome::BelowThreshold;
        }
        self.last_input_ms = Some(now_ms);
        let wheel_down = delta_y > 0.0;
        let direction = if wheel_down == self.config.invert_wheel {
            Direction::Previous
        } else {
            Direction::Next
        };
        WheelOutcome::Step(direction, self.navigate(direction))
    }

    /// Horizontal swipe from `start_x` to `end_x`; a leftward swipe advances.
    pub fn handle_touch_gesture(&mut self, start_x: f64, end_x: f64) -> SwipeOutcome {
        let diff = start_x - end_x;
        if !diff.is_finite() || diff.abs() < self.config.touch_delta_threshold {
            return SwipeOutcome::BelowThreshold;
        }
        let direction = if diff > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        SwipeOutcome::Step(direction, self.navigate(direction))
    }

    /// Returns `None` for keys not bound to a direction.
    pub fn handle_key(&mut self, key: &str) -> Option<(Direction, NavOutcome)> {
        let direction = self.key_direction(key)?;
        Some((direction, self.navigate(direction)))
    }

    pub fn key_direction(&self, key: &str) -> Option<Direction> {
        let keys = &self.config.keys;
        if keys.next.iter().any(|bound| bound == key) {
            Some(Direction::Next)
        } else if keys.previous.iter().any(|bound| bound == key) {
            Some(Direction::Previous)
        } else {
            None
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> NavOutcome {
        match direction {
            Direction::Next => self.navigate_next(),
            Direction::Previous => self.navigate_previous(),
        }
    }

    pub fn navigate_next(&mut self) -> NavOutcome {
        if self.is_animating() {
            return NavOutcome::Busy;
        }
        if self.current + 1 < self.total {
            self.go_to_section(self.current + 1)
        } else {
            NavOutcome::AtBoundary
        }
    }

    pub fn navigate_previous(&mut self) -> NavOutcome {
        if self.is_animating() {
            return NavOutcome::Busy;
        }
        if self.current > 0 {
            self.go_to_section(self.current - 1)
        } else {
            NavOutcome::AtBoundary
        }
    }

    pub fn go_to_section(&mut self, index: usize) -> NavOutcome {
        if self.is_animating() {
            return NavOutcome::Busy;
        }
        if index >= self.total {
            return NavOutcome::OutOfRange;
        }
        if index == self.current {
            return NavOutcome::Unchanged;
        }
        let Some(target) = self.target_for(index) else {
            return NavOutcome::OutOfRange;
        };
        let from = self.current;
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.phase = NavPhase::Animating { target: index, seq };
        self.current = index;
        self.stage.mark_active(index);
        self.stage.animate_to(
            target,
            self.config.transition_duration_secs,
            self.config.easing,
            TransitionTicket { seq, target: index },
        );
        NavOutcome::Started { from, to: index }
    }

    /// Releases the animation lock. Returns false for a ticket that does not
    /// belong to the transition in flight.
    pub fn complete_transition(&mut self, ticket: TransitionTicket) -> bool {
        match self.phase {
            NavPhase::Animating { seq, target }
                if seq == ticket.seq && target == ticket.target =>
            {
                self.phase = NavPhase::Idle;
                if self.config.units == LayoutUnits::Pixels {
                    if let Some(exact) = self.target_for(self.current) {
                        self.stage.set_position(exact);
                    }
                }
                true
            }
            _ => false,
        }
    }

    /// Re-lays sections for the current viewport and snaps the container to
    /// the current section. A transition in flight is left alone; its
    /// completion snaps to the fresh position. Returns whether a snap happened.
    pub fn handle_resize(&mut self) -> bool {
        let viewport = self.stage.viewport();
        let origins = self.layout.section_origins(self.config.units, viewport);
        self.stage.place_sections(&origins);
        if self.is_animating() {
            return false;
        }
        match self.target_for(self.current) {
            Some(target) => {
                self.stage.set_position(target);
                true
            }
            None => false,
        }
    }

    fn target_for(&self, index: usize) -> Option<Translation> {
        self.layout
            .container_offset(index, self.config.units, self.stage.viewport())
    }
}
