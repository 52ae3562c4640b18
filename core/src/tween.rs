use crate::easing::{lerp_translation, Easing};
use crate::layout::Translation;

/// One container tween, stepped by frame timestamps.
///
/// The first step pins the start time. `payload` is handed back exactly once,
/// on the step that reaches the target.
#[derive(Debug)]
pub struct Tween<T> {
    from: Translation,
    to: Translation,
    duration_ms: f64,
    easing: Easing,
    start_ms: Option<f64>,
    payload: Option<T>,
}

#[derive(Debug, PartialEq)]
pub struct TweenFrame<T> {
    pub position: Translation,
    pub finished: Option<T>,
}

impl<T> Tween<T> {
    pub fn new(
        from: Translation,
        to: Translation,
        duration_secs: f64,
        easing: Easing,
        payload: T,
    ) -> Self {
        let duration_ms = duration_secs * 1000.0;
        Self {
            from: Translation {
                units: to.units,
                ..from
            },
            to,
            duration_ms: if duration_ms.is_finite() {
                duration_ms.max(0.0)
            } else {
                0.0
            },
            easing,
            start_ms: None,
            payload: Some(payload),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.payload.is_none()
    }

    pub fn step(&mut self, timestamp_ms: f64) -> TweenFrame<T> {
        if self.is_finished() {
            return TweenFrame {
                position: self.to,
                finished: None,
            };
        }
        let start = *self.start_ms.get_or_insert(timestamp_ms);
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (timestamp_ms - start) / self.duration_ms
        };
        if progress >= 1.0 {
            return TweenFrame {
                position: self.to,
                finished: self.payload.take(),
            };
        }
        let eased = self.easing.sample(progress);
        TweenFrame {
            position: lerp_translation(self.from, self.to, eased),
            finished: None,
        }
    }
}
