/// Horizontal swipe between a touch start and the matching touch end.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self { start_x: None }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Returns `(start_x, end_x)` and disarms. A touch end with no
    /// recorded start yields nothing.
    pub fn finish(&mut self, end_x: f64) -> Option<(f64, f64)> {
        self.start_x.take().map(|start_x| (start_x, end_x))
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}
