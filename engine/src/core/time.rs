//! Frame timing

use std::time::Instant;

/// Time information handed to every per-frame callback
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeStep {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since the clock was started
    pub elapsed: f32,
}

impl TimeStep {
    pub fn new(dt: f32, elapsed: f32) -> Self {
        Self { dt, elapsed }
    }
}

/// Wall clock producing [`TimeStep`]s
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Advance the clock and return the step since the previous tick
    pub fn tick(&mut self) -> TimeStep {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        TimeStep::new(dt, now.duration_since(self.start).as_secs_f32())
    }
}
