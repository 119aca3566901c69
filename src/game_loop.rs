//! Fixed-timestep accumulator
//!
//! Rendering runs at whatever rate the host achieves; simulation advances in
//! fixed steps drained from an accumulator so the same wall-clock time always
//! produces the same tick sequence.

/// Default simulation rate: 60 ticks per second.
pub const DEFAULT_FIXED_STEP_MS: f32 = 1000.0 / 60.0;

/// A single frame is never allowed to contribute more than this, so a
/// backgrounded or stalled host cannot queue a spiral of catch-up ticks.
pub const MAX_FRAME_MS: f32 = 100.0;

#[derive(Debug)]
pub struct FixedStepLoop {
    step_ms: f32,
    accumulator_ms: f32,
}

impl Default for FixedStepLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP_MS)
    }
}

impl FixedStepLoop {
    pub fn new(step_ms: f32) -> Self {
        Self {
            step_ms,
            accumulator_ms: 0.0,
        }
    }

    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }

    /// Feed one frame's wall-clock delta and run `update` once per elapsed
    /// fixed step. Returns how many steps ran.
    pub fn advance<F>(&mut self, frame_ms: f32, mut update: F) -> u32
    where
        F: FnMut(f32),
    {
        self.accumulator_ms += frame_ms.min(MAX_FRAME_MS);

        let mut steps = 0;
        while self.accumulator_ms >= self.step_ms {
            update(self.step_ms);
            self.accumulator_ms -= self.step_ms;
            steps += 1;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}
