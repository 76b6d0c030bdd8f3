use log::warn;

/// Time sample handed to every animator during one tick.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Tick {
    /// Seconds since the scene was mounted.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
}

/// Monotonic scene clock, reset on every mount.
///
/// Elapsed time accumulates in `f64` so long-running scenes keep sub-frame
/// precision. A delta that is NaN, infinite or negative leaves the clock
/// where it was.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Clock {
    elapsed: f64,
    frames: u64,
    glitches: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, delta: f32) -> Tick {
        self.frames += 1;
        if !delta.is_finite() || delta < 0. {
            self.glitches += 1;
            warn!(
                "Ignoring invalid frame delta {} at {:.3}s",
                delta, self.elapsed
            );
            return Tick {
                elapsed: self.elapsed as f32,
                delta: 0.,
            };
        }
        self.elapsed += delta as f64;
        Tick {
            elapsed: self.elapsed as f32,
            delta,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn glitches(&self) -> u64 {
        self.glitches
    }
}
