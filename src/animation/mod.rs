//! Per-entity motion: primary animators, the floating oscillator that can be
//! layered on top of any of them, and the pose they produce.

mod floating;
mod motion;

use std::ops::Add;

use glam::Vec3;

pub use floating::{FloatParams, Floating, FloatingOscillator, PHASE_RANGE};
pub use motion::{Animator, Motion};

/// Per-frame increments are expressed against this rate and scaled by the
/// real frame delta.
pub const REFERENCE_FRAME_RATE: f32 = 60.;

/// Offset produced by an animator, added on top of an entity's base
/// transform.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Pose {
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
    pub offset: Vec3,
}

impl Add for Pose {
    type Output = Pose;

    fn add(self, rhs: Pose) -> Pose {
        Pose {
            rotation: self.rotation + rhs.rotation,
            offset: self.offset + rhs.offset,
        }
    }
}

/// Anything that turns scene time into a pose.
pub trait Animate {
    /// `elapsed` is seconds since mount, `delta` seconds since the previous
    /// tick. Implementations keep their last valid pose when either input is
    /// not a finite, non-negative number.
    fn animate(&mut self, elapsed: f32, delta: f32) -> Pose;
}

pub(crate) fn is_valid_time(t: f32) -> bool {
    t.is_finite() && t >= 0.
}
