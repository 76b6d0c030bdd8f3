use glam::Vec3;

use super::{is_valid_time, Animate, Pose, REFERENCE_FRAME_RATE};

/// Primary motion of an entity kind.
///
/// Angles marked "per frame" accumulate and are carried in the animator's
/// state; everything else is a direct function of elapsed time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Motion {
    Still,
    /// `rotation.x = sin(t * k * 0.3) * 0.2` and `rotation.y += 0.003 * k`
    /// per frame, where `k` is `speed` when the matching flag is set and `1`
    /// otherwise.
    Orb {
        speed: f32,
        tilt_scaled: bool,
        spin_scaled: bool,
    },
    /// `rotation.x = t * tilt_rate`, `rotation.z = sin(t * roll_frequency) * roll_amplitude`.
    Ring {
        tilt_rate: f32,
        roll_frequency: f32,
        roll_amplitude: f32,
    },
    /// `rotation.y += spin_per_frame`, `rotation.z = sin(t * 0.4) * 0.3`.
    Wobble { spin_per_frame: f32 },
    /// `rotation.y += spin_per_frame`, `rotation.x = sin(t * 0.2) * 0.1`.
    Blob { spin_per_frame: f32 },
    /// `offset.y = sin(t * frequency) * amplitude`.
    Bob { frequency: f32, amplitude: f32 },
    /// Every axis accumulates its own per-frame increment.
    Tumble { spin_per_frame: [f32; 3] },
}

impl Motion {
    pub const RING: Motion = Motion::Ring {
        tilt_rate: 0.2,
        roll_frequency: 0.3,
        roll_amplitude: 0.5,
    };

    pub const GLASS_BOB: Motion = Motion::Bob {
        frequency: 0.5,
        amplitude: 0.3,
    };

    pub const fn orb(speed: f32) -> Self {
        Motion::Orb {
            speed,
            tilt_scaled: true,
            spin_scaled: true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Motion::Still => "still",
            Motion::Orb { .. } => "orb",
            Motion::Ring { .. } => "ring",
            Motion::Wobble { .. } => "wobble",
            Motion::Blob { .. } => "blob",
            Motion::Bob { .. } => "bob",
            Motion::Tumble { .. } => "tumble",
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Motion::Still => true,
            Motion::Orb { speed, .. } => speed.is_finite(),
            Motion::Ring {
                tilt_rate,
                roll_frequency,
                roll_amplitude,
            } => tilt_rate.is_finite() && roll_frequency.is_finite() && roll_amplitude.is_finite(),
            Motion::Wobble { spin_per_frame } | Motion::Blob { spin_per_frame } => {
                spin_per_frame.is_finite()
            }
            Motion::Bob {
                frequency,
                amplitude,
            } => frequency.is_finite() && amplitude.is_finite(),
            Motion::Tumble { spin_per_frame } => spin_per_frame.iter().all(|v| v.is_finite()),
        }
    }
}

/// A motion plus the state it accumulates between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    motion: Motion,
    pose: Pose,
}

impl Animator {
    pub fn new(motion: Motion) -> Self {
        Self {
            motion,
            pose: Pose::default(),
        }
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }
}

impl Animate for Animator {
    fn animate(&mut self, t: f32, delta: f32) -> Pose {
        if !is_valid_time(t) || !is_valid_time(delta) {
            return self.pose;
        }

        let frames = delta * REFERENCE_FRAME_RATE;
        let pose = &mut self.pose;

        match self.motion {
            Motion::Still => {}
            Motion::Orb {
                speed,
                tilt_scaled,
                spin_scaled,
            } => {
                let tilt_speed = if tilt_scaled { speed } else { 1. };
                let spin_speed = if spin_scaled { speed } else { 1. };
                pose.rotation.x = (t * tilt_speed * 0.3).sin() * 0.2;
                pose.rotation.y += 0.003 * spin_speed * frames;
            }
            Motion::Ring {
                tilt_rate,
                roll_frequency,
                roll_amplitude,
            } => {
                pose.rotation.x = t * tilt_rate;
                pose.rotation.z = (t * roll_frequency).sin() * roll_amplitude;
            }
            Motion::Wobble { spin_per_frame } => {
                pose.rotation.y += spin_per_frame * frames;
                pose.rotation.z = (t * 0.4).sin() * 0.3;
            }
            Motion::Blob { spin_per_frame } => {
                pose.rotation.y += spin_per_frame * frames;
                pose.rotation.x = (t * 0.2).sin() * 0.1;
            }
            Motion::Bob {
                frequency,
                amplitude,
            } => {
                pose.offset.y = (t * frequency).sin() * amplitude;
            }
            Motion::Tumble { spin_per_frame } => {
                pose.rotation += Vec3::from(spin_per_frame) * frames;
            }
        }

        self.pose
    }
}
