use glam::vec3;
use rand::Rng;

use super::{is_valid_time, Animate, Pose};

/// Phases are drawn from `0..PHASE_RANGE` seconds.
pub const PHASE_RANGE: f32 = 10_000.;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Vertical range the bob is mapped onto before `float_intensity` is
    /// applied.
    pub floating_range: [f32; 2],
}

impl FloatParams {
    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            floating_range: [-0.1, 0.1],
        }
    }

    pub const fn range(self, low: f32, high: f32) -> Self {
        Self {
            floating_range: [low, high],
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let values = [
            self.speed,
            self.rotation_intensity,
            self.float_intensity,
            self.floating_range[0],
            self.floating_range[1],
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("parameters must be finite");
        }
        if self.speed < 0. {
            return Err("speed must not be negative");
        }
        if self.floating_range[0] > self.floating_range[1] {
            return Err("floating range is inverted");
        }
        Ok(())
    }
}

impl Default for FloatParams {
    fn default() -> Self {
        Self::new(1., 1., 1.)
    }
}

/// Bob-and-sway offset with its own phase, so entities sharing parameters do
/// not move in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingOscillator {
    params: FloatParams,
    phase: f32,
    pose: Pose,
}

impl FloatingOscillator {
    pub fn new(params: FloatParams, phase: f32) -> Self {
        Self {
            params,
            phase,
            pose: Pose::default(),
        }
    }

    pub fn with_rng(params: FloatParams, rng: &mut impl Rng) -> Self {
        Self::new(params, rng.gen_range(0.0..PHASE_RANGE))
    }

    pub fn params(&self) -> FloatParams {
        self.params
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn update(&mut self, t: f32) -> Pose {
        if !is_valid_time(t) {
            return self.pose;
        }

        let FloatParams {
            speed,
            rotation_intensity,
            float_intensity,
            floating_range: [low, high],
        } = self.params;

        let angle = (self.phase + t) / 4. * speed;
        let (sin, cos) = angle.sin_cos();

        // sin/10 spans [-0.1, 0.1]; remap onto the configured range.
        let bob = low + (sin / 10. + 0.1) / 0.2 * (high - low);

        self.pose = Pose {
            rotation: vec3(cos / 8., sin / 8., sin / 20.) * rotation_intensity,
            offset: vec3(0., bob * float_intensity, 0.),
        };
        self.pose
    }
}

/// Layers a [`FloatingOscillator`] over any inner animator.
#[derive(Debug, Clone, PartialEq)]
pub struct Floating<A> {
    inner: A,
    oscillator: FloatingOscillator,
}

impl<A: Animate> Floating<A> {
    pub fn new(inner: A, oscillator: FloatingOscillator) -> Self {
        Self { inner, oscillator }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn oscillator(&self) -> &FloatingOscillator {
        &self.oscillator
    }
}

impl<A: Animate> Animate for Floating<A> {
    fn animate(&mut self, t: f32, delta: f32) -> Pose {
        self.inner.animate(t, delta) + self.oscillator.update(t)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::animation::{Animator, Motion};

    #[test]
    fn default_range_is_identity_mapping() {
        let mut oscillator = FloatingOscillator::new(FloatParams::default(), 0.);
        let t = 2.;
        let pose = oscillator.update(t);
        let angle: f32 = t / 4.;

        assert!((pose.offset.y - angle.sin() / 10.).abs() < 1e-6);
        assert!((pose.rotation.x - angle.cos() / 8.).abs() < 1e-6);
        assert!((pose.rotation.z - angle.sin() / 20.).abs() < 1e-6);
    }

    #[test]
    fn intensities_scale_the_offsets() {
        let params = FloatParams::new(2., 0.5, 3.);
        let base = FloatingOscillator::new(FloatParams::new(2., 1., 1.), 7.).update(1.);
        let scaled = FloatingOscillator::new(params, 7.).update(1.);

        assert!((scaled.rotation - base.rotation * 0.5).abs().max_element() < 1e-6);
        assert!((scaled.offset.y - base.offset.y * 3.).abs() < 1e-6);
    }

    #[test]
    fn custom_range_bounds_the_bob() {
        let params = FloatParams::new(1., 1., 1.).range(0., 0.5);
        let mut oscillator = FloatingOscillator::new(params, 0.);
        for i in 0..200 {
            let y = oscillator.update(i as f32 * 0.25).offset.y;
            assert!((-1e-6..=0.5 + 1e-6).contains(&y), "{}", y);
        }
    }

    #[test]
    fn seeded_phases_differ_between_instances() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let a = FloatingOscillator::with_rng(FloatParams::default(), &mut rng);
        let b = FloatingOscillator::with_rng(FloatParams::default(), &mut rng);
        assert_ne!(a.phase(), b.phase());
        assert!((0.0..PHASE_RANGE).contains(&a.phase()));

        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let replayed = FloatingOscillator::with_rng(FloatParams::default(), &mut rng);
        assert_eq!(a.phase(), replayed.phase());
    }

    #[test]
    fn floating_adds_to_the_inner_motion() {
        let params = FloatParams::new(1.5, 1., 2.);
        let mut inner = Animator::new(Motion::RING);
        let mut oscillator = FloatingOscillator::new(params, 42.);
        let mut floating = Floating::new(Animator::new(Motion::RING), oscillator.clone());

        let composed = floating.animate(3., 1. / 60.);
        let expected = inner.animate(3., 1. / 60.) + oscillator.update(3.);
        assert_eq!(composed, expected);
    }

    #[test]
    fn invalid_time_keeps_the_last_offset() {
        let mut oscillator = FloatingOscillator::new(FloatParams::default(), 3.);
        let good = oscillator.update(1.);
        assert_eq!(oscillator.update(f32::NAN), good);
        assert_eq!(oscillator.update(-4.), good);
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        assert!(FloatParams::new(f32::NAN, 1., 1.).validate().is_err());
        assert!(FloatParams::new(-1., 1., 1.).validate().is_err());
        assert!(FloatParams::default().range(1., -1.).validate().is_err());
        assert!(FloatParams::default().validate().is_ok());
    }
}
