use std::time::SystemTime;

use glam::{vec3, Vec3};
use log::info;
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

use crate::theme::{Color, ThemeMode, Themed};

/// Axis-aligned volume centred on the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v > 0.)
    }

    pub fn half_extents(&self) -> Vec3 {
        vec3(self.width, self.height, self.depth) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.half_extents();
        point.abs().cmple(half).all()
    }
}

/// Declarative description of a skin's particle field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleSpec {
    pub count: u32,
    pub bounds: Bounds,
    pub color: Themed<u32>,
    pub opacity: f32,
    pub size: f32,
    /// `rotation.y = t * spin_rate`.
    pub spin_rate: f32,
    /// `rotation.x = sin(t * tilt_frequency) * tilt_amplitude`.
    pub tilt_frequency: f32,
    pub tilt_amplitude: f32,
}

impl ParticleSpec {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.size.is_finite() && self.size > 0.) {
            return Err("point size must be positive");
        }
        if !(0. ..=1.).contains(&self.opacity) {
            return Err("opacity must be within 0..=1");
        }
        let rates = [self.spin_rate, self.tilt_frequency, self.tilt_amplitude];
        if rates.iter().any(|v| !v.is_finite()) {
            return Err("rotation parameters must be finite");
        }
        Ok(())
    }
}

/// Draws `count` points uniformly inside `bounds`.
pub fn generate(count: usize, bounds: Bounds, rng: &mut impl Rng) -> Vec<Vec3> {
    let half = bounds.half_extents();
    (0..count)
        .map(|_| {
            vec3(
                rng.gen_range(-half.x..=half.x),
                rng.gen_range(-half.y..=half.y),
                rng.gen_range(-half.z..=half.z),
            )
        })
        .collect()
}

pub fn generate_seeded(count: usize, bounds: Bounds, seed: u64) -> Vec<Vec3> {
    generate(count, bounds, &mut Pcg64Mcg::seed_from_u64(seed))
}

/// Seed taken from the wall clock, for unseeded production runs.
pub fn clock_seed() -> u64 {
    let seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();
    info!("Seeded RNG with {}", seed);
    seed
}

/// Fixed cloud of points; only the aggregate rotation changes per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    spec: ParticleSpec,
    positions: Vec<Vec3>,
    color: Color,
    rotation: Vec3,
}

impl ParticleField {
    /// Callers validate `spec` first; see `SceneAssembler`.
    pub fn new(spec: ParticleSpec, mode: ThemeMode, rng: &mut impl Rng) -> Self {
        Self {
            positions: generate(spec.count as usize, spec.bounds, rng),
            color: Self::resolve_color(&spec, mode),
            rotation: Vec3::ZERO,
            spec,
        }
    }

    fn resolve_color(spec: &ParticleSpec, mode: ThemeMode) -> Color {
        Color::from_hex(spec.color.resolve(mode)).with_alpha(spec.opacity)
    }

    pub fn spec(&self) -> &ParticleSpec {
        &self.spec
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.spec.size
    }

    /// Euler angles (XYZ order) applied to the whole field.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn update(&mut self, t: f32) {
        if !t.is_finite() || t < 0. {
            return;
        }
        self.rotation = vec3(
            (t * self.spec.tilt_frequency).sin() * self.spec.tilt_amplitude,
            t * self.spec.spin_rate,
            0.,
        );
    }

    pub fn apply_theme(&mut self, mode: ThemeMode) {
        self.color = Self::resolve_color(&self.spec, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ParticleSpec {
        ParticleSpec {
            count: 200,
            bounds: Bounds::new(20., 20., 10.),
            color: Themed::new(0x6366f1, 0xffffff),
            opacity: 0.6,
            size: 0.03,
            spin_rate: 0.05,
            tilt_frequency: 0.1,
            tilt_amplitude: 0.1,
        }
    }

    #[test]
    fn points_fall_inside_the_bounds() {
        let points = generate_seeded(200, Bounds::new(20., 20., 10.), 1);
        assert_eq!(points.len(), 200);
        for p in &points {
            assert!((-10. ..=10.).contains(&p.x));
            assert!((-10. ..=10.).contains(&p.y));
            assert!((-5. ..=5.).contains(&p.z));
        }
    }

    #[test]
    fn the_same_seed_reproduces_the_cloud() {
        let bounds = Bounds::new(4., 4., 2.);
        assert_eq!(
            generate_seeded(64, bounds, 99),
            generate_seeded(64, bounds, 99)
        );
        assert_ne!(
            generate_seeded(64, bounds, 99),
            generate_seeded(64, bounds, 100)
        );
    }

    #[test]
    fn update_only_rotates_the_field() {
        let mut field = ParticleField::new(spec(), ThemeMode::Dark, &mut Pcg64Mcg::seed_from_u64(3));
        let positions = field.positions().to_vec();

        field.update(10.);
        assert_eq!(field.positions(), positions.as_slice());
        assert!((field.rotation().y - 0.5).abs() < 1e-6);
        assert!((field.rotation().x - (1f32).sin() * 0.1).abs() < 1e-6);

        let rotation = field.rotation();
        field.update(f32::NAN);
        assert_eq!(field.rotation(), rotation);
    }

    #[test]
    fn theme_changes_only_the_color() {
        let mut field = ParticleField::new(spec(), ThemeMode::Dark, &mut Pcg64Mcg::seed_from_u64(3));
        let dark = field.color();
        field.apply_theme(ThemeMode::Light);
        assert_ne!(field.color(), dark);
        assert_eq!(field.color().a, 0.6);
    }

    #[test]
    fn bounds_validation() {
        assert!(Bounds::new(1., 1., 1.).is_valid());
        assert!(!Bounds::new(0., 1., 1.).is_valid());
        assert!(!Bounds::new(1., f32::NAN, 1.).is_valid());
        assert!(!Bounds::new(1., 1., -2.).is_valid());
    }
}
