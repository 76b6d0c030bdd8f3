use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::{
    animation::{Animate, Animator, Floating, FloatingOscillator, Motion, Pose},
    geometry::Shape,
    theme::{Color, ThemeMode, Themed},
    window::Viewport,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn fit(&mut self, viewport: Viewport) {
        if let Some(aspect_ratio) = viewport.aspect_ratio() {
            self.aspect_ratio = aspect_ratio;
        }
    }
}

/// What an entity depicts. The [`Motion`] drives it; the kind restricts which
/// motions make sense for it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Orb,
    Ring,
    WobblePolyhedron,
    OrganicBlob,
    Block,
    Cylinder,
    Sphere,
}

impl EntityKind {
    pub fn accepts(self, motion: &Motion) -> bool {
        match self {
            EntityKind::Orb => {
                matches!(motion, Motion::Orb { .. } | Motion::Bob { .. } | Motion::Still)
            }
            EntityKind::Ring => matches!(motion, Motion::Ring { .. } | Motion::Still),
            EntityKind::WobblePolyhedron => matches!(motion, Motion::Wobble { .. } | Motion::Still),
            EntityKind::OrganicBlob => matches!(motion, Motion::Blob { .. } | Motion::Still),
            EntityKind::Block | EntityKind::Cylinder | EntityKind::Sphere => {
                matches!(motion, Motion::Tumble { .. } | Motion::Bob { .. } | Motion::Still)
            }
        }
    }
}

/// Declarative material; colors are `0xRRGGBB` per theme.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialSpec {
    pub color: Themed<u32>,
    pub opacity: f32,
    pub emissive: Themed<u32>,
    pub emissive_intensity: Themed<f32>,
    pub distort: f32,
    pub distort_speed: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl MaterialSpec {
    pub const fn new(color: Themed<u32>) -> Self {
        Self {
            color,
            opacity: 1.,
            emissive: Themed::same(0x000000),
            emissive_intensity: Themed::same(0.),
            distort: 0.,
            distort_speed: 0.,
            roughness: 0.5,
            metalness: 0.,
        }
    }

    pub const fn opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    pub const fn distort(self, distort: f32, distort_speed: f32) -> Self {
        Self {
            distort,
            distort_speed,
            ..self
        }
    }

    pub const fn surface(self, roughness: f32, metalness: f32) -> Self {
        Self {
            roughness,
            metalness,
            ..self
        }
    }

    pub const fn emissive(self, emissive: Themed<u32>, intensity: Themed<f32>) -> Self {
        Self {
            emissive,
            emissive_intensity: intensity,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let unit = |v: f32| (0. ..=1.).contains(&v);
        if !unit(self.opacity) {
            return Err("opacity must be within 0..=1");
        }
        if !unit(self.roughness) || !unit(self.metalness) {
            return Err("roughness and metalness must be within 0..=1");
        }
        if !self.distort_speed.is_finite() || self.distort_speed < 0. {
            return Err("distortion speed must be finite and not negative");
        }
        let intensities = [self.emissive_intensity.light, self.emissive_intensity.dark];
        if intensities.iter().any(|v| !v.is_finite() || *v < 0.) {
            return Err("emissive intensity must be finite and not negative");
        }
        Ok(())
    }

    pub fn resolve(&self, mode: ThemeMode) -> Material {
        Material {
            color: Color::from_hex(self.color.resolve(mode)).with_alpha(self.opacity),
            emissive: Color::from_hex(self.emissive.resolve(mode)),
            emissive_intensity: self.emissive_intensity.resolve(mode),
            distort: self.distort,
            distort_speed: self.distort_speed,
            roughness: self.roughness,
            metalness: self.metalness,
        }
    }
}

/// Material with colors resolved for the active theme.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub distort: f32,
    pub distort_speed: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl Material {
    pub fn is_translucent(&self) -> bool {
        self.color.a < 1.
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LightKind {
    Ambient,
    /// Shines from `position` towards the origin.
    Directional,
    Point,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightSpec {
    pub kind: LightKind,
    pub position: [f32; 3],
    pub color: Themed<u32>,
    pub intensity: Themed<f32>,
}

impl LightSpec {
    pub fn resolve(&self, mode: ThemeMode) -> Light {
        Light {
            kind: self.kind,
            position: Vec3::from(self.position),
            color: Color::from_hex(self.color.resolve(mode)),
            intensity: self.intensity.resolve(mode),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

/// Primary animator, optionally wrapped by a floating oscillator.
#[derive(Debug, Clone, PartialEq)]
pub enum Driver {
    Plain(Animator),
    Floating(Floating<Animator>),
}

impl Driver {
    pub fn new(animator: Animator, oscillator: Option<FloatingOscillator>) -> Self {
        match oscillator {
            Some(oscillator) => Driver::Floating(Floating::new(animator, oscillator)),
            None => Driver::Plain(animator),
        }
    }

    pub fn oscillator(&self) -> Option<&FloatingOscillator> {
        match self {
            Driver::Plain(_) => None,
            Driver::Floating(floating) => Some(floating.oscillator()),
        }
    }
}

impl Animate for Driver {
    fn animate(&mut self, t: f32, delta: f32) -> Pose {
        match self {
            Driver::Plain(animator) => animator.animate(t, delta),
            Driver::Floating(floating) => floating.animate(t, delta),
        }
    }
}

/// One animated object. The base transform, shape and material description
/// are fixed at construction; only the current transform and the resolved
/// material change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: &'static str,
    kind: EntityKind,
    shape: Shape,
    base: Transform,
    material_spec: MaterialSpec,
    material: Material,
    driver: Driver,
    transform: Transform,
}

impl Entity {
    pub fn new(
        name: &'static str,
        kind: EntityKind,
        shape: Shape,
        base: Transform,
        material_spec: MaterialSpec,
        driver: Driver,
        mode: ThemeMode,
    ) -> Self {
        Self {
            name,
            kind,
            shape,
            base,
            material_spec,
            material: material_spec.resolve(mode),
            driver,
            transform: base,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn base(&self) -> &Transform {
        &self.base
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn update(&mut self, t: f32, delta: f32) {
        let pose = self.driver.animate(t, delta);
        self.transform = Transform {
            position: self.base.position + pose.offset,
            rotation: self.base.rotation + pose.rotation,
            scale: self.base.scale,
        };
    }

    pub fn apply_theme(&mut self, mode: ThemeMode) {
        self.material = self.material_spec.resolve(mode);
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;
    use crate::animation::{FloatParams, Motion};

    fn orb(driver: Driver) -> Entity {
        Entity::new(
            "orb",
            EntityKind::Orb,
            Shape::sphere(1.),
            Transform {
                position: vec3(1., 2., 3.),
                ..Default::default()
            },
            MaterialSpec::new(Themed::new(0xffffff, 0x000000)).opacity(0.5),
            driver,
            ThemeMode::Light,
        )
    }

    #[test]
    fn update_offsets_the_base_transform() {
        let mut entity = orb(Driver::new(Animator::new(Motion::GLASS_BOB), None));
        entity.update(1., 1. / 60.);

        let expected_y = 2. + (0.5f32).sin() * 0.3;
        assert!((entity.transform().position.y - expected_y).abs() < 1e-6);
        assert_eq!(entity.base().position, vec3(1., 2., 3.));
    }

    #[test]
    fn floating_driver_composes_with_the_animator() {
        let oscillator = FloatingOscillator::new(FloatParams::default(), 5.);
        let mut entity = orb(Driver::new(
            Animator::new(Motion::Still),
            Some(oscillator.clone()),
        ));
        entity.update(2., 1. / 60.);

        let offset = oscillator.clone().update(2.);
        assert_eq!(
            entity.transform().position,
            vec3(1., 2., 3.) + offset.offset
        );
        assert_eq!(entity.transform().rotation, offset.rotation);
    }

    #[test]
    fn theme_changes_only_the_material() {
        let mut entity = orb(Driver::new(Animator::new(Motion::orb(1.)), None));
        entity.update(1., 1. / 60.);
        let before = entity.clone();

        entity.apply_theme(ThemeMode::Dark);
        assert_eq!(entity.transform(), before.transform());
        assert_ne!(entity.material().color, before.material().color);
        assert_eq!(entity.material().color.a, 0.5);
    }

    #[test]
    fn material_validation() {
        let base = MaterialSpec::new(Themed::same(0xffffff));
        assert!(base.validate().is_ok());
        assert!(base.opacity(1.5).validate().is_err());
        assert!(base.surface(2., 0.).validate().is_err());
        assert!(base.distort(0.5, -1.).validate().is_err());
    }
}
