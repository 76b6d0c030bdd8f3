use glam::Vec3;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::{
    animation::{Animator, FloatingOscillator},
    clock::Tick,
    entity::{Camera, Driver, Entity, Light, LightSpec, Transform},
    error::SceneError,
    particles::{self, ParticleField, ParticleSpec},
    skins::{CameraSpec, EntitySpec, SkinConfig},
    theme::{Color, ThemeMode, Themed},
    window::Viewport,
};

/// Upper bound on lights a scene may declare; the renderer reserves this
/// many slots.
pub const MAX_LIGHTS: usize = 8;

/// One mounted skin: entities, lights, the optional particle field and the
/// camera. Each scene owns all of its state exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    skin: &'static str,
    mode: ThemeMode,
    seed: u64,
    background_spec: Themed<u32>,
    background: Color,
    camera: Camera,
    entities: Vec<Entity>,
    light_specs: &'static [LightSpec],
    lights: Vec<Light>,
    particles: Option<ParticleField>,
}

impl Scene {
    pub fn skin(&self) -> &'static str {
        self.skin
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Seed every random draw of this scene came from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name() == name)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    /// Every entity and the particle field observe the same tick.
    pub fn advance(&mut self, tick: Tick) {
        for entity in &mut self.entities {
            entity.update(tick.elapsed, tick.delta);
        }
        if let Some(particles) = &mut self.particles {
            particles.update(tick.elapsed);
        }
    }

    /// Re-resolves colours for `mode`. Geometry and motion state are left
    /// untouched.
    pub fn apply_theme(&mut self, mode: ThemeMode) {
        if mode == self.mode {
            return;
        }
        debug!("Re-resolving {} colours for {} theme", self.skin, mode);

        self.mode = mode;
        self.background = Color::from_hex(self.background_spec.resolve(mode));
        for entity in &mut self.entities {
            entity.apply_theme(mode);
        }
        self.lights = resolve_lights(self.light_specs, mode);
        if let Some(particles) = &mut self.particles {
            particles.apply_theme(mode);
        }
    }

    /// Only the aspect ratio follows the viewport; an empty viewport (e.g. a
    /// minimised window) keeps the previous one.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.fit(viewport);
    }
}

fn resolve_lights(specs: &[LightSpec], mode: ThemeMode) -> Vec<Light> {
    specs.iter().map(|spec| spec.resolve(mode)).collect()
}

/// Validates a [`SkinConfig`] and builds a fresh [`Scene`] from it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneAssembler {
    viewport: Viewport,
    seed: Option<u64>,
}

impl SceneAssembler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            seed: None,
        }
    }

    /// Fixes every random draw (oscillator phases and particle positions).
    pub fn seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn assemble(&self, config: &SkinConfig, mode: ThemeMode) -> Result<Scene, SceneError> {
        let skin = config.name;
        let aspect_ratio = self
            .viewport
            .aspect_ratio()
            .ok_or(SceneError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            })?;

        validate_camera(skin, &config.camera)?;
        if config.lights.len() > MAX_LIGHTS {
            return Err(SceneError::TooManyLights {
                skin,
                count: config.lights.len(),
                max: MAX_LIGHTS,
            });
        }
        for spec in config.entities {
            validate_entity(skin, spec)?;
        }
        if let Some(spec) = &config.particles {
            validate_particles(skin, spec)?;
        }

        let seed = self.seed.unwrap_or_else(particles::clock_seed);
        let mut rng = Pcg64Mcg::seed_from_u64(seed);

        let entities = config
            .entities
            .iter()
            .map(|spec| {
                let oscillator = spec
                    .floating
                    .map(|params| FloatingOscillator::with_rng(params, &mut rng));
                Entity::new(
                    spec.name,
                    spec.kind,
                    spec.shape,
                    Transform {
                        position: Vec3::from(spec.position),
                        rotation: Vec3::from(spec.rotation),
                        scale: Vec3::splat(spec.scale),
                    },
                    spec.material,
                    Driver::new(Animator::new(spec.motion), oscillator),
                    mode,
                )
            })
            .collect::<Vec<_>>();

        let particles = config
            .particles
            .map(|spec| ParticleField::new(spec, mode, &mut rng));

        let CameraSpec {
            position,
            target,
            fov,
            near,
            far,
        } = config.camera;

        let scene = Scene {
            skin,
            mode,
            seed,
            background_spec: config.background,
            background: Color::from_hex(config.background.resolve(mode)),
            camera: Camera {
                position: Vec3::from(position),
                target: Vec3::from(target),
                fov,
                aspect_ratio,
                near,
                far,
            },
            entities,
            light_specs: config.lights,
            lights: resolve_lights(config.lights, mode),
            particles,
        };

        info!(
            "Assembled {} scene: {} theme, {} entities, {} particles, seed {}",
            skin,
            mode,
            scene.entities.len(),
            scene.particles.as_ref().map_or(0, |p| p.positions().len()),
            seed
        );
        debug!("{:#?}", scene.entities);

        Ok(scene)
    }
}

fn validate_camera(skin: &'static str, camera: &CameraSpec) -> Result<(), SceneError> {
    let invalid = |reason| SceneError::InvalidCamera { skin, reason };

    let position = Vec3::from(camera.position);
    let target = Vec3::from(camera.target);
    if !position.is_finite() || !target.is_finite() {
        return Err(invalid("position and target must be finite"));
    }
    if position == target {
        return Err(invalid("position and target coincide"));
    }
    if !(camera.fov > 0. && camera.fov < 180.) {
        return Err(invalid("field of view must be within (0, 180) degrees"));
    }
    if !(camera.near.is_finite() && camera.near > 0.) {
        return Err(invalid("near plane must be positive"));
    }
    if !(camera.far.is_finite() && camera.far > camera.near) {
        return Err(invalid("far plane must lie beyond the near plane"));
    }
    Ok(())
}

fn validate_entity(skin: &'static str, spec: &EntitySpec) -> Result<(), SceneError> {
    let entity = spec.name;

    spec.shape
        .validate()
        .map_err(|reason| SceneError::InvalidShape {
            skin,
            entity,
            reason,
        })?;

    if !spec.kind.accepts(&spec.motion) {
        return Err(SceneError::MotionMismatch {
            skin,
            entity,
            kind: spec.kind,
            motion: spec.motion.name(),
        });
    }

    let distort = spec.material.distort;
    if !(0. ..=1.).contains(&distort) {
        return Err(SceneError::DistortionOutOfRange {
            skin,
            entity,
            value: distort,
        });
    }
    spec.material
        .validate()
        .map_err(|reason| SceneError::InvalidMaterial {
            skin,
            entity,
            reason,
        })?;

    if let Some(params) = &spec.floating {
        params
            .validate()
            .map_err(|reason| SceneError::InvalidFloating {
                skin,
                entity,
                reason,
            })?;
    }

    let finite = Vec3::from(spec.position).is_finite()
        && Vec3::from(spec.rotation).is_finite()
        && spec.motion.is_finite();
    if !finite || !(spec.scale.is_finite() && spec.scale > 0.) {
        return Err(SceneError::InvalidTransform { skin, entity });
    }
    Ok(())
}

fn validate_particles(skin: &'static str, spec: &ParticleSpec) -> Result<(), SceneError> {
    if spec.count == 0 {
        return Err(SceneError::InvalidParticleCount { skin });
    }
    if !spec.bounds.is_valid() {
        return Err(SceneError::InvalidBounds {
            skin,
            width: spec.bounds.width,
            height: spec.bounds.height,
            depth: spec.bounds.depth,
        });
    }
    spec.validate()
        .map_err(|reason| SceneError::InvalidParticles { skin, reason })
}
