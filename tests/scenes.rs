use atmos::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightKind, LightSpec, MaterialSpec},
    geometry::Shape,
    particles::{Bounds, ParticleSpec},
    scheduler::{DisplaySink, Frame, FrameScheduler},
    skins::{CameraSpec, EntitySpec, SkinConfig},
    theme::{ThemeMode, ThemeStore, Themed},
    window::Viewport,
    SceneAssembler, SceneError, SkinId,
};

const VIEWPORT: Viewport = Viewport::new(1280, 720);

static ORB: [EntitySpec; 1] = [EntitySpec::new(
    "orb",
    EntityKind::Orb,
    Shape::sphere(1.),
    [0., 0., 0.],
    MaterialSpec::new(Themed::new(0x6366f1, 0x818cf8)),
    Motion::orb(1.),
)];

static LIGHTS: [LightSpec; 1] = [LightSpec {
    kind: LightKind::Ambient,
    position: [0., 0., 0.],
    color: Themed::same(0xffffff),
    intensity: Themed::same(0.5),
}];

static BAD_FLOAT: [EntitySpec; 1] = [EntitySpec::new(
    "drifter",
    EntityKind::Sphere,
    Shape::sphere(0.5),
    [1., 1., 1.],
    MaterialSpec::new(Themed::same(0xffffff)),
    Motion::Still,
)
.floating(FloatParams::new(-1., 1., 1.))];

fn particles(count: u32, bounds: Bounds) -> ParticleSpec {
    ParticleSpec {
        count,
        bounds,
        color: Themed::same(0xffffff),
        opacity: 0.6,
        size: 0.03,
        spin_rate: 0.05,
        tilt_frequency: 0.1,
        tilt_amplitude: 0.1,
    }
}

fn config(entities: &'static [EntitySpec], particles: Option<ParticleSpec>) -> SkinConfig {
    SkinConfig {
        name: "fixture",
        camera: CameraSpec::looking_at_origin([0., 0., 8.], 45.),
        background: Themed::new(0xffffff, 0x000000),
        entities,
        lights: &LIGHTS,
        particles,
    }
}

#[derive(Debug, Default)]
struct FrameCounter(usize);

impl DisplaySink for FrameCounter {
    fn present(&mut self, _frame: &Frame<'_>) {
        self.0 += 1;
    }
}

#[test]
fn single_orb_spins_a_fixed_amount_per_frame() {
    let mut store = ThemeStore::default();
    let mut scheduler = FrameScheduler::new(
        SceneAssembler::new(VIEWPORT).seed(3),
        store.subscribe(),
        FrameCounter::default(),
    );
    let token = scheduler.mount_config(&config(&ORB, None)).unwrap();

    for _ in 0..100 {
        assert!(scheduler.tick(token, 1. / 60.));
    }
    assert_eq!(scheduler.sink().0, 100);

    let scene = scheduler.scene().unwrap();
    let rotation = scene.entities()[0].transform().rotation;
    let seconds = scheduler.stats().unwrap().elapsed;
    assert!((seconds - 100. / 60.).abs() < 1e-4);
    assert!((rotation.y - 0.3).abs() < 1e-4, "{}", rotation.y);
    assert!((rotation.x - (seconds * 0.3).sin() * 0.2).abs() < 1e-4);
}

#[test]
fn every_skin_assembles_in_both_themes() {
    let assembler = SceneAssembler::new(VIEWPORT).seed(1);
    for skin in SkinId::ALL {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let scene = assembler.assemble(skin.config(), mode).unwrap();
            assert_eq!(scene.mode(), mode);
            assert_eq!(scene.seed(), 1);
            assert!(!scene.entities().is_empty());
        }
    }
}

#[test]
fn seeded_scenes_are_reproducible() {
    for skin in SkinId::ALL {
        let a = SceneAssembler::new(VIEWPORT)
            .seed(42)
            .assemble(skin.config(), ThemeMode::Dark)
            .unwrap();
        let b = SceneAssembler::new(VIEWPORT)
            .seed(42)
            .assemble(skin.config(), ThemeMode::Dark)
            .unwrap();
        assert_eq!(a, b, "{}", skin);
    }
}

#[test]
fn different_seeds_scatter_particles_differently() {
    let a = SceneAssembler::new(VIEWPORT)
        .seed(1)
        .assemble(SkinId::Aurora.config(), ThemeMode::Dark)
        .unwrap();
    let b = SceneAssembler::new(VIEWPORT)
        .seed(2)
        .assemble(SkinId::Aurora.config(), ThemeMode::Dark)
        .unwrap();
    assert_ne!(
        a.particles().unwrap().positions(),
        b.particles().unwrap().positions()
    );
}

#[test]
fn aurora_field_fills_its_bounds() {
    let scene = SceneAssembler::new(VIEWPORT)
        .seed(8)
        .assemble(SkinId::Aurora.config(), ThemeMode::Dark)
        .unwrap();
    let field = scene.particles().unwrap();
    let bounds = field.spec().bounds;

    assert_eq!(field.positions().len(), 200);
    assert_eq!(bounds, Bounds::new(20., 20., 10.));
    assert!(field.positions().iter().all(|p| bounds.contains(*p)));
}

#[test]
fn every_skin_shape_builds_a_mesh() {
    for skin in SkinId::ALL {
        for spec in skin.config().entities {
            let mesh = spec.shape.mesh();
            assert!(!mesh.vertices.is_empty(), "{}/{}", skin, spec.name);
            assert_eq!(mesh.indices.len() % 3, 0);
            assert!(mesh
                .indices
                .iter()
                .all(|&i| (i as usize) < mesh.vertices.len()));
        }
    }
}

#[test]
fn construction_errors_name_the_culprit() {
    let assembler = SceneAssembler::new(VIEWPORT).seed(1);

    let err = assembler
        .assemble(&config(&BAD_FLOAT, None), ThemeMode::Dark)
        .unwrap_err();
    assert!(matches!(
        err,
        SceneError::InvalidFloating {
            skin: "fixture",
            entity: "drifter",
            ..
        }
    ));
    assert!(err.to_string().contains("drifter"));

    let err = assembler
        .assemble(
            &config(&ORB, Some(particles(0, Bounds::new(20., 20., 10.)))),
            ThemeMode::Dark,
        )
        .unwrap_err();
    assert_eq!(err, SceneError::InvalidParticleCount { skin: "fixture" });

    let err = assembler
        .assemble(
            &config(&ORB, Some(particles(200, Bounds::new(20., -1., 10.)))),
            ThemeMode::Dark,
        )
        .unwrap_err();
    assert!(matches!(err, SceneError::InvalidBounds { .. }));
}

#[test]
fn unseeded_assembly_still_succeeds() {
    let scene = SceneAssembler::new(VIEWPORT)
        .assemble(&config(&ORB, Some(particles(16, Bounds::new(2., 2., 2.)))), ThemeMode::Light)
        .unwrap();
    assert_eq!(scene.particles().unwrap().positions().len(), 16);
}
