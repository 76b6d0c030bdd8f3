use super::{CameraSpec, EntitySpec, SkinConfig};
use crate::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightKind, LightSpec, MaterialSpec},
    geometry::Shape,
    particles::{Bounds, ParticleSpec},
    theme::Themed,
};

static ENTITIES: [EntitySpec; 4] = [
    EntitySpec::new(
        "hero-orb",
        EntityKind::Orb,
        Shape::sphere(1.4),
        [0., 0., 0.],
        MaterialSpec::new(Themed::new(0x6366f1, 0x818cf8))
            .distort(0.4, 2.)
            .surface(0.2, 0.1)
            .emissive(Themed::new(0x4f46e5, 0x6366f1), Themed::new(0.15, 0.35)),
        Motion::orb(1.),
    )
    .floating(FloatParams::new(1.5, 0.5, 1.)),
    EntitySpec::new(
        "accent-orb-left",
        EntityKind::Orb,
        Shape::sphere(0.6),
        [-3., 1.5, -2.],
        MaterialSpec::new(Themed::new(0xec4899, 0xf472b6))
            .distort(0.3, 1.5)
            .surface(0.3, 0.1),
        Motion::orb(1.5),
    )
    .floating(FloatParams::new(2., 0.6, 1.2)),
    EntitySpec::new(
        "accent-orb-right",
        EntityKind::Orb,
        Shape::sphere(0.5),
        [3., -1.5, -1.],
        MaterialSpec::new(Themed::new(0x06b6d4, 0x22d3ee))
            .distort(0.35, 1.8)
            .surface(0.3, 0.1),
        Motion::orb(0.8),
    )
    .floating(FloatParams::new(1.2, 0.4, 0.8)),
    EntitySpec::new(
        "halo-ring",
        EntityKind::Ring,
        Shape::torus(2.4, 0.03),
        [0., 0., -0.5],
        MaterialSpec::new(Themed::new(0x818cf8, 0xa5b4fc))
            .opacity(0.6)
            .emissive(Themed::same(0x818cf8), Themed::new(0.2, 0.6)),
        Motion::RING,
    ),
];

static LIGHTS: [LightSpec; 3] = [
    LightSpec {
        kind: LightKind::Ambient,
        position: [0., 0., 0.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(0.5, 0.3),
    },
    LightSpec {
        kind: LightKind::Directional,
        position: [5., 5., 5.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(1., 0.8),
    },
    LightSpec {
        kind: LightKind::Point,
        position: [-5., -5., -5.],
        color: Themed::new(0xa855f7, 0x8b5cf6),
        intensity: Themed::new(0.5, 0.8),
    },
];

pub static CONFIG: SkinConfig = SkinConfig {
    name: "aurora",
    camera: CameraSpec::looking_at_origin([0., 0., 8.], 45.),
    background: Themed::new(0xf8fafc, 0x0b0b1a),
    entities: &ENTITIES,
    lights: &LIGHTS,
    particles: Some(ParticleSpec {
        count: 200,
        bounds: Bounds::new(20., 20., 10.),
        color: Themed::new(0x6366f1, 0xffffff),
        opacity: 0.6,
        size: 0.03,
        spin_rate: 0.05,
        tilt_frequency: 0.1,
        tilt_amplitude: 0.1,
    }),
};
