use super::{CameraSpec, EntitySpec, SkinConfig};
use crate::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightKind, LightSpec, MaterialSpec},
    geometry::Shape,
    particles::{Bounds, ParticleSpec},
    theme::Themed,
};

const GLASS: MaterialSpec = MaterialSpec::new(Themed::new(0xe0f2fe, 0xbae6fd))
    .opacity(0.35)
    .surface(0.05, 0.9);

static ENTITIES: [EntitySpec; 5] = [
    EntitySpec::new(
        "glass-orb-large",
        EntityKind::Orb,
        Shape::sphere(1.2),
        [-1.5, 0.5, 0.],
        GLASS,
        Motion::GLASS_BOB,
    ),
    EntitySpec::new(
        "glass-orb-medium",
        EntityKind::Orb,
        Shape::sphere(0.8),
        [2., -0.8, -1.],
        MaterialSpec::new(Themed::new(0xfce7f3, 0xfbcfe8))
            .opacity(0.4)
            .surface(0.05, 0.9),
        Motion::GLASS_BOB,
    ),
    EntitySpec::new(
        "glass-orb-small",
        EntityKind::Orb,
        Shape::sphere(0.45),
        [0.8, 1.8, -2.],
        MaterialSpec::new(Themed::new(0xede9fe, 0xddd6fe))
            .opacity(0.5)
            .surface(0.05, 0.9),
        Motion::Bob {
            frequency: 0.7,
            amplitude: 0.2,
        },
    ),
    EntitySpec::new(
        "glass-ring",
        EntityKind::Ring,
        Shape::torus(1.8, 0.08),
        [0., 0., -1.5],
        MaterialSpec::new(Themed::new(0x94a3b8, 0xe2e8f0))
            .opacity(0.45)
            .surface(0.1, 0.8),
        Motion::RING,
    )
    .floating(FloatParams::new(1., 0.3, 0.5)),
    EntitySpec::new(
        "frosted-core",
        EntityKind::Sphere,
        Shape::sphere(0.3),
        [-1.5, 0.5, 0.],
        MaterialSpec::new(Themed::new(0x38bdf8, 0x7dd3fc))
            .emissive(Themed::new(0x0ea5e9, 0x38bdf8), Themed::new(0.4, 0.9)),
        Motion::GLASS_BOB,
    ),
];

static LIGHTS: [LightSpec; 4] = [
    LightSpec {
        kind: LightKind::Ambient,
        position: [0., 0., 0.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(0.7, 0.4),
    },
    LightSpec {
        kind: LightKind::Directional,
        position: [10., 10., 5.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(1., 0.7),
    },
    LightSpec {
        kind: LightKind::Point,
        position: [-10., -10., -5.],
        color: Themed::new(0x7dd3fc, 0x38bdf8),
        intensity: Themed::new(0.4, 0.9),
    },
    LightSpec {
        kind: LightKind::Point,
        position: [10., -5., 5.],
        color: Themed::new(0xf9a8d4, 0xf472b6),
        intensity: Themed::new(0.3, 0.6),
    },
];

pub static CONFIG: SkinConfig = SkinConfig {
    name: "glass",
    camera: CameraSpec::looking_at_origin([0., 0., 6.], 50.),
    background: Themed::new(0xf1f5f9, 0x0f172a),
    entities: &ENTITIES,
    lights: &LIGHTS,
    particles: Some(ParticleSpec {
        count: 150,
        bounds: Bounds::new(16., 16., 8.),
        color: Themed::new(0x94a3b8, 0xe0f2fe),
        opacity: 0.5,
        size: 0.025,
        spin_rate: 0.03,
        tilt_frequency: 0.15,
        tilt_amplitude: 0.05,
    }),
};
