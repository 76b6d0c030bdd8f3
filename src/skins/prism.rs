use super::{CameraSpec, EntitySpec, SkinConfig};
use crate::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightKind, LightSpec, MaterialSpec},
    geometry::Shape,
    theme::Themed,
};

// The core orb here spins at a fixed rate; only its tilt follows `speed`.
static ENTITIES: [EntitySpec; 5] = [
    EntitySpec::new(
        "core-orb",
        EntityKind::Orb,
        Shape::sphere(1.),
        [0., 0., 0.],
        MaterialSpec::new(Themed::new(0x0f172a, 0x22d3ee))
            .distort(0.25, 3.)
            .surface(0.1, 0.6)
            .emissive(Themed::new(0x000000, 0x0891b2), Themed::new(0., 0.5)),
        Motion::Orb {
            speed: 2.,
            tilt_scaled: true,
            spin_scaled: false,
        },
    ),
    EntitySpec::new(
        "prism-large",
        EntityKind::WobblePolyhedron,
        Shape::Icosahedron {
            radius: 0.9,
            detail: 0,
        },
        [-2.8, 1.2, -1.],
        MaterialSpec::new(Themed::new(0xf59e0b, 0xfbbf24)).surface(0.4, 0.3),
        Motion::Wobble {
            spin_per_frame: 0.005,
        },
    )
    .floating(FloatParams::new(1.5, 1., 1.)),
    EntitySpec::new(
        "prism-small",
        EntityKind::WobblePolyhedron,
        Shape::Icosahedron {
            radius: 0.55,
            detail: 1,
        },
        [2.6, -1.3, -0.5],
        MaterialSpec::new(Themed::new(0x10b981, 0x34d399)).surface(0.4, 0.3),
        Motion::Wobble {
            spin_per_frame: 0.008,
        },
    )
    .floating(FloatParams::new(2., 1., 1.)),
    EntitySpec::new(
        "orbit-ring-inner",
        EntityKind::Ring,
        Shape::torus(1.6, 0.02),
        [0., 0., 0.],
        MaterialSpec::new(Themed::new(0x334155, 0x67e8f9))
            .emissive(Themed::same(0x22d3ee), Themed::new(0., 0.8)),
        Motion::RING,
    ),
    EntitySpec::new(
        "orbit-ring-outer",
        EntityKind::Ring,
        Shape::torus(2.3, 0.015),
        [0., 0., 0.],
        MaterialSpec::new(Themed::new(0x64748b, 0xa5f3fc)).opacity(0.7),
        Motion::Ring {
            tilt_rate: -0.15,
            roll_frequency: 0.25,
            roll_amplitude: 0.4,
        },
    )
    .rotated([0.4, 0., 0.]),
];

static LIGHTS: [LightSpec; 3] = [
    LightSpec {
        kind: LightKind::Ambient,
        position: [0., 0., 0.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(0.6, 0.25),
    },
    LightSpec {
        kind: LightKind::Directional,
        position: [-4., 6., 4.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(1.1, 0.9),
    },
    LightSpec {
        kind: LightKind::Point,
        position: [0., 0., 4.],
        color: Themed::new(0xfde68a, 0x22d3ee),
        intensity: Themed::new(0.4, 1.2),
    },
];

pub static CONFIG: SkinConfig = SkinConfig {
    name: "prism",
    camera: CameraSpec::looking_at_origin([0., 0., 7.], 45.),
    background: Themed::new(0xfafaf9, 0x020617),
    entities: &ENTITIES,
    lights: &LIGHTS,
    particles: None,
};
