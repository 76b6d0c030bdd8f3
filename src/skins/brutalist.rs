use super::{CameraSpec, EntitySpec, SkinConfig};
use crate::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightKind, LightSpec, MaterialSpec},
    geometry::Shape,
    theme::Themed,
};

const CONCRETE: MaterialSpec =
    MaterialSpec::new(Themed::new(0x18181b, 0xfafafa)).surface(0.9, 0.);

const SIGNAL: MaterialSpec = MaterialSpec::new(Themed::new(0xef4444, 0xfacc15)).surface(0.6, 0.);

static ENTITIES: [EntitySpec; 5] = [
    EntitySpec::new(
        "slab",
        EntityKind::Block,
        Shape::Box {
            width: 2.2,
            height: 0.4,
            depth: 1.2,
        },
        [-1.8, 1., -1.],
        CONCRETE,
        Motion::Tumble {
            spin_per_frame: [0.002, 0.004, 0.],
        },
    )
    .floating(FloatParams::new(1., 0.5, 0.5)),
    EntitySpec::new(
        "cube",
        EntityKind::Block,
        Shape::cube(1.),
        [2., -0.6, 0.],
        SIGNAL,
        Motion::Tumble {
            spin_per_frame: [0.005, 0.005, 0.],
        },
    )
    .rotated([0.3, 0.5, 0.])
    .floating(FloatParams::new(1.4, 0.8, 0.8)),
    EntitySpec::new(
        "pillar",
        EntityKind::Cylinder,
        Shape::Cylinder {
            radius_top: 0.35,
            radius_bottom: 0.35,
            height: 2.4,
            radial_segments: 6,
        },
        [0.2, 0.2, -2.5],
        CONCRETE,
        Motion::Tumble {
            spin_per_frame: [0., 0.003, 0.001],
        },
    )
    .rotated([0., 0., 0.35]),
    EntitySpec::new(
        "cone",
        EntityKind::Cylinder,
        Shape::Cylinder {
            radius_top: 0.,
            radius_bottom: 0.6,
            height: 1.2,
            radial_segments: 4,
        },
        [-2.4, -1.6, 0.5],
        SIGNAL,
        Motion::Tumble {
            spin_per_frame: [0., 0.006, 0.],
        },
    )
    .floating(FloatParams::new(2., 0.4, 0.6)),
    EntitySpec::new(
        "ball",
        EntityKind::Sphere,
        Shape::Sphere {
            radius: 0.45,
            width_segments: 12,
            height_segments: 8,
        },
        [1.4, 1.7, -0.5],
        CONCRETE,
        Motion::Still,
    )
    .floating(FloatParams::new(2.5, 0., 1.5)),
];

static LIGHTS: [LightSpec; 2] = [
    LightSpec {
        kind: LightKind::Ambient,
        position: [0., 0., 0.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(0.4, 0.2),
    },
    LightSpec {
        kind: LightKind::Directional,
        position: [6., 8., 4.],
        color: Themed::same(0xffffff),
        intensity: Themed::new(1.4, 1.1),
    },
];

pub static CONFIG: SkinConfig = SkinConfig {
    name: "brutalist",
    camera: CameraSpec::looking_at_origin([0., 0., 7.], 40.),
    background: Themed::new(0xe7e5e4, 0x09090b),
    entities: &ENTITIES,
    lights: &LIGHTS,
    particles: None,
};
