use super::{CameraSpec, EntitySpec, SkinConfig};
use crate::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightKind, LightSpec, MaterialSpec},
    geometry::Shape,
    particles::{Bounds, ParticleSpec},
    theme::Themed,
};

const BLOB: Shape = Shape::Sphere {
    radius: 1.,
    width_segments: 96,
    height_segments: 96,
};

static ENTITIES: [EntitySpec; 3] = [
    EntitySpec::new(
        "moss-blob",
        EntityKind::OrganicBlob,
        BLOB,
        [-0.6, 0.2, 0.],
        MaterialSpec::new(Themed::new(0x65a30d, 0x84cc16))
            .distort(0.6, 1.2)
            .surface(0.7, 0.),
        Motion::Blob {
            spin_per_frame: 0.002,
        },
    )
    .scaled(1.5)
    .floating(FloatParams::new(1., 0.3, 0.6)),
    EntitySpec::new(
        "clay-blob",
        EntityKind::OrganicBlob,
        BLOB,
        [2.4, -1., -1.5],
        MaterialSpec::new(Themed::new(0xc2410c, 0xfb923c))
            .distort(0.5, 1.)
            .surface(0.8, 0.),
        Motion::Blob {
            spin_per_frame: 0.003,
        },
    )
    .scaled(0.8)
    .floating(FloatParams::new(1.3, 0.3, 0.8)),
    EntitySpec::new(
        "seed-blob",
        EntityKind::OrganicBlob,
        BLOB,
        [-2.6, -1.4, -0.8],
        MaterialSpec::new(Themed::new(0xca8a04, 0xfacc15))
            .distort(0.45, 1.6)
            .surface(0.6, 0.)
            .emissive(Themed::same(0xa16207), Themed::new(0., 0.25)),
        Motion::Blob {
            spin_per_frame: 0.004,
        },
    )
    .scaled(0.5)
    .floating(FloatParams::new(1.8, 0.4, 1.)),
];

static LIGHTS: [LightSpec; 3] = [
    LightSpec {
        kind: LightKind::Ambient,
        position: [0., 0., 0.],
        color: Themed::new(0xfff7ed, 0xfef3c7),
        intensity: Themed::new(0.6, 0.35),
    },
    LightSpec {
        kind: LightKind::Directional,
        position: [3., 8., 5.],
        color: Themed::new(0xfffbeb, 0xfde68a),
        intensity: Themed::new(1., 0.7),
    },
    LightSpec {
        kind: LightKind::Point,
        position: [-4., -2., 3.],
        color: Themed::new(0xbbf7d0, 0x4ade80),
        intensity: Themed::new(0.3, 0.6),
    },
];

pub static CONFIG: SkinConfig = SkinConfig {
    name: "organic",
    camera: CameraSpec::looking_at_origin([0., 0., 7.], 50.),
    background: Themed::new(0xfefce8, 0x14120b),
    entities: &ENTITIES,
    lights: &LIGHTS,
    particles: Some(ParticleSpec {
        count: 200,
        bounds: Bounds::new(20., 20., 10.),
        color: Themed::new(0xa3e635, 0xfef08a),
        opacity: 0.5,
        size: 0.04,
        spin_rate: 0.02,
        tilt_frequency: 0.08,
        tilt_amplitude: 0.15,
    }),
};
