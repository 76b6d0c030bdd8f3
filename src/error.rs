use crate::entity::EntityKind;

/// Rejections raised while assembling a scene. A scene that fails to assemble
/// is never mounted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("camera of skin `{skin}` is invalid: {reason}")]
    InvalidCamera {
        skin: &'static str,
        reason: &'static str,
    },

    #[error("entity `{entity}` of skin `{skin}` has an invalid shape: {reason}")]
    InvalidShape {
        skin: &'static str,
        entity: &'static str,
        reason: &'static str,
    },

    #[error("entity `{entity}` of skin `{skin}` has distortion {value} outside 0..=1")]
    DistortionOutOfRange {
        skin: &'static str,
        entity: &'static str,
        value: f32,
    },

    #[error("entity `{entity}` of skin `{skin}` has an invalid material: {reason}")]
    InvalidMaterial {
        skin: &'static str,
        entity: &'static str,
        reason: &'static str,
    },

    #[error("entity `{entity}` of skin `{skin}` has invalid floating parameters: {reason}")]
    InvalidFloating {
        skin: &'static str,
        entity: &'static str,
        reason: &'static str,
    },

    #[error("entity `{entity}` of skin `{skin}` is a {kind:?} and cannot use {motion} motion")]
    MotionMismatch {
        skin: &'static str,
        entity: &'static str,
        kind: EntityKind,
        motion: &'static str,
    },

    #[error("entity `{entity}` of skin `{skin}` has an invalid base transform")]
    InvalidTransform {
        skin: &'static str,
        entity: &'static str,
    },

    #[error("particle field of skin `{skin}` must contain at least one particle")]
    InvalidParticleCount { skin: &'static str },

    #[error("particle field of skin `{skin}` has invalid bounds {width}x{height}x{depth}")]
    InvalidBounds {
        skin: &'static str,
        width: f32,
        height: f32,
        depth: f32,
    },

    #[error("particle field of skin `{skin}` is invalid: {reason}")]
    InvalidParticles {
        skin: &'static str,
        reason: &'static str,
    },

    #[error("skin `{skin}` declares {count} lights, at most {max} are supported")]
    TooManyLights {
        skin: &'static str,
        count: usize,
        max: usize,
    },
}

/// Failure to parse a skin or theme name from the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNameError {
    #[error("unknown skin `{0}` (expected aurora, glass, prism, organic or brutalist)")]
    UnknownSkin(String),

    #[error("unknown theme `{0}` (expected light or dark)")]
    UnknownTheme(String),
}
