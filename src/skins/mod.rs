//! Declarative scene tables, one per site skin.

mod aurora;
mod brutalist;
mod glass;
mod organic;
mod prism;

use std::{fmt, str::FromStr};

use crate::{
    animation::{FloatParams, Motion},
    entity::{EntityKind, LightSpec, MaterialSpec},
    error::ParseNameError,
    geometry::Shape,
    particles::ParticleSpec,
    theme::Themed,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SkinId {
    Aurora,
    Glass,
    Prism,
    Organic,
    Brutalist,
}

impl SkinId {
    pub const ALL: [SkinId; 5] = [
        SkinId::Aurora,
        SkinId::Glass,
        SkinId::Prism,
        SkinId::Organic,
        SkinId::Brutalist,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkinId::Aurora => "aurora",
            SkinId::Glass => "glass",
            SkinId::Prism => "prism",
            SkinId::Organic => "organic",
            SkinId::Brutalist => "brutalist",
        }
    }

    pub fn config(self) -> &'static SkinConfig {
        match self {
            SkinId::Aurora => &aurora::CONFIG,
            SkinId::Glass => &glass::CONFIG,
            SkinId::Prism => &prism::CONFIG,
            SkinId::Organic => &organic::CONFIG,
            SkinId::Brutalist => &brutalist::CONFIG,
        }
    }
}

impl fmt::Display for SkinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkinId {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkinId::ALL
            .into_iter()
            .find(|skin| skin.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseNameError::UnknownSkin(s.to_owned()))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSpec {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraSpec {
    pub const fn looking_at_origin(position: [f32; 3], fov: f32) -> Self {
        Self {
            position,
            target: [0., 0., 0.],
            fov,
            near: 0.1,
            far: 100.,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntitySpec {
    pub name: &'static str,
    pub kind: EntityKind,
    pub shape: Shape,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: f32,
    pub material: MaterialSpec,
    pub motion: Motion,
    pub floating: Option<FloatParams>,
}

impl EntitySpec {
    pub const fn new(
        name: &'static str,
        kind: EntityKind,
        shape: Shape,
        position: [f32; 3],
        material: MaterialSpec,
        motion: Motion,
    ) -> Self {
        Self {
            name,
            kind,
            shape,
            position,
            rotation: [0., 0., 0.],
            scale: 1.,
            material,
            motion,
            floating: None,
        }
    }

    pub const fn rotated(self, rotation: [f32; 3]) -> Self {
        Self { rotation, ..self }
    }

    pub const fn scaled(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    pub const fn floating(self, params: FloatParams) -> Self {
        Self {
            floating: Some(params),
            ..self
        }
    }
}

/// Everything needed to assemble one skin's scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinConfig {
    pub name: &'static str,
    pub camera: CameraSpec,
    pub background: Themed<u32>,
    pub entities: &'static [EntitySpec],
    pub lights: &'static [LightSpec],
    pub particles: Option<ParticleSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parsing() {
        for skin in SkinId::ALL {
            assert_eq!(skin.name().parse::<SkinId>(), Ok(skin));
            assert_eq!(skin.config().name, skin.name());
        }
        assert_eq!("GLASS".parse::<SkinId>(), Ok(SkinId::Glass));
        assert_eq!(
            "retro".parse::<SkinId>(),
            Err(ParseNameError::UnknownSkin("retro".into()))
        );
    }

    #[test]
    fn every_skin_declares_entities_and_lights() {
        for skin in SkinId::ALL {
            let config = skin.config();
            assert!(!config.entities.is_empty(), "{}", skin);
            assert!(!config.lights.is_empty(), "{}", skin);
        }
    }

    #[test]
    fn entity_names_are_unique_within_a_skin() {
        for skin in SkinId::ALL {
            let names: Vec<_> = skin.config().entities.iter().map(|e| e.name).collect();
            let mut deduped = names.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(names.len(), deduped.len(), "{}", skin);
        }
    }
}
