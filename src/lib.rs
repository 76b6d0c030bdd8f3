//! Ambient 3D scenes for the five site skins: declarative skin tables, a
//! generic assembler, per-entity animators and a frame scheduler that hands
//! each frame to a display sink.

pub mod animation;
pub mod clock;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod particles;
pub mod renderer;
pub mod scene;
pub mod scheduler;
pub mod skins;
pub mod theme;
pub mod window;

pub use error::{ParseNameError, SceneError};
pub use scene::{Scene, SceneAssembler};
pub use scheduler::{DisplaySink, Frame, FrameScheduler, MountToken};
pub use skins::SkinId;
pub use theme::{ThemeMode, ThemeStore};
