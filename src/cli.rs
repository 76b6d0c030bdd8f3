use atmos::{SkinId, ThemeMode};
use clap::Parser;

/// Ambient 3D scenes for the site skins.
///
/// Keys 1-5 mount a skin, T toggles the theme, U unmounts, Escape quits.
#[derive(Parser, Debug)]
#[command(name = "atmos", version, about)]
pub struct Args {
    /// Skin mounted at startup (aurora, glass, prism, organic, brutalist).
    #[arg(long, default_value_t = SkinId::Aurora)]
    pub skin: SkinId,

    /// Initial theme (light, dark).
    #[arg(long, default_value_t = ThemeMode::Dark)]
    pub theme: ThemeMode,

    /// Fixes oscillator phases and particle positions.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in physical pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in physical pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

pub fn parse() -> Args {
    Args::parse()
}
