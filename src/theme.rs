use std::{
    fmt,
    str::FromStr,
    sync::mpsc::{self, Receiver, Sender},
};

use log::debug;

use crate::error::ParseNameError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        })
    }
}

impl FromStr for ThemeMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(ParseNameError::UnknownTheme(s.to_owned())),
        }
    }
}

/// Linear RGBA color.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0., 0., 0., 1.);
    pub const WHITE: Color = Color::rgba(1., 1., 1., 1.);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` sRGB value.
    pub fn from_hex(rgb: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.);
        Self::rgba(channel(16), channel(8), channel(0), 1.)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A value with one variant per theme mode.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Themed<T> {
    pub light: T,
    pub dark: T,
}

impl<T: Copy> Themed<T> {
    pub const fn new(light: T, dark: T) -> Self {
        Self { light, dark }
    }

    pub const fn same(value: T) -> Self {
        Self {
            light: value,
            dark: value,
        }
    }

    pub fn resolve(&self, mode: ThemeMode) -> T {
        match mode {
            ThemeMode::Light => self.light,
            ThemeMode::Dark => self.dark,
        }
    }
}

/// Minimal light/dark store standing in for the page-wide theme state.
///
/// Scenes never write to it; they hold a [`ThemeSubscription`] and poll it
/// once per tick.
#[derive(Debug)]
pub struct ThemeStore {
    mode: ThemeMode,
    subscribers: Vec<Sender<ThemeMode>>,
}

impl ThemeStore {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            subscribers: Vec::new(),
        }
    }

    pub fn current_mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.subscribers.retain(|tx| tx.send(mode).is_ok());
        debug!(
            "Theme switched to {} ({} subscribers)",
            mode,
            self.subscribers.len()
        );
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn subscribe(&mut self) -> ThemeSubscription {
        let (tx, receiver) = mpsc::channel();
        self.subscribers.push(tx);
        ThemeSubscription {
            receiver,
            mode: self.mode,
        }
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[derive(Debug)]
pub struct ThemeSubscription {
    receiver: Receiver<ThemeMode>,
    mode: ThemeMode,
}

impl ThemeSubscription {
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Drains pending notifications and returns the new mode if it differs
    /// from the last one observed.
    pub fn poll(&mut self) -> Option<ThemeMode> {
        let latest = self.receiver.try_iter().last()?;
        if latest == self.mode {
            return None;
        }
        self.mode = latest;
        Some(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_are_linearized() {
        let white = Color::from_hex(0xffffff);
        assert!((white.r - 1.).abs() < 1e-6 && white.a == 1.);

        let black = Color::from_hex(0x000000);
        assert_eq!(black, Color::BLACK);

        let mid = Color::from_hex(0x808080);
        assert!(mid.r > 0.2 && mid.r < 0.23, "{}", mid.r);
    }

    #[test]
    fn themed_values_resolve_per_mode() {
        let themed = Themed::new(1, 2);
        assert_eq!(themed.resolve(ThemeMode::Light), 1);
        assert_eq!(themed.resolve(ThemeMode::Dark), 2);
        assert_eq!(Themed::same(3).resolve(ThemeMode::Light), 3);
    }

    #[test]
    fn subscribers_see_only_the_latest_change() {
        let mut store = ThemeStore::new(ThemeMode::Light);
        let mut subscription = store.subscribe();
        assert_eq!(subscription.poll(), None);

        store.set_mode(ThemeMode::Dark);
        store.set_mode(ThemeMode::Light);
        store.set_mode(ThemeMode::Dark);
        assert_eq!(subscription.poll(), Some(ThemeMode::Dark));
        assert_eq!(subscription.poll(), None);

        store.set_mode(ThemeMode::Light);
        store.set_mode(ThemeMode::Dark);
        assert_eq!(subscription.poll(), None);
        assert_eq!(subscription.mode(), ThemeMode::Dark);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = ThemeStore::default();
        drop(store.subscribe());
        let mut live = store.subscribe();
        assert_eq!(store.toggle(), ThemeMode::Light);
        assert_eq!(store.subscribers.len(), 1);
        assert_eq!(live.poll(), Some(ThemeMode::Light));
    }

    #[test]
    fn theme_names_parse() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert!("dusk".parse::<ThemeMode>().is_err());
    }
}
