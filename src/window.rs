use winit::dpi::PhysicalSize;

/// Drawable surface size in physical pixels. A zero dimension means the
/// window is minimised and nothing can be drawn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        (!self.is_empty()).then(|| self.width as f32 / self.height as f32)
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Native window the renderer can create a surface for.
pub trait Window: raw_window_handle::HasRawWindowHandle {
    fn viewport(&self) -> Viewport;
}

impl Window for winit::window::Window {
    fn viewport(&self) -> Viewport {
        self.inner_size().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimised_viewport_has_no_aspect_ratio() {
        assert!(Viewport::new(0, 720).is_empty());
        assert!(Viewport::new(1280, 0).is_empty());
        assert_eq!(Viewport::new(0, 720).aspect_ratio(), None);
        assert_eq!(Viewport::new(800, 400).aspect_ratio(), Some(2.));
    }

    #[test]
    fn converts_from_physical_size() {
        let viewport = Viewport::from(PhysicalSize::new(640, 360));
        assert_eq!(viewport, Viewport::new(640, 360));
    }
}
