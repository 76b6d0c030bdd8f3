use std::time::Instant;

use anyhow::Result;
use atmos::{
    renderer::Renderer,
    window::{Viewport, Window as _},
    FrameScheduler, SceneAssembler, SkinId, ThemeStore,
};
use log::{error, info};
use winit::{event::VirtualKeyCode, window::Window};

use crate::cli::Args;

pub struct App {
    // Declared before `window` so the surface is dropped first.
    scheduler: FrameScheduler<Renderer>,
    theme: ThemeStore,
    last_frame: Instant,
    window: Window,
}

impl App {
    pub async fn new(window: Window, args: &Args) -> Result<Self> {
        let renderer = Renderer::new(&window).await?;

        let mut theme = ThemeStore::new(args.theme);
        let mut assembler = SceneAssembler::new(window.viewport());
        if let Some(seed) = args.seed {
            assembler = assembler.seed(seed);
        }

        let mut app = Self {
            scheduler: FrameScheduler::new(assembler, theme.subscribe(), renderer),
            theme,
            last_frame: Instant::now(),
            window,
        };
        app.scheduler.mount(args.skin)?;
        app.window.set_title(&format!("atmos - {}", args.skin));

        Ok(app)
    }

    pub fn on_resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let viewport = Viewport::from(size);
        self.scheduler.sink_mut().resize(viewport);
        self.scheduler.set_viewport(viewport);
    }

    pub fn on_key_up(&mut self, keycode: VirtualKeyCode) {
        let skin = match keycode {
            VirtualKeyCode::Key1 => SkinId::Aurora,
            VirtualKeyCode::Key2 => SkinId::Glass,
            VirtualKeyCode::Key3 => SkinId::Prism,
            VirtualKeyCode::Key4 => SkinId::Organic,
            VirtualKeyCode::Key5 => SkinId::Brutalist,
            VirtualKeyCode::T => {
                let mode = self.theme.toggle();
                info!("Theme toggled to {}", mode);
                return;
            }
            VirtualKeyCode::U => {
                if self.scheduler.unmount() {
                    self.window.set_title("atmos");
                }
                return;
            }
            _ => return,
        };

        match self.scheduler.mount(skin) {
            Ok(_) => self.window.set_title(&format!("atmos - {}", skin)),
            Err(err) => error!("Failed to mount {}: {}", skin, err),
        }
        self.last_frame = Instant::now();
    }

    /// Ticks the mounted scene with the real time since the previous frame.
    pub fn render(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if let Some(token) = self.scheduler.active() {
            self.scheduler.tick(token, delta);
        }
    }
}
