//! wgpu display sink: a depth-tested mesh pass for the entities and an
//! instanced billboard pass for the particle field.

mod mesh;
mod points;

use anyhow::{Context, Result};
use log::{debug, error, warn};

use crate::{
    scene::Scene,
    scheduler::{DisplaySink, Frame, MountToken},
    window::{Viewport, Window},
};

use self::{
    mesh::{MeshRenderer, MeshRendererBuilder},
    points::{PointRenderer, PointRendererBuilder},
};

const DEPTH_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct Renderer {
    surface: wgpu::Surface,
    surface_format: wgpu::TextureFormat,
    device: wgpu::Device,
    queue: wgpu::Queue,
    viewport: Viewport,
    /// `None` while the viewport is empty.
    depth_view: Option<wgpu::TextureView>,
    mesh_renderer: MeshRenderer,
    point_renderer: PointRenderer,
    /// Mount whose static data is currently on the GPU.
    prepared: Option<MountToken>,
}

impl Renderer {
    pub async fn new(window: &impl Window) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::PRIMARY);
        let surface = unsafe { instance.create_surface(window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No adapter found")?;

        let surface_format = surface
            .get_preferred_format(&adapter)
            .context("No preferred format found")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .context("No device found")?;

        let mesh_renderer = MeshRendererBuilder::new()
            .color_target_format(surface_format)
            .depth_format(DEPTH_TEXTURE_FORMAT)
            .build(&device)?;

        let point_renderer = PointRendererBuilder::new()
            .color_target_format(surface_format)
            .depth_format(DEPTH_TEXTURE_FORMAT)
            .build(&device)?;

        let mut renderer = Self {
            surface,
            surface_format,
            device,
            queue,
            viewport: Viewport::default(),
            depth_view: None,
            mesh_renderer,
            point_renderer,
            prepared: None,
        };
        renderer.resize(window.viewport());

        Ok(renderer)
    }

    fn configure_surface(&self) {
        self.surface.configure(
            &self.device,
            &wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format: self.surface_format,
                width: self.viewport.width,
                height: self.viewport.height,
                present_mode: wgpu::PresentMode::Fifo,
            },
        )
    }

    /// An empty viewport (minimised window) suspends drawing until the next
    /// non-empty resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if viewport.is_empty() {
            self.depth_view = None;
            return;
        }
        self.configure_surface();

        let depth_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: viewport.width,
                height: viewport.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        });
        // The view keeps the texture alive.
        self.depth_view = Some(depth_texture.create_view(&Default::default()));
    }

    fn prepare(&mut self, token: MountToken, scene: &Scene) {
        debug!(
            "Preparing GPU resources for {} (generation {})",
            scene.skin(),
            token.generation()
        );
        self.mesh_renderer.prepare(&self.device, scene);
        self.point_renderer.prepare(&self.device, scene);
        self.prepared = Some(token);
    }

    fn render(&mut self, scene: &Scene, elapsed: f32) {
        let depth_view = match &self.depth_view {
            Some(depth_view) => depth_view,
            None => return,
        };

        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Reconfiguring surface: {}", err);
                self.configure_surface();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring the next surface texture, skipping frame");
                return;
            }
            Err(err) => {
                error!("Failed to acquire the next surface texture: {}", err);
                return;
            }
        };
        let surface_texture_view = surface_texture.texture.create_view(&Default::default());

        self.mesh_renderer.update(&self.queue, scene, elapsed);
        self.point_renderer.update(&self.queue, scene);

        let background = scene.background();
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Command Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.r as f64,
                            g: background.g as f64,
                            b: background.b as f64,
                            a: background.a as f64,
                        }),
                        store: true,
                    },
                }],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: false,
                    }),
                    stencil_ops: None,
                }),
            });
            self.mesh_renderer.draw_opaque(&mut rpass);
            self.point_renderer.draw(&mut rpass);
            self.mesh_renderer.draw_translucent(&mut rpass);
        }

        self.queue.submit(Some(encoder.finish()));
        surface_texture.present();
    }
}

impl DisplaySink for Renderer {
    fn present(&mut self, frame: &Frame<'_>) {
        if self.prepared != Some(frame.token) {
            self.prepare(frame.token, frame.scene);
        }
        self.render(frame.scene, frame.tick.elapsed);
    }

    fn release(&mut self) {
        self.mesh_renderer.release();
        self.point_renderer.release();
        self.prepared = None;
    }
}
