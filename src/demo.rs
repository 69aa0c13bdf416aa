use anyhow::{anyhow, Context};
use glam::{Quat, Vec3};

use crate::{client::Client, resize::DrawingSurface};

/// Sample client: clears the surface to a colour that slowly turns with time.
pub struct ClearClient {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    target: Box<dyn DrawingSurface>,
    rotation: f32,
}

impl ClearClient {
    #[cfg(target_arch = "wasm32")]
    pub async fn for_canvas(canvas: web_sys::HtmlCanvasElement) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface_from_canvas(&canvas)
            .context("failed to create surface from canvas")?;
        Self::new(&instance, surface, Box::new(canvas)).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn for_window(
        window: &winit::window::Window,
        target: crate::resize::SharedSize,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        // The window outlives the surface, the desktop host keeps it until exit
        let surface = unsafe { instance.create_surface(window) }
            .context("failed to create surface for window")?;
        Self::new(&instance, surface, Box::new(target)).await
    }

    async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface,
        target: Box<dyn DrawingSurface>,
    ) -> anyhow::Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("no compatible graphics adapter"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    // WebGL doesn't support all of wgpu's features
                    limits: if cfg!(target_arch = "wasm32") {
                        wgpu::Limits::downlevel_webgl2_defaults()
                    } else {
                        wgpu::Limits::default()
                    },
                    label: None,
                },
                None,
            )
            .await
            .context("failed to request graphics device")?;

        let format = surface
            .get_capabilities(&adapter)
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow!("surface reports no supported formats"))?;

        let (width, height) = target.surface_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            target,
            rotation: 0.0,
        })
    }

    fn reconfigure(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }
}

/// Rotates red towards green around the colour cube's centre.
fn clear_color(rotation: f32) -> wgpu::Color {
    let rgb = Quat::from_rotation_z(rotation) * Vec3::X * 0.5 + Vec3::splat(0.5);
    wgpu::Color {
        r: rgb.x as f64,
        g: rgb.y as f64,
        b: rgb.z as f64,
        a: 1.0,
    }
}

impl Client for ClearClient {
    fn start(&mut self) -> anyhow::Result<()> {
        let (width, height) = self.target.surface_size();
        self.reconfigure(width.max(1), height.max(1));
        log::info!(
            "clear client started at {}x{}",
            self.config.width,
            self.config.height
        );
        Ok(())
    }

    fn update(&mut self, dt: f32) {
        self.rotation += dt / 5.0;

        let (width, height) = self.target.surface_size();
        let changed = (width, height) != (self.config.width, self.config.height);
        if changed && width > 0 && height > 0 {
            self.reconfigure(width, height);
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => {
                self.reconfigure(self.config.width, self.config.height);
                return Ok(());
            }
            Err(e) => return Err(e).context("failed to acquire surface texture"),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });

        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(self.rotation)),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn clear_color_starts_red_and_turns() {
        let start = clear_color(0.0);
        assert!(close(start.r, 1.0) && close(start.g, 0.5) && close(start.b, 0.5));

        let quarter = clear_color(std::f32::consts::FRAC_PI_2);
        assert!(close(quarter.r, 0.5) && close(quarter.g, 1.0));
        assert_eq!(quarter.a, 1.0);
    }
}
