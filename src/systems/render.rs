//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Backdrop, shape and sprite pipelines
//! - Overlay image loading
//! - Frame rendering

use std::path::Path;
use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};
use snowglobe_core::palette::{DARK_ORANGE, MIDNIGHT_BLUE};
use snowglobe_core::Scene;
use snowglobe_render::{
    context::{ContextError, RenderContext},
    pipeline::{
        BackdropPipeline, RadialGradient, ShapePipeline, Sprite, SpriteImage, SpritePipeline,
        SpriteRect, ViewUniforms,
    },
    RenderOptions, SceneGeometry,
};
use crate::config::{AppConfig, OverlayConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// The GPU context could not be created
    Context(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "GPU setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    backdrop_pipeline: BackdropPipeline,
    shape_pipeline: ShapePipeline,
    sprite_pipeline: SpritePipeline,
    overlays: Vec<Sprite>,
    options: RenderOptions,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, config.window.vsync))?;
        let format = context.config.format;

        let backdrop_pipeline = BackdropPipeline::new(&context.device, format);
        let shape_pipeline = ShapePipeline::new(&context.device, format);
        let sprite_pipeline = SpritePipeline::new(&context.device, format);

        let canvas = (config.scene.width, config.scene.height);
        let gradient = RadialGradient {
            center: config.rendering.backdrop_center,
            inner_color: DARK_ORANGE,
            outer_color: MIDNIGHT_BLUE,
            outer_stop: config.rendering.backdrop_outer_stop,
        };

        let view = ViewUniforms::new(canvas.0, canvas.1);
        shape_pipeline.update_view(&context.queue, &view);
        sprite_pipeline.update_view(&context.queue, &view);
        backdrop_pipeline.update_uniforms(&context.queue, &gradient.uniforms(canvas.0, canvas.1));

        let overlays = load_overlays(&context, &sprite_pipeline, &config.overlays);

        Ok(Self {
            context,
            backdrop_pipeline,
            shape_pipeline,
            sprite_pipeline,
            overlays,
            options: RenderOptions {
                show_colliders: config.debug.show_colliders,
                line_width: config.rendering.line_width,
                ..RenderOptions::default()
            },
        })
    }

    /// Handle window resize
    ///
    /// The canvas always fills the surface, so only the surface changes.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.context.resize(size);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Toggle collider outlines, returning the new state
    pub fn toggle_colliders(&mut self) -> bool {
        self.options.show_colliders = !self.options.show_colliders;
        self.options.show_colliders
    }

    /// Render a single frame
    pub fn render_frame(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let geometry = SceneGeometry::from_scene(scene, &self.options);
        self.shape_pipeline
            .upload(&self.context.device, &self.context.queue, &geometry.vertices);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b, a] = MIDNIGHT_BLUE;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.backdrop_pipeline.render(&mut render_pass);
            self.shape_pipeline.render(&mut render_pass);
            self.sprite_pipeline.render(&mut render_pass, &self.overlays);
        }

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }
}

/// Decode and upload every overlay image that can be read
fn load_overlays(
    context: &RenderContext,
    pipeline: &SpritePipeline,
    config: &OverlayConfig,
) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(config.images.len());
    for overlay in &config.images {
        let image = match load_rgba(&overlay.path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Skipping overlay '{}': {}", overlay.path, e);
                continue;
            }
        };

        let (width, height) = image.dimensions();
        let rect = SpriteRect::fitted(overlay.left, overlay.top, width, height, config.max_width);
        sprites.push(pipeline.create_sprite(
            &context.device,
            &context.queue,
            &overlay.path,
            SpriteImage {
                rgba: image.as_raw(),
                width,
                height,
            },
            rect,
        ));
        log::debug!("Loaded overlay '{}' ({}x{})", overlay.path, width, height);
    }
    sprites
}

/// Read an image file as 8-bit RGBA
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<image::RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
        assert_eq!(
            format!("{}", RenderError::from(ContextError::NoAdapter)),
            "GPU setup failed: No compatible GPU adapter found"
        );
    }

    #[test]
    fn test_missing_overlay_is_an_error() {
        assert!(load_rgba("assets/does_not_exist.png").is_err());
    }

    #[test]
    fn test_bundled_overlays_decode() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        for name in ["cottage.png", "trees.png"] {
            let image = load_rgba(root.join("assets").join(name)).unwrap();
            assert!(image.width() > 0 && image.height() > 0);
        }
    }
}
