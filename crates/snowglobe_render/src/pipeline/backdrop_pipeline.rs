//! Backdrop pipeline for the sky gradient
//!
//! Draws a single full-screen triangle whose fragment shader evaluates a
//! circular radial gradient sized to the farthest canvas corner.

use wgpu::util::DeviceExt;

use super::shape_pipeline::view_bind_group_layout;
use super::types::BackdropUniforms;

/// A two-stop circular gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    /// Centre as a fraction of the canvas size (may lie outside the canvas)
    pub center: [f32; 2],
    /// Colour at the centre
    pub inner_color: [f32; 4],
    /// Colour at and beyond the outer stop
    pub outer_color: [f32; 4],
    /// Outer stop as a fraction of the farthest-corner distance
    pub outer_stop: f32,
}

impl RadialGradient {
    /// Shader uniforms for a canvas of the given size
    pub fn uniforms(&self, width: f32, height: f32) -> BackdropUniforms {
        let center = [self.center[0] * width, self.center[1] * height];
        BackdropUniforms {
            canvas_size: [width, height],
            center,
            inner_color: self.inner_color,
            outer_color: self.outer_color,
            radius: farthest_corner_radius(center, width, height),
            outer_stop: self.outer_stop.max(f32::EPSILON),
            _padding: [0.0; 2],
        }
    }
}

/// Distance from `center` to the farthest corner of a `width` x `height` box
pub fn farthest_corner_radius(center: [f32; 2], width: f32, height: f32) -> f32 {
    let dx = center[0].max(width - center[0]);
    let dy = center[1].max(height - center[1]);
    (dx * dx + dy * dy).sqrt()
}

/// Render pipeline for the full-screen gradient
pub struct BackdropPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl BackdropPipeline {
    /// Create a new backdrop pipeline
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = view_bind_group_layout(device, "Backdrop Bind Group Layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Backdrop Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Backdrop Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/backdrop.wgsl").into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Backdrop Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Backdrop Uniform Buffer"),
            contents: bytemuck::bytes_of(&BackdropUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Backdrop Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    /// Update gradient parameters
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &BackdropUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Draw the gradient into an open render pass
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farthest_corner_below_canvas() {
        // Centre at (50%, 150%) of a 400 x 800 canvas: the top corners are farthest
        let radius = farthest_corner_radius([200.0, 1200.0], 400.0, 800.0);
        assert!((radius - (200.0f32 * 200.0 + 1200.0 * 1200.0).sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_farthest_corner_centered() {
        let radius = farthest_corner_radius([2.0, 2.0], 4.0, 4.0);
        assert!((radius - 8.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_uniforms() {
        let gradient = RadialGradient {
            center: [0.5, 1.5],
            inner_color: [1.0, 0.5, 0.0, 1.0],
            outer_color: [0.1, 0.1, 0.4, 1.0],
            outer_stop: 0.7,
        };
        let uniforms = gradient.uniforms(400.0, 800.0);
        assert_eq!(uniforms.center, [200.0, 1200.0]);
        assert_eq!(uniforms.canvas_size, [400.0, 800.0]);
        assert_eq!(uniforms.outer_stop, 0.7);
    }
}
