//! GPU-compatible data types for the 2D pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// A flat-coloured vertex in canvas space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    /// Position in canvas units (x right, y down)
    pub position: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
}

impl ShapeVertex {
    /// Create a new shape vertex
    pub fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// A textured vertex in canvas space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    /// Position in canvas units
    pub position: [f32; 2],
    /// Texture coordinate
    pub uv: [f32; 2],
}

/// Canvas-to-clip transform shared by the shape and sprite shaders
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ViewUniforms {
    /// Canvas width and height in canvas units
    pub canvas_size: [f32; 2],
    /// Padding to align to 16 bytes
    pub _padding: [f32; 2],
}

impl ViewUniforms {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            canvas_size: [width, height],
            _padding: [0.0; 2],
        }
    }
}

impl Default for ViewUniforms {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Radial gradient parameters for the backdrop shader
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BackdropUniforms {
    /// Canvas width and height in canvas units
    pub canvas_size: [f32; 2],
    /// Gradient centre in canvas units
    pub center: [f32; 2],
    /// Colour at the centre
    pub inner_color: [f32; 4],
    /// Colour from the outer stop onward
    pub outer_color: [f32; 4],
    /// Distance that 100% of the gradient line maps to
    pub radius: f32,
    /// Fraction of the radius where the outer colour is reached
    pub outer_stop: f32,
    /// Padding to align to 16 bytes
    pub _padding: [f32; 2],
}

impl Default for BackdropUniforms {
    fn default() -> Self {
        Self {
            canvas_size: [1.0, 1.0],
            center: [0.5, 0.5],
            inner_color: [0.0, 0.0, 0.0, 1.0],
            outer_color: [0.0, 0.0, 0.0, 1.0],
            radius: 1.0,
            outer_stop: 1.0,
            _padding: [0.0; 2],
        }
    }
}

/// Placement of a sprite in canvas units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpriteRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Place an image at (`x`, `y`), shrunk to `max_width` keeping its aspect
    ///
    /// Images narrower than `max_width` keep their natural size.
    pub fn fitted(x: f32, y: f32, image_width: u32, image_height: u32, max_width: f32) -> Self {
        let (w, h) = (image_width as f32, image_height as f32);
        if w > max_width && w > 0.0 {
            Self::new(x, y, max_width, h * max_width / w)
        } else {
            Self::new(x, y, w, h)
        }
    }

    /// The six vertices of the quad (two triangles)
    pub fn vertices(&self) -> [SpriteVertex; 6] {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        let v = |x: f32, y: f32, u: f32, t: f32| SpriteVertex {
            position: [x, y],
            uv: [u, t],
        };
        [
            v(x0, y0, 0.0, 0.0),
            v(x0, y1, 0.0, 1.0),
            v(x1, y1, 1.0, 1.0),
            v(x0, y0, 0.0, 0.0),
            v(x1, y1, 1.0, 1.0),
            v(x1, y0, 1.0, 0.0),
        ]
    }
}
