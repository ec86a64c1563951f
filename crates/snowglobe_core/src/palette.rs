//! Colours and per-category depth tables
//!
//! Category lookups are exhaustive `match` functions, so adding a category
//! without a colour or scale fails to compile.

use serde::{Deserialize, Serialize};
use snowglobe_physics::Category;

/// sRGB-encoded RGBA in [0, 1], as handed to the GPU
pub type Rgba = [f32; 4];

/// Pale goldenrod, the star colour
pub const PALE_GOLDENROD: Rgba = [0.933_333, 0.909_804, 0.666_667, 1.0];
/// Centre colour of the sky gradient
pub const DARK_ORANGE: Rgba = [1.0, 0.549_020, 0.0, 1.0];
/// Outer colour of the sky gradient
pub const MIDNIGHT_BLUE: Rgba = [0.098_039, 0.098_039, 0.439_216, 1.0];
/// Hue (degrees), saturation and lightness (percent)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Multiply each channel by its own factor
    ///
    /// Hue wraps around the colour wheel; saturation and lightness clamp
    /// to [0, 100].
    pub fn jittered(self, hue_factor: f32, saturation_factor: f32, lightness_factor: f32) -> Self {
        Self {
            h: (self.h * hue_factor).rem_euclid(360.0),
            s: (self.s * saturation_factor).clamp(0.0, 100.0),
            l: (self.l * lightness_factor).clamp(0.0, 100.0),
        }
    }

    /// Convert to opaque RGBA
    pub fn to_rgba(self) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            return [l, l, l, 1.0];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        [
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            1.0,
        ]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Base colour of a category
pub fn base_color(category: Category) -> Hsl {
    match category {
        Category::Passive => Hsl::new(0.0, 0.0, 0.0),
        Category::Terrain => Hsl::new(0.0, 0.0, 0.0),
        Category::Front => Hsl::new(227.0, 19.0, 85.0),
        Category::Middle => Hsl::new(236.0, 25.0, 75.0),
        Category::Back => Hsl::new(207.0, 24.0, 66.0),
    }
}

/// Size factor of a category; further layers are smaller
pub fn depth_scale(category: Category) -> f32 {
    match category {
        Category::Passive => 0.0,
        Category::Terrain => 0.0,
        Category::Front => 1.0,
        Category::Middle => 0.6,
        Category::Back => 0.3,
    }
}
