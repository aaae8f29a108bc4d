//! Rendering module
//!
//! Frame building is pure: [`build_frame`] turns a `&GameState` into a flat
//! list of [`DrawCmd`]s. The Canvas 2D backend (wasm only) executes that list;
//! everything above it is testable natively.

pub mod background;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use scene::build_frame;

use glam::Vec2;

use crate::Rect;
use crate::assets::ImageAsset;

/// 8-bit RGB color with float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GOLD: Rgba = Rgba::hex(0xFFD700);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Fill style for rectangles
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Top-to-bottom gradient across the rect; stops are `(offset, color)`
    VerticalGradient(Vec<(f32, Rgba)>),
}

/// Canvas shadow used as a glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

/// One drawing operation in screen space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole canvas
    Clear,
    FillRect {
        rect: Rect,
        paint: Paint,
        alpha: f32,
        glow: Option<Glow>,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        line_width: f32,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        alpha: f32,
        glow: Option<Glow>,
    },
    /// Draw an image, or a sub-rect of it (`src`) for sprite sheets
    Image {
        asset: ImageAsset,
        src: Option<Rect>,
        dest: Rect,
        alpha: f32,
        /// Flip horizontally around the destination rect
        mirrored: bool,
        /// Pixel-art sprites are drawn unsmoothed
        smoothing: bool,
        glow: Option<Glow>,
    },
}

/// Per-frame render knobs derived from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub star_count: usize,
    pub dust_count: usize,
    /// Draw gameplay particles
    pub particles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            star_count: 150,
            dust_count: 30,
            particles: true,
        }
    }
}

/// Read-only view of which images are ready to draw
pub trait AssetView {
    /// Natural size of a loaded image, `None` if it is missing or failed
    fn image_size(&self, asset: ImageAsset) -> Option<(f32, f32)>;
}

/// No images at all; everything is drawn with fallbacks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetView for NoAssets {
    fn image_size(&self, _asset: ImageAsset) -> Option<(f32, f32)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_helpers() {
        assert_eq!(Rgba::hex(0x64ff64), Rgba::rgb(100, 255, 100));
        assert_eq!(Rgba::GOLD, Rgba::rgb(255, 215, 0));
        assert_eq!(
            Rgba::rgba(200, 200, 255, 0.4).to_css(),
            "rgba(200, 200, 255, 0.4)"
        );
        assert_eq!(Rgba::WHITE.with_alpha(0.5).a, 0.5);
    }
}
