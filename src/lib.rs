//! Space Jump - An endless space jumping game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world generation, session)
//! - `renderer`: Stateless draw-command builder plus the Canvas 2D backend
//! - `assets`: Fixed asset registry and load tracking
//! - `input`: Pressed-key map sampled into per-frame snapshots
//! - `persistence`: LocalStorage access
//! - `settings` / `highscores`: Persisted preferences and best score
//! - `frame`: Mini-app manifest and embed metadata
//! - `audio`: Sound playback (wasm only)
//! - `tuning`: Data-driven game balance

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod frame;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Canvas width is capped so the game stays phone-shaped on desktop
    pub const MAX_CANVAS_WIDTH: f32 = 400.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Player spawns this far above the bottom of the canvas
    pub const PLAYER_SPAWN_OFFSET: f32 = 200.0;

    /// Platform box
    pub const PLATFORM_WIDTH: f32 = 120.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Start platform sits this far above the bottom of the canvas
    pub const PLATFORM_BASE_OFFSET: f32 = 100.0;

    /// Coin box, floating above its platform
    pub const COIN_SIZE: f32 = 30.0;
    pub const COIN_LIFT: f32 = 30.0;

    /// Sprite animation: ticks per frame and frames per cycle
    pub const ANIMATION_TICKS: u32 = 8;
    pub const ANIMATION_FRAMES: u32 = 4;

    /// Source frame sizes in the sprite sheets
    pub const ASTRONAUT_FRAME_SIZE: f32 = 238.0;
    pub const COIN_FRAME_SIZE: f32 = 124.0;

    /// Milliseconds per simulation tick (one tick per animation frame at 60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 512;
}

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport for a browser window, width capped to [`consts::MAX_CANVAS_WIDTH`]
    pub fn for_window(inner_width: f32, inner_height: f32) -> Self {
        Self {
            width: inner_width.min(consts::MAX_CANVAS_WIDTH),
            height: inner_height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(consts::MAX_CANVAS_WIDTH, 700.0)
    }
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test; touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Same rect moved by (dx, dy)
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap_excludes_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_viewport_caps_width() {
        let v = Viewport::for_window(1280.0, 800.0);
        assert_eq!(v.width, 400.0);
        assert_eq!(v.height, 800.0);
        assert_eq!(Viewport::for_window(360.0, 640.0).width, 360.0);
    }
}
