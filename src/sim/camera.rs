//! One-directional scrolling camera

use serde::{Deserialize, Serialize};

/// Vertical view offset. Smaller y is higher up; the camera only ever moves up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub y: f32,
}

impl Camera {
    /// Follow the player, keeping them `lead` of the canvas height below the top.
    ///
    /// Returns true if the camera moved.
    pub fn follow(&mut self, player_y: f32, canvas_height: f32, lead: f32) -> bool {
        let target = player_y - canvas_height * lead;
        if target < self.y {
            self.y = target;
            true
        } else {
            false
        }
    }

    /// Convert a world y to a screen y
    #[inline]
    pub fn to_screen(&self, world_y: f32) -> f32 {
        world_y - self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_moves_up_only() {
        let mut camera = Camera::default();
        // Player low on screen: target 500 - 420 = 80, below the camera
        assert!(!camera.follow(500.0, 700.0, 0.6));
        assert_eq!(camera.y, 0.0);

        assert!(camera.follow(300.0, 700.0, 0.6));
        assert!((camera.y + 120.0).abs() < 1e-3);
        let top = camera.y;

        // Falling back down never scrolls down
        assert!(!camera.follow(900.0, 700.0, 0.6));
        assert_eq!(camera.y, top);
    }

    #[test]
    fn test_to_screen() {
        let camera = Camera { y: -250.0 };
        assert_eq!(camera.to_screen(-200.0), 50.0);
    }
}
