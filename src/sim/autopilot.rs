//! Idle/demo mode - a simple autopilot that plays the game
//!
//! While rising it lines up under the highest platform it can still reach at
//! the top of the jump; while falling it lines up over the next platform below.

use super::state::GameState;
use super::tick::TickInput;

/// Horizontal slack before the autopilot bothers to steer
const DEAD_ZONE: f32 = 10.0;

/// Pick a landing target and steer toward it
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let feet = player.pos.y + player.size.y;
    let gravity = state.gravity().max(f32::EPSILON);

    // Remaining climb if we are still rising: v² / 2g
    let apex = if player.vel.y < 0.0 {
        player.vel.y * player.vel.y / (2.0 * gravity)
    } else {
        0.0
    };
    let reach = feet - apex;

    let target = state
        .platforms
        .iter()
        .filter(|p| p.is_solid() && p.pos.y >= reach)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let Some(target) = target else {
        return TickInput::default();
    };

    let dx = target.rect().center_x() - player.rect().center_x();
    TickInput {
        left: dx < -DEAD_ZONE,
        right: dx > DEAD_ZONE,
        idle_mode: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::{SessionCommand, apply};
    use crate::sim::state::{GamePhase, Platform, PlatformKind};
    use crate::sim::tick::tick;
    use crate::{Tuning, Viewport};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(77, Viewport::new(400.0, 700.0), Tuning::default());
        apply(&mut state, SessionCommand::StartGame);
        state
    }

    #[test]
    fn test_steers_toward_platform_below() {
        let mut state = playing();
        state.platforms = vec![Platform::new(1, Vec2::new(0.0, 700.0), PlatformKind::Normal)];
        state.player.pos = Vec2::new(300.0, 500.0);
        state.player.vel = Vec2::new(0.0, 2.0);
        let input = steer(&state);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_holds_still_when_lined_up() {
        let mut state = playing();
        state.platforms = vec![Platform::new(1, Vec2::new(135.0, 700.0), PlatformKind::Normal)];
        state.player.pos = Vec2::new(170.0, 500.0);
        state.player.vel = Vec2::new(0.0, 2.0);
        assert_eq!(steer(&state), TickInput::default());
    }

    #[test]
    fn test_idle_mode_climbs() {
        let mut state = playing();
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &idle);
        }
        // Still alive and well above the start
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.camera.y < 0.0);
    }
}
