//! Collision detection and response
//!
//! Everything is axis-aligned boxes. The player only lands on a platform
//! while falling and while the top of their box is still above the platform's
//! top edge, so platforms can be jumped through from below.

use glam::Vec2;

use super::particles::BurstKind;
use super::state::{GameEvent, GameState, Platform, Player};
use crate::Rect;

/// Would the player land on this platform this tick?
pub fn lands_on(player: &Player, platform: &Platform) -> bool {
    platform.is_solid()
        && player.rect().overlaps(&platform.rect())
        && player.vel.y > 0.0
        && player.pos.y < platform.pos.y
}

/// Resolve player/platform contacts: bounce, break breakables, spawn dust.
///
/// Returns the number of landings (normally 0 or 1).
pub fn resolve_platform_collisions(state: &mut GameState) -> usize {
    state.player.on_ground = false;
    let jump = state.jump_impulse();

    let mut bursts: Vec<(BurstKind, Vec2)> = Vec::new();
    let mut landings = 0;

    for platform in &mut state.platforms {
        if !lands_on(&state.player, platform) {
            continue;
        }

        let player = &mut state.player;
        player.vel.y = -jump;
        player.pos.y = platform.pos.y - player.size.y;
        player.on_ground = true;
        landings += 1;

        let top_center = Vec2::new(platform.rect().center_x(), platform.pos.y);
        state.events.push(GameEvent::Jumped {
            x: top_center.x,
            y: top_center.y,
        });
        bursts.push((BurstKind::Jump, top_center));

        if platform.break_apart() {
            state.events.push(GameEvent::PlatformBroke {
                platform_id: platform.id,
            });
            bursts.push((BurstKind::Break, top_center));
        }
    }

    for (kind, origin) in bursts {
        state.burst(kind, origin);
    }

    landings
}

/// Collect every uncollected coin overlapping the player.
///
/// Returns the number of coins picked up this tick.
pub fn collect_coins(state: &mut GameState) -> u64 {
    let player_rect: Rect = state.player.rect();
    let mut picked = Vec::new();

    for coin in &mut state.coins {
        if coin.collected || !player_rect.overlaps(&coin.rect()) {
            continue;
        }
        coin.collected = true;
        picked.push((coin.id, Vec2::new(coin.rect().center_x(), coin.rect().center_y())));
    }

    for &(coin_id, center) in &picked {
        state.coins_collected += 1;
        state.events.push(GameEvent::CoinCollected { coin_id });
        state.burst(BurstKind::Coin, center);
    }

    picked.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, PlatformKind};
    use crate::{Tuning, Viewport};

    /// A state with a single platform under a falling player
    fn landing_setup(kind: PlatformKind) -> GameState {
        let mut state = GameState::new(1, Viewport::new(400.0, 700.0), Tuning::default());
        state.coins.clear();
        state.platforms = vec![Platform::new(99, Vec2::new(100.0, 400.0), kind)];
        state.player.pos = Vec2::new(120.0, 355.0);
        state.player.vel = Vec2::new(0.0, 6.0);
        state
    }

    #[test]
    fn test_land_on_normal_platform() {
        let mut state = landing_setup(PlatformKind::Normal);
        assert_eq!(resolve_platform_collisions(&mut state), 1);
        assert_eq!(state.player.vel.y, -15.0);
        assert!(state.player.on_ground);
        assert_eq!(state.player.pos.y, 400.0 - 50.0);
        assert_eq!(state.particles.len(), 8);
        assert!(matches!(state.events[0], GameEvent::Jumped { x, y } if x == 160.0 && y == 400.0));
        assert!(!state.platforms[0].broken);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let mut state = landing_setup(PlatformKind::Normal);
        state.player.vel.y = -3.0;
        assert_eq!(resolve_platform_collisions(&mut state), 0);
        assert!(!state.player.on_ground);
        assert_eq!(state.player.pos.y, 355.0);
    }

    #[test]
    fn test_no_landing_from_below() {
        let mut state = landing_setup(PlatformKind::Normal);
        // Player's top is already below the platform's top edge
        state.player.pos.y = 405.0;
        assert_eq!(resolve_platform_collisions(&mut state), 0);
    }

    #[test]
    fn test_landing_scales_with_speed_multiplier() {
        let mut state = landing_setup(PlatformKind::Normal);
        state.speed_multiplier = 1.5;
        resolve_platform_collisions(&mut state);
        assert_eq!(state.player.vel.y, -22.5);
    }

    #[test]
    fn test_breakable_breaks_once_and_stops_catching() {
        let mut state = landing_setup(PlatformKind::Breakable);
        assert_eq!(resolve_platform_collisions(&mut state), 1);
        assert!(state.platforms[0].broken);
        assert_eq!(state.platforms[0].break_timer, 1);
        assert_eq!(state.particles.len(), 8 + 12);
        assert!(state
            .events
            .contains(&GameEvent::PlatformBroke { platform_id: 99 }));

        // Falling onto it again goes straight through
        state.player.pos.y = 355.0;
        state.player.vel.y = 6.0;
        assert_eq!(resolve_platform_collisions(&mut state), 0);
        assert!(state.platforms[0].broken);
    }

    #[test]
    fn test_collect_coin() {
        let mut state = landing_setup(PlatformKind::Normal);
        let platform = state.platforms[0].clone();
        state.coins.push(Coin::above(7, &platform));
        state.player.pos = Vec2::new(140.0, 360.0);

        assert_eq!(collect_coins(&mut state), 1);
        assert!(state.coins[0].collected);
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.particles.len(), 10);
        assert_eq!(state.events, vec![GameEvent::CoinCollected { coin_id: 7 }]);

        // Already collected: nothing happens
        assert_eq!(collect_coins(&mut state), 0);
        assert_eq!(state.coins_collected, 1);
    }
}
