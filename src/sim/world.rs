//! Procedural platform generation
//!
//! Platforms are laid out on a fixed vertical grid (`platform_spacing`) with a
//! uniformly random x. All randomness is drawn from the session RNG in a fixed
//! order per platform: archetype roll (unsafe indices only), x, direction,
//! speed, coin roll.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Platform, PlatformKind};
use crate::consts::*;

/// Pick an archetype from a uniform roll
pub fn kind_for_roll(roll: f32, breakable_threshold: f32, moving_threshold: f32) -> PlatformKind {
    if roll < breakable_threshold {
        PlatformKind::Breakable
    } else if roll < moving_threshold {
        PlatformKind::Moving
    } else {
        PlatformKind::Normal
    }
}

/// Create one platform at world height `y`.
///
/// `index` decides whether the platform may be special: indices up to
/// `safe_platforms` are always normal.
fn spawn_platform(state: &mut GameState, index: u32, y: f32) {
    let tuning = &state.tuning;
    let (safe, breakable_t, moving_t) = (
        tuning.safe_platforms,
        tuning.breakable_threshold,
        tuning.moving_threshold,
    );
    let (speed_min, speed_range, coin_chance) = (
        tuning.moving_speed_min,
        tuning.moving_speed_range,
        tuning.coin_chance,
    );

    let kind = if index > safe {
        let roll: f32 = state.rng.random();
        kind_for_roll(roll, breakable_t, moving_t)
    } else {
        PlatformKind::Normal
    };

    let max_x = (state.viewport.width - PLATFORM_WIDTH).max(0.0);
    let x = state.rng.random::<f32>() * max_x;
    let move_dir = if state.rng.random::<f32>() < 0.5 { -1.0 } else { 1.0 };
    let move_speed = speed_min + state.rng.random::<f32>() * speed_range;

    let id = state.next_entity_id();
    let mut platform = Platform::new(id, Vec2::new(x, y), kind);
    platform.move_dir = move_dir;
    platform.move_speed = move_speed;

    if state.rng.random::<f32>() < coin_chance {
        let coin_id = state.next_entity_id();
        state.coins.push(Coin::above(coin_id, &platform));
    }

    state.platforms.push(platform);
}

/// World height of the platform with the given index in the opening layout
pub fn platform_y(state: &GameState, index: u32) -> f32 {
    state.viewport.height - PLATFORM_BASE_OFFSET - index as f32 * state.tuning.platform_spacing
}

/// Generate the platform for `index` in the opening layout
pub fn generate_platform(state: &mut GameState, index: u32) {
    let y = platform_y(state, index);
    spawn_platform(state, index, y);
}

/// Lay out the opening platforms: a fixed start platform under the player,
/// then `initial_platforms - 1` generated ones going up
pub fn generate_initial_platforms(state: &mut GameState) {
    state.platforms.clear();
    state.coins.clear();

    let id = state.next_entity_id();
    let start = Platform::new(
        id,
        Vec2::new(
            state.viewport.width / 2.0 - PLATFORM_WIDTH / 2.0,
            state.viewport.height - PLATFORM_BASE_OFFSET,
        ),
        PlatformKind::Normal,
    );
    state.platforms.push(start);

    for index in 1..state.tuning.initial_platforms {
        generate_platform(state, index);
    }
}

/// Smallest platform y (the topmost platform), if any platform exists
pub fn topmost_platform_y(state: &GameState) -> Option<f32> {
    state.platforms.iter().map(|p| p.pos.y).reduce(f32::min)
}

/// Generate another batch once the player climbs within `frontier_margin` of
/// the topmost platform. Returns the number of platforms added.
pub fn extend_frontier(state: &mut GameState) -> u32 {
    let top = topmost_platform_y(state).unwrap_or(state.player.pos.y);
    if state.player.pos.y >= top + state.tuning.frontier_margin {
        return 0;
    }

    let spacing = state.tuning.platform_spacing;
    let batch = state.tuning.frontier_batch;
    // Batch-local index: the first `safe_platforms` of every batch are normal
    for i in 1..=batch {
        spawn_platform(state, i, top - i as f32 * spacing);
    }

    log::debug!("Generated {} platforms above y={}", batch, top);
    batch
}
