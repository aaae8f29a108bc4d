//! Fixed-step simulation tick
//!
//! One tick per animation frame. The tick order matters: physics first, then
//! world upkeep, camera, collisions, score, difficulty, game over and finally
//! frontier generation.

use super::collision::{collect_coins, resolve_platform_collisions};
use super::particles::update_particles;
use super::state::{Facing, GameEvent, GamePhase, GameState};
use super::world::extend_frontier;
use crate::consts::TICK_MS;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (takes precedence when both are held)
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Idle/demo mode - autopilot steers
    pub idle_mode: bool,
}

/// Advance the game state by one tick. Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let input = if input.idle_mode {
        super::autopilot::steer(state)
    } else {
        *input
    };

    state.time_ticks += 1;

    update_player(state, &input);
    update_platforms(state);
    update_coins(state);
    update_particles(&mut state.particles, state.tuning.particle_gravity);

    let (lead, height) = (state.tuning.camera_lead, state.viewport.height);
    state.camera.follow(state.player.pos.y, height, lead);

    resolve_platform_collisions(state);
    collect_coins(state);
    update_score(state);
    update_difficulty(state);

    if check_game_over(state) {
        return;
    }

    extend_frontier(state);
}

/// Steering, gravity, integration, wrap-around and the run cycle
fn update_player(state: &mut GameState, input: &TickInput) {
    let gravity = state.gravity();
    let speed = state.tuning.player_speed;
    let friction = state.tuning.friction;
    let width = state.viewport.width;
    let player = &mut state.player;

    if input.left {
        player.vel.x = -speed;
        player.facing = Facing::Left;
    } else if input.right {
        player.vel.x = speed;
        player.facing = Facing::Right;
    } else {
        player.vel.x *= friction;
    }

    player.vel.y += gravity;
    player.pos += player.vel;
    player.wrap(width);
    player.animate();
}

/// Slide/drop platforms, then cull those far below the view
fn update_platforms(state: &mut GameState) {
    let width = state.viewport.width;
    for platform in &mut state.platforms {
        platform.step(width, &state.tuning);
    }

    let cutoff = state.view_bottom() + state.tuning.cull_margin;
    state.platforms.retain(|p| p.pos.y < cutoff);
}

/// Animate coins, then drop collected and scrolled-out ones
fn update_coins(state: &mut GameState) {
    let time_ms = state.time_ticks as f64 * TICK_MS;
    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        coin.animate(time_ms);
    }

    let cutoff = state.view_bottom() + state.tuning.cull_margin;
    state.coins.retain(|c| !c.collected && c.pos.y < cutoff);
}

/// Score is derived from coins; announce increases only
fn update_score(state: &mut GameState) {
    let score = state.coins_collected * state.tuning.points_per_coin;
    if score > state.score {
        state.events.push(GameEvent::ScoreIncreased { score });
    }
    state.score = score;
}

/// Gravity and jump impulse scale with the speed multiplier
fn update_difficulty(state: &mut GameState) {
    let multiplier = state.tuning.speed_multiplier(state.score);
    if multiplier != state.speed_multiplier {
        log::info!("Speed multiplier {:.1}x at score {}", multiplier, state.score);
    }
    state.speed_multiplier = multiplier;
}

/// Falling out of the bottom of the view ends the run
fn check_game_over(state: &mut GameState) -> bool {
    if state.player.pos.y > state.view_bottom() + state.tuning.game_over_margin {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over! Final score: {}", state.score);
        true
    } else {
        false
    }
}
