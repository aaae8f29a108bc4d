//! Data-driven game balance
//!
//! Defaults reproduce the classic feel. A partial JSON document overrides only
//! the fields it names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Base gravity (px/tick²), scaled by the speed multiplier
    pub gravity: f32,
    /// Base jump impulse magnitude (px/tick), scaled by the speed multiplier
    pub jump_force: f32,
    /// Horizontal speed while a direction is held
    pub player_speed: f32,
    /// Horizontal velocity retained per tick with no input
    pub friction: f32,

    // === World generation ===
    /// Vertical distance between consecutive platforms
    pub platform_spacing: f32,
    /// Platforms generated at session start (including the start platform)
    pub initial_platforms: u32,
    /// Indices up to this value are always normal platforms
    pub safe_platforms: u32,
    /// Roll below this is a breakable platform
    pub breakable_threshold: f32,
    /// Roll below this (and not breakable) is a moving platform
    pub moving_threshold: f32,
    /// Chance a new platform carries a coin
    pub coin_chance: f32,
    /// Moving platform speed range: min + U[0,1) * range
    pub moving_speed_min: f32,
    pub moving_speed_range: f32,
    /// Generate more when the player is within this distance of the top platform
    pub frontier_margin: f32,
    /// Platforms per frontier batch
    pub frontier_batch: u32,

    // === Breakable platforms ===
    /// Ticks a broken platform hangs before falling
    pub break_delay_ticks: u32,
    /// Fall speed of a broken platform (px/tick)
    pub break_fall_speed: f32,

    // === Scoring / difficulty ===
    pub points_per_coin: u64,
    /// Points per difficulty step
    pub speed_step_points: u64,
    /// Multiplier gained per step
    pub speed_step: f32,
    pub max_speed_multiplier: f32,

    // === Camera / culling ===
    /// Camera keeps the player this fraction of the canvas height from the top
    pub camera_lead: f32,
    /// Game over once the player is this far below the visible window
    pub game_over_margin: f32,
    /// Entities this far below the visible window are dropped
    pub cull_margin: f32,

    // === Particles ===
    pub particle_gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_force: 15.0,
            player_speed: 7.0,
            friction: 0.8,

            platform_spacing: 100.0,
            initial_platforms: 30,
            safe_platforms: 5,
            breakable_threshold: 0.1,
            moving_threshold: 0.2,
            coin_chance: 0.3,
            moving_speed_min: 1.0,
            moving_speed_range: 1.2,
            frontier_margin: 2000.0,
            frontier_batch: 15,

            break_delay_ticks: 30,
            break_fall_speed: 5.0,

            points_per_coin: 20,
            speed_step_points: 100,
            speed_step: 0.1,
            max_speed_multiplier: 2.0,

            camera_lead: 0.6,
            game_over_margin: 100.0,
            cull_margin: 200.0,

            particle_gravity: 0.2,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Speed multiplier for a score: +`speed_step` every `speed_step_points`, capped
    pub fn speed_multiplier(&self, score: u64) -> f32 {
        let steps = score.checked_div(self.speed_step_points).unwrap_or(0);
        (1.0 + steps as f32 * self.speed_step).min(self.max_speed_multiplier)
    }
}
