//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per animation frame
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod headless;
pub mod particles;
pub mod session;
pub mod state;
pub mod tick;
pub mod world;

pub use camera::Camera;
pub use collision::{collect_coins, lands_on, resolve_platform_collisions};
pub use headless::{Driver, RunSummary, run_session};
pub use particles::{BurstKind, spawn_burst, update_particles};
pub use session::{SessionCommand, apply};
pub use state::{
    Coin, Facing, GameEvent, GamePhase, GameState, Particle, Platform, PlatformKind, Player,
};
pub use tick::{TickInput, tick};
pub use world::{extend_frontier, generate_initial_platforms, generate_platform};

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::{Tuning, Viewport};

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>()).prop_map(|(left, right)| TickInput {
            left,
            right,
            idle_mode: false,
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn camera_never_scrolls_down(seed in any::<u64>(), inputs in prop::collection::vec(input_strategy(), 1..400)) {
            let mut state = GameState::new(seed, Viewport::new(400.0, 700.0), Tuning::default());
            apply(&mut state, SessionCommand::StartGame);
            let mut last = state.camera.y;
            for input in &inputs {
                tick(&mut state, input);
                prop_assert!(state.camera.y <= last);
                last = state.camera.y;
            }
        }

        #[test]
        fn score_tracks_coins_and_broken_never_reverts(seed in any::<u64>(), inputs in prop::collection::vec(input_strategy(), 1..400)) {
            let mut state = GameState::new(seed, Viewport::new(400.0, 700.0), Tuning::default());
            apply(&mut state, SessionCommand::StartGame);
            let mut broken_ids = std::collections::HashSet::new();
            for input in &inputs {
                tick(&mut state, input);
                prop_assert_eq!(state.score, state.coins_collected * 20);
                for p in &state.platforms {
                    if broken_ids.contains(&p.id) {
                        prop_assert!(p.broken);
                    }
                    if p.broken {
                        broken_ids.insert(p.id);
                    }
                }
            }
        }

        #[test]
        fn platforms_stay_on_canvas(seed in any::<u64>(), width in 200.0f32..400.0, inputs in prop::collection::vec(input_strategy(), 1..200)) {
            let mut state = GameState::new(seed, Viewport::new(width, 700.0), Tuning::default());
            let max_x = width - 120.0;
            for p in &state.platforms {
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= max_x);
            }
            apply(&mut state, SessionCommand::StartGame);
            for input in &inputs {
                tick(&mut state, input);
                for p in &state.platforms {
                    prop_assert!(p.pos.x >= 0.0 && p.pos.x <= max_x);
                }
            }
        }

        #[test]
        fn generated_platforms_follow_the_grid(seed in any::<u64>()) {
            let state = GameState::new(seed, Viewport::new(400.0, 700.0), Tuning::default());
            for (i, p) in state.platforms.iter().enumerate() {
                prop_assert_eq!(p.pos.y, 600.0 - i as f32 * 100.0);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 280.0);
            }
        }
    }
}
