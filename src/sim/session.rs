//! Session state machine
//!
//! `Start -> Playing -> GameOver -> Playing (restart) | Start (exit)`.
//! Game over itself is reached from inside the tick.

use super::state::{GamePhase, GameState};

/// Explicit user actions that move the session between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// "Start Game" on the title screen
    StartGame,
    /// "Play Again" on the game-over screen
    Restart,
    /// "Exit" on the game-over screen, after the player confirmed
    ExitToMenu,
}

/// Apply a command. Returns false (and changes nothing) if the command is not
/// valid in the current phase.
pub fn apply(state: &mut GameState, command: SessionCommand) -> bool {
    match (command, state.phase) {
        (SessionCommand::StartGame, GamePhase::Start) => {
            state.reset_run();
            state.phase = GamePhase::Playing;
            log::info!("Game started!");
            true
        }
        (SessionCommand::Restart, GamePhase::GameOver) => {
            state.reset_run();
            state.phase = GamePhase::Playing;
            log::info!("Game restarted!");
            true
        }
        (SessionCommand::ExitToMenu, GamePhase::GameOver) => {
            state.clear_progress();
            state.phase = GamePhase::Start;
            log::info!("Returned to main menu");
            true
        }
        (command, phase) => {
            log::warn!("Ignoring {:?} while in {:?}", command, phase);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{TickInput, tick};
    use crate::{Tuning, Viewport};

    fn new_state() -> GameState {
        GameState::new(2024, Viewport::new(400.0, 700.0), Tuning::default())
    }

    /// Play until the astronaut falls out (no input, platforms removed)
    fn play_to_game_over(state: &mut GameState) {
        state.platforms.clear();
        for _ in 0..1000 {
            tick(state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                return;
            }
        }
        panic!("never reached game over");
    }

    #[test]
    fn test_valid_transitions() {
        let mut state = new_state();
        assert!(apply(&mut state, SessionCommand::StartGame));
        assert_eq!(state.phase, GamePhase::Playing);

        play_to_game_over(&mut state);
        assert!(apply(&mut state, SessionCommand::Restart));
        assert_eq!(state.phase, GamePhase::Playing);

        play_to_game_over(&mut state);
        assert!(apply(&mut state, SessionCommand::ExitToMenu));
        assert_eq!(state.phase, GamePhase::Start);

        assert!(apply(&mut state, SessionCommand::StartGame));
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut state = new_state();
        assert!(!apply(&mut state, SessionCommand::Restart));
        assert!(!apply(&mut state, SessionCommand::ExitToMenu));
        assert_eq!(state.phase, GamePhase::Start);

        apply(&mut state, SessionCommand::StartGame);
        assert!(!apply(&mut state, SessionCommand::StartGame));
        assert!(!apply(&mut state, SessionCommand::ExitToMenu));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = new_state();
        apply(&mut state, SessionCommand::StartGame);
        state.coins_collected = 12;
        state.score = 240;
        state.speed_multiplier = 1.2;
        state.camera.y = -5000.0;
        play_to_game_over(&mut state);
        assert_eq!(state.score, 240);

        assert!(apply(&mut state, SessionCommand::Restart));
        assert_eq!(state.score, 0);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.speed_multiplier, 1.0);
        assert!(state.particles.is_empty());
        assert_eq!(state.camera.y, 0.0);
        assert_eq!(state.player.pos.y, 500.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.platforms.len(), 30);
        for (i, p) in state.platforms.iter().enumerate() {
            assert_eq!(p.pos.y, 600.0 - i as f32 * 100.0);
            assert!(p.pos.x >= 0.0 && p.pos.x <= 280.0);
        }
        // Only coins generated with the fresh platform set remain
        assert!(state.coins.iter().all(|c| !c.collected));
        assert!(state.coins.len() <= 29);
    }

    #[test]
    fn test_exit_keeps_title_screen_clean() {
        let mut state = new_state();
        apply(&mut state, SessionCommand::StartGame);
        state.coins_collected = 2;
        play_to_game_over(&mut state);
        assert!(apply(&mut state, SessionCommand::ExitToMenu));
        assert_eq!(state.score, 0);
        assert_eq!(state.coins_collected, 0);
        assert!(state.coins.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.camera.y, 0.0);
    }
}
