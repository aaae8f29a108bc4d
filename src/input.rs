//! Pressed-key map
//!
//! DOM handlers (keyboard, touch and mouse on the on-screen arrows) only flip
//! entries in this map. The frame loop samples it once per tick into a
//! [`TickInput`], so event timing never leaks into the simulation.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Key codes (`KeyboardEvent.code`) that steer left
pub const LEFT_CODES: [&str; 2] = ["ArrowLeft", "KeyA"];
/// Key codes that steer right
pub const RIGHT_CODES: [&str; 2] = ["ArrowRight", "KeyD"];

/// On-screen direction buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
}

impl TouchButton {
    /// The on-screen buttons behave exactly like the arrow keys
    pub fn code(self) -> &'static str {
        match self {
            TouchButton::Left => "ArrowLeft",
            TouchButton::Right => "ArrowRight",
        }
    }

    /// DOM id of the button element
    pub fn element_id(self) -> &'static str {
        match self {
            TouchButton::Left => "leftBtn",
            TouchButton::Right => "rightBtn",
        }
    }
}

/// Currently held key codes
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<String>,
    /// Autopilot toggle (demo mode)
    pub idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.pressed.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    pub fn button(&mut self, button: TouchButton, down: bool) {
        if down {
            self.key_down(button.code());
        } else {
            self.key_up(button.code());
        }
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    /// Release everything (focus loss, restart)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Sample the map for one tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: LEFT_CODES.iter().any(|c| self.is_down(c)),
            right: RIGHT_CODES.iter().any(|c| self.is_down(c)),
            idle_mode: self.idle_mode,
        }
    }
}
