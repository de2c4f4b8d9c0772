//! Input polling
//!
//! Reads keyboard and mouse through macroquad and merges in the gamepad,
//! producing a `FrameInput` snapshot each frame.

use super::gamepad::{button, Gamepad};
use super::{Action, FrameInput};
use macroquad::prelude::*;

/// Stick deflection needed to count as a digital left/right
const STICK_THRESHOLD: f32 = 0.5;

pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame, before `frame()`
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Snapshot of every action for this frame
    pub fn frame(&self) -> FrameInput {
        let mut input = FrameInput::default();
        for action in Action::ALL {
            let active = if action.is_held() {
                self.keyboard_down(action) || self.gamepad_down(action)
            } else {
                self.keyboard_pressed(action) || self.gamepad_pressed(action)
            };
            input.set(action, active);
        }
        input
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => is_key_down(KeyCode::Left),
            Action::MoveRight => is_key_down(KeyCode::Right),
            Action::Jump => is_key_down(KeyCode::Up),
            _ => false,
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::ToggleShader => is_key_pressed(KeyCode::S),
            Action::Restart => {
                is_mouse_button_pressed(MouseButton::Left) || is_key_pressed(KeyCode::Enter)
            }
            Action::SwitchDemo => is_key_pressed(KeyCode::Tab),
            _ => false,
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        let stick = gp.left_stick();
        match action {
            Action::MoveLeft => gp.is_button_down(button::DPAD_LEFT) || stick.x < -STICK_THRESHOLD,
            Action::MoveRight => gp.is_button_down(button::DPAD_RIGHT) || stick.x > STICK_THRESHOLD,
            Action::Jump => gp.is_button_down(button::A) || gp.is_button_down(button::DPAD_UP),
            _ => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        let gp = &self.gamepad;
        match action {
            Action::ToggleShader => gp.is_button_pressed(button::Y),
            Action::Restart => gp.is_button_pressed(button::START),
            Action::SwitchDemo => gp.is_button_pressed(button::SELECT),
            _ => false,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
