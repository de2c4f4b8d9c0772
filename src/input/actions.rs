//! Game actions
//!
//! Everything the demos react to, independent of which device produced it.
//!
//! | Action       | Keyboard / mouse | Gamepad          |
//! |--------------|------------------|------------------|
//! | MoveLeft     | Left arrow       | Stick / D-pad    |
//! | MoveRight    | Right arrow      | Stick / D-pad    |
//! | Jump         | Up arrow         | A / D-pad up     |
//! | ToggleShader | S                | Y                |
//! | Restart      | Left click, Enter| Start            |
//! | SwitchDemo   | Tab              | Select           |

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    ToggleShader,
    Restart,
    SwitchDemo,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::ToggleShader,
        Action::Restart,
        Action::SwitchDemo,
    ];

    /// Held actions are read every frame; the others fire once per press
    pub fn is_held(&self) -> bool {
        matches!(self, Action::MoveLeft | Action::MoveRight | Action::Jump)
    }
}

/// One frame's worth of input, detached from any device.
///
/// Scenes only ever see this, which keeps game logic testable without a
/// window or a gamepad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Pressed this frame
    pub toggle_shader: bool,
    /// Pressed this frame
    pub restart: bool,
    /// Pressed this frame
    pub switch_demo: bool,
}

impl FrameInput {
    pub fn set(&mut self, action: Action, value: bool) {
        match action {
            Action::MoveLeft => self.left = value,
            Action::MoveRight => self.right = value,
            Action::Jump => self.jump = value,
            Action::ToggleShader => self.toggle_shader = value,
            Action::Restart => self.restart = value,
            Action::SwitchDemo => self.switch_demo = value,
        }
    }

    /// Horizontal intent: -1 left, 0 none (or both), 1 right
    pub fn horizontal(&self) -> i32 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_covers_every_action() {
        let mut input = FrameInput::default();
        for action in Action::ALL {
            input.set(action, true);
        }
        let all = FrameInput {
            left: true,
            right: true,
            jump: true,
            toggle_shader: true,
            restart: true,
            switch_demo: true,
        };
        assert_eq!(input, all);
        // Both directions held cancel out
        assert_eq!(input.horizontal(), 0);

        input.set(Action::MoveRight, false);
        assert_eq!(input.horizontal(), -1);
    }

    #[test]
    fn test_horizontal() {
        let left = FrameInput { left: true, ..Default::default() };
        let right = FrameInput { right: true, ..Default::default() };
        assert_eq!(left.horizontal(), -1);
        assert_eq!(right.horizontal(), 1);
        assert_eq!(FrameInput::default().horizontal(), 0);
    }
}
