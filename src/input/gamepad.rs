//! Gamepad support for native and WASM
//!
//! Native: gilrs
//! WASM: Web Gamepad API through the `starfall_gamepad_*` functions that
//! web/index.html registers as a miniquad plugin
//!
//! Both backends only report a raw button bitmask and the left stick.
//! Edge detection ("just pressed") is done here, once per `poll`, so
//! querying a button several times in a frame gives the same answer.

use macroquad::prelude::Vec2;

/// Standard mapping button indices (Web Gamepad API order)
pub mod button {
    pub const A: u32 = 0;
    pub const Y: u32 = 3;
    pub const SELECT: u32 = 8;
    pub const START: u32 = 9;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

const DEFAULT_DEADZONE: f32 = 0.15;

#[cfg(target_arch = "wasm32")]
mod backend {
    use macroquad::prelude::Vec2;

    extern "C" {
        fn starfall_gamepad_has_gamepad() -> i32;
        fn starfall_gamepad_get_button_mask() -> u32;
        fn starfall_gamepad_get_left_stick_x() -> i32;
        fn starfall_gamepad_get_left_stick_y() -> i32;
    }

    /// The browser polls the Gamepad API itself; we just read it
    pub struct Backend;

    impl Backend {
        pub fn new() -> Self {
            Backend
        }

        pub fn pump(&mut self) {}

        pub fn connected(&self) -> bool {
            unsafe { starfall_gamepad_has_gamepad() != 0 }
        }

        pub fn button_mask(&self) -> u32 {
            unsafe { starfall_gamepad_get_button_mask() }
        }

        /// Raw stick in -1..1, +y up
        pub fn left_stick(&self) -> Vec2 {
            let x = unsafe { starfall_gamepad_get_left_stick_x() } as f32 / 10000.0;
            let y = -(unsafe { starfall_gamepad_get_left_stick_y() } as f32 / 10000.0);
            Vec2::new(x, y)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::button;
    use gilrs::{Axis, Button, Gilrs};
    use macroquad::logging::warn;
    use macroquad::prelude::Vec2;

    const BUTTONS: [(Button, u32); 7] = [
        (Button::South, button::A),
        (Button::North, button::Y),
        (Button::Select, button::SELECT),
        (Button::Start, button::START),
        (Button::DPadUp, button::DPAD_UP),
        (Button::DPadLeft, button::DPAD_LEFT),
        (Button::DPadRight, button::DPAD_RIGHT),
    ];

    /// None when no gamepad subsystem is available (headless CI, some VMs)
    pub struct Backend {
        gilrs: Option<Gilrs>,
    }

    impl Backend {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn pump(&mut self) {
            if let Some(gilrs) = &mut self.gilrs {
                // Draining events updates gilrs' cached button/axis state
                while gilrs.next_event().is_some() {}
            }
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn connected(&self) -> bool {
            self.active().is_some()
        }

        pub fn button_mask(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            BUTTONS
                .iter()
                .filter(|(b, _)| gp.is_pressed(*b))
                .fold(0u32, |mask, (_, bit)| mask | (1u32 << *bit))
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active() else { return Vec2::ZERO };
            Vec2::new(gp.value(Axis::LeftStickX), gp.value(Axis::LeftStickY))
        }
    }
}

/// First connected gamepad, with per-frame edge detection
pub struct Gamepad {
    backend: backend::Backend,
    deadzone: f32,
    buttons: u32,
    prev_buttons: u32,
    stick: Vec2,
}

impl Gamepad {
    pub fn new() -> Self {
        Self {
            backend: backend::Backend::new(),
            deadzone: DEFAULT_DEADZONE,
            buttons: 0,
            prev_buttons: 0,
            stick: Vec2::ZERO,
        }
    }

    /// Sample the device. Call once per frame before any queries.
    pub fn poll(&mut self) {
        self.backend.pump();
        self.prev_buttons = self.buttons;
        if self.backend.connected() {
            self.buttons = self.backend.button_mask();
            self.stick = apply_deadzone(self.backend.left_stick(), self.deadzone);
        } else {
            self.buttons = 0;
            self.stick = Vec2::ZERO;
        }
    }

    pub fn is_button_down(&self, button: u32) -> bool {
        self.buttons & (1 << button) != 0
    }

    pub fn is_button_pressed(&self, button: u32) -> bool {
        pressed_edge(self.prev_buttons, self.buttons, button)
    }

    /// Left stick after the deadzone, +y up
    pub fn left_stick(&self) -> Vec2 {
        self.stick
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

fn pressed_edge(prev: u32, current: u32, button: u32) -> bool {
    let bit = 1 << button;
    current & bit != 0 && prev & bit == 0
}

/// Radial deadzone with linear rescaling to 0..1
fn apply_deadzone(stick: Vec2, deadzone: f32) -> Vec2 {
    let len = stick.length();
    if len < deadzone {
        return Vec2::ZERO;
    }
    let scale = ((len - deadzone) / (1.0 - deadzone)).min(1.0) / len;
    stick * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(Vec2::new(0.1, 0.0), 0.15), Vec2::ZERO);
        let full = apply_deadzone(Vec2::new(1.0, 0.0), 0.15);
        assert!((full.x - 1.0).abs() < 1e-6);
        let half = apply_deadzone(Vec2::new(0.575, 0.0), 0.15);
        assert!((half.x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_pressed_edge() {
        let a = 1 << button::A;
        assert!(pressed_edge(0, a, button::A));
        assert!(!pressed_edge(a, a, button::A));
        assert!(!pressed_edge(a, 0, button::A));
        assert!(!pressed_edge(0, a, button::START));
    }
}
