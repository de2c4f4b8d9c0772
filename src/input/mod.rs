//! Input handling
//!
//! Action-based input over keyboard, mouse and gamepad.
//!
//! Native: gilrs for gamepads
//! WASM: Web Gamepad API bindings (see web/index.html)

mod actions;
mod gamepad;
mod state;

pub use actions::{Action, FrameInput};
pub use state::InputState;
