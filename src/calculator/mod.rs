//! The calculator core: expression evaluation and the input state machine.
//!
//! - `evaluate`: glyph normalization, the black-box evaluator, and result
//!   stringification
//! - `state`: the display-buffer state machine driven by input events
//! - `keymap`: character-to-event bindings shared by the front end

pub mod evaluate;
pub mod keymap;
pub mod state;

pub use state::{CalculatorState, InputEvent};
