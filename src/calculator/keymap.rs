//! Character bindings shared by the console front end.
//!
//! Digits and the decimal point map directly; `*` and `/` map to the
//! display glyphs; `=` evaluates. Enter, Backspace, and Escape are bound at
//! the terminal layer since they are not characters.

use crate::calculator::evaluate::{DIVIDE_SIGN, MULTIPLY_SIGN};
use crate::calculator::state::InputEvent;

/// Resolve a typed character to an input event, or `None` when unbound.
pub fn event_for_char(c: char) -> Option<InputEvent> {
    match c {
        '0'..='9' | '.' | '%' | '+' | '-' => Some(InputEvent::Token(c)),
        '*' => Some(InputEvent::Token(MULTIPLY_SIGN)),
        '/' => Some(InputEvent::Token(DIVIDE_SIGN)),
        MULTIPLY_SIGN | DIVIDE_SIGN => Some(InputEvent::Token(c)),
        '=' => Some(InputEvent::Calculate),
        _ => None,
    }
}
