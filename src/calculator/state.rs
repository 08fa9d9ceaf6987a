//! The calculator input state machine.
//!
//! Two states: `Entering`, where the display accumulates raw input, and
//! `ResultShown`, where the display holds the last evaluated result. The
//! buffer is permissive: operator adjacency, duplicate decimal points, and
//! leading zeros are not validated on input; a malformed buffer fails at
//! evaluation time instead.

use crate::calculator::evaluate;
use crate::db::models::NewCalculation;
use crate::error::ReckonError;

/// One user action, as produced by the key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A digit, decimal point, percent sign, or binary operator.
    Token(char),
    /// Remove the trailing character (acts as clear after a result).
    Delete,
    /// Reset the display and the held result.
    Clear,
    /// Evaluate the current buffer.
    Calculate,
}

fn is_binary_operator(token: char) -> bool {
    matches!(
        token,
        '+' | '-' | evaluate::MULTIPLY_SIGN | evaluate::DIVIDE_SIGN
    )
}

#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    display: String,
    result: String,
    last_was_result: bool,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The in-progress or just-shown buffer.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The last computed result, held so a new operator can chain from it.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// True immediately after a successful evaluation, false once the user
    /// resumes typing.
    pub fn last_was_result(&self) -> bool {
        self.last_was_result
    }

    /// Single entry point for the four transition operations. Returns the
    /// record to persist when a `Calculate` event evaluates successfully.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<Option<NewCalculation>, ReckonError> {
        match event {
            InputEvent::Token(token) => {
                self.input(token);
                Ok(None)
            }
            InputEvent::Delete => {
                self.delete();
                Ok(None)
            }
            InputEvent::Clear => {
                self.clear();
                Ok(None)
            }
            InputEvent::Calculate => self.calculate(),
        }
    }

    pub fn input(&mut self, token: char) {
        if self.last_was_result {
            if is_binary_operator(token) {
                // Continue calculating with the previous result.
                self.display = format!("{}{}", self.result, token);
            } else {
                // Start a new calculation; the held result stays until the
                // next successful evaluation overwrites it.
                self.display = token.to_string();
            }
            self.last_was_result = false;
        } else {
            self.display.push(token);
        }
    }

    pub fn delete(&mut self) {
        if self.last_was_result {
            self.clear();
        } else {
            self.display.pop();
        }
    }

    pub fn clear(&mut self) {
        self.display.clear();
        self.result.clear();
        self.last_was_result = false;
    }

    /// Evaluate the buffer. No-op on an empty display. On success the
    /// display shows the result and the returned record carries the
    /// pre-normalization expression; persisting it is the caller's
    /// fire-and-forget concern and never touches this state. On failure the
    /// buffer is preserved untouched.
    pub fn calculate(&mut self) -> Result<Option<NewCalculation>, ReckonError> {
        if self.display.is_empty() {
            return Ok(None);
        }

        let value = evaluate::evaluate(&evaluate::normalize(&self.display))?;
        let rendered = evaluate::stringify(value);

        let record = NewCalculation {
            expression: std::mem::replace(&mut self.display, rendered.clone()),
            result: rendered.clone(),
        };
        self.result = rendered;
        self.last_was_result = true;
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_tokens(state: &mut CalculatorState, tokens: &str) {
        for token in tokens.chars() {
            state.input(token);
        }
    }

    #[test]
    fn two_plus_two_round_trip() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "2+2");
        let record = state.calculate().unwrap().unwrap();

        assert_eq!(state.display(), "4");
        assert_eq!(state.result(), "4");
        assert!(state.last_was_result());
        assert_eq!(record.expression, "2+2");
        assert_eq!(record.result, "4");
    }

    #[test]
    fn division_by_zero_shows_infinity() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "5÷0");
        let record = state.calculate().unwrap().unwrap();

        assert_eq!(state.display(), "Infinity");
        assert!(state.last_was_result());
        // The recorded expression keeps the display glyph.
        assert_eq!(record.expression, "5÷0");
    }

    #[test]
    fn invalid_expression_preserves_buffer() {
        let mut state = CalculatorState::new();
        state.input('+');
        let err = state.calculate().unwrap_err();

        assert!(matches!(err, ReckonError::InvalidExpression));
        assert_eq!(state.display(), "+");
        assert!(!state.last_was_result());
    }

    #[test]
    fn calculate_on_empty_display_is_a_no_op() {
        let mut state = CalculatorState::new();
        assert!(state.calculate().unwrap().is_none());
        assert_eq!(state.display(), "");
        assert!(!state.last_was_result());
    }

    #[test]
    fn operator_after_result_chains_from_it() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "2+2");
        state.calculate().unwrap();

        for op in ['+', '-', '×', '÷'] {
            let mut chained = state.clone();
            chained.input(op);
            assert_eq!(chained.display(), format!("4{op}"));
            assert!(!chained.last_was_result());
        }
    }

    #[test]
    fn digit_after_result_starts_fresh() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "2+2");
        state.calculate().unwrap();

        state.input('7');
        assert_eq!(state.display(), "7");
        assert!(!state.last_was_result());
        // Held until the next successful evaluation overwrites it.
        assert_eq!(state.result(), "4");
    }

    #[test]
    fn entering_appends_unconditionally() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "00..++%");
        assert_eq!(state.display(), "00..++%");
    }

    #[test]
    fn delete_removes_one_trailing_char() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "12+");
        state.delete();
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn delete_on_empty_display_is_a_no_op() {
        let mut state = CalculatorState::new();
        state.delete();
        assert_eq!(state.display(), "");
    }

    #[test]
    fn delete_after_result_acts_as_clear() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "2+2");
        state.calculate().unwrap();

        state.delete();
        assert_eq!(state.display(), "");
        assert_eq!(state.result(), "");
        assert!(!state.last_was_result());
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "9×9");
        state.calculate().unwrap();

        state.clear();
        assert_eq!(state.display(), "");
        assert_eq!(state.result(), "");
        assert!(!state.last_was_result());
    }

    #[test]
    fn dispatch_covers_all_four_operations() {
        let mut state = CalculatorState::new();
        state.dispatch(InputEvent::Token('8')).unwrap();
        state.dispatch(InputEvent::Token('×')).unwrap();
        state.dispatch(InputEvent::Token('3')).unwrap();
        let record = state.dispatch(InputEvent::Calculate).unwrap().unwrap();
        assert_eq!(record.result, "24");

        state.dispatch(InputEvent::Delete).unwrap();
        assert_eq!(state.display(), "");
        state.dispatch(InputEvent::Token('1')).unwrap();
        state.dispatch(InputEvent::Clear).unwrap();
        assert_eq!(state.display(), "");
    }

    #[test]
    fn chained_calculation_uses_previous_result() {
        let mut state = CalculatorState::new();
        type_tokens(&mut state, "2+2");
        state.calculate().unwrap();
        state.input('×');
        state.input('3');
        let record = state.calculate().unwrap().unwrap();

        assert_eq!(record.expression, "4×3");
        assert_eq!(state.display(), "12");
    }
}
