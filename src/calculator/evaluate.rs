//! Expression evaluation using fasteval.
//!
//! The evaluator is a black box: a normalized string goes in, a number or a
//! parse failure comes out. Non-finite values are ordinary results here;
//! `5/0` evaluates to infinity and is rendered as `Infinity`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ReckonError;

/// Display glyph for multiplication; the evaluator expects `*`.
pub const MULTIPLY_SIGN: char = '×';
/// Display glyph for division; the evaluator expects `/`.
pub const DIVIDE_SIGN: char = '÷';

/// Map display-only operator glyphs to the tokens the evaluator accepts.
pub fn normalize(display: &str) -> String {
    display.replace(MULTIPLY_SIGN, "*").replace(DIVIDE_SIGN, "/")
}

/// Evaluate a normalized arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, ReckonError> {
    let mut namespace = BTreeMap::<String, f64>::new();
    fasteval::ez_eval(expression, &mut namespace).map_err(|e| {
        debug!(?e, "evaluator rejected expression");
        ReckonError::InvalidExpression
    })
}

/// Render a numeric result the way the display shows it: integers without a
/// fractional part, decimals trimmed of trailing zeros, non-finite values by
/// name.
pub fn stringify(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
