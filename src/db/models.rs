use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted calculation. Immutable once created; destroyed only by the
/// bulk clear operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub id: i64,
    pub expression: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape shared by the API request body, the recorder message, and
/// the state machine's evaluation output. `expression` is the
/// pre-normalization display string and may contain the `×`/`÷` glyphs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCalculation {
    pub expression: String,
    pub result: String,
}
