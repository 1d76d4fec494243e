use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The current answer for one question. Created by the renderer on user
/// input; the engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ResponseValue {
    Text(String),
    Selection(Vec<String>),
    Number(f64),
    Flag(bool),
    Empty,
}

/// Live answers keyed by question id. Owned by the page executor; borrowed
/// read-only by every evaluation call.
pub type ResponseMap = BTreeMap<String, ResponseValue>;

impl ResponseValue {
    /// String form used for textual comparisons; `None` for selections and
    /// null, which the textual operators cannot act on.
    pub fn as_comparison_string(&self) -> Option<String> {
        match self {
            ResponseValue::Text(text) => Some(text.clone()),
            ResponseValue::Number(number) => Some(format_number(*number)),
            ResponseValue::Flag(flag) => Some(flag.to_string()),
            ResponseValue::Selection(_) | ResponseValue::Empty => None,
        }
    }

    /// Numeric form used for ordering comparisons. Booleans are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResponseValue::Number(number) => Some(*number),
            ResponseValue::Text(text) => text.parse::<f64>().ok(),
            ResponseValue::Selection(_) | ResponseValue::Flag(_) | ResponseValue::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseValue::Empty)
    }
}

/// Fractionless numbers print integrally so a numeric answer `5.0` matches
/// the authored literal `"5"`.
pub(crate) fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// A single finding from answer validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub question_id: Option<String>,
    pub path: Option<String>,
    pub message: String,
    pub code: Option<String>,
}

/// Outcome of validating a response map against the visible questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}
