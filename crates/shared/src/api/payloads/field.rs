use serde::{Deserialize, Serialize};

/// A scalar request field that may arrive as a JSON number or as text (form
/// bodies and query strings are always text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// `None` for blank text so an empty form input counts as missing
    pub fn non_blank(self) -> Option<Self> {
        match self {
            FieldValue::Text(t) if t.trim().is_empty() => None,
            v => Some(v),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => n.as_i64(),
            FieldValue::Text(t) => t.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(t) => write!(f, "{t}"),
        }
    }
}

/// Trims the value and drops it if nothing is left
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
