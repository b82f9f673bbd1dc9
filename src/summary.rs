//! Summary struct - the successful response of the summarization backend.

use serde::{Deserialize, Serialize};

/// Label shown when the backend does not say which model it used
pub const UNKNOWN_MODEL: &str = "Unknown";

/// Summary of an uploaded document.
///
/// Deserializes from the backend body `{"summary": "...", "model_used": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// The summarized text
    #[serde(rename = "summary")]
    pub text: String,
    /// Which backend model produced the summary (bert, legalbert, pegasus)
    #[serde(default)]
    pub model_used: Option<String>,
}

impl Summary {
    /// Create a new summary
    pub fn new(text: impl Into<String>, model_used: Option<String>) -> Self {
        Self {
            text: text.into(),
            model_used,
        }
    }

    /// Model label for display, falling back to "Unknown"
    pub fn model_label(&self) -> &str {
        model_label(self.model_used.as_deref())
    }
}

/// Display label for an optional model name
pub fn model_label(model_used: Option<&str>) -> &str {
    match model_used {
        Some(model) if !model.is_empty() => model,
        _ => UNKNOWN_MODEL,
    }
}
