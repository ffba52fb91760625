//! Record domain model.
//!
//! # Responsibility
//! - Define the canonical todo record owned by the store.
//! - Turn caller-supplied partial fields into a validated insert shape.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes or gets reused.
//! - `text` is stored trimmed, non-blank and at most `MAX_TEXT_CHARS` long.
//! - `done` defaults to `false` when the caller does not supply it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of a record.
pub type RecordId = i64;

/// Upper bound for `text`, counted in chars rather than bytes.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Canonical record persisted in the `records` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub text: String,
    pub done: bool,
}

/// Caller-supplied fields for a create request.
///
/// Every field is optional on the wire so that a missing `text` surfaces as a
/// validation error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl RecordDraft {
    /// Convenience constructor for a draft carrying only `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            done: None,
        }
    }

    /// Validates the draft and applies defaults.
    ///
    /// # Errors
    /// - `MissingText` when `text` is absent.
    /// - `BlankText` when `text` is empty after trimming.
    /// - `TextTooLong` when trimmed `text` exceeds `MAX_TEXT_CHARS`.
    pub fn validate(&self) -> Result<NewRecord, RecordValidationError> {
        let raw = self
            .text
            .as_deref()
            .ok_or(RecordValidationError::MissingText)?;
        let text = raw.trim();
        if text.is_empty() {
            return Err(RecordValidationError::BlankText);
        }

        let actual = text.chars().count();
        if actual > MAX_TEXT_CHARS {
            return Err(RecordValidationError::TextTooLong {
                max: MAX_TEXT_CHARS,
                actual,
            });
        }

        Ok(NewRecord {
            text: text.to_string(),
            done: self.done.unwrap_or(false),
        })
    }
}

/// Validated insert shape. Only obtainable through `RecordDraft::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    text: String,
    done: bool,
}

impl NewRecord {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn done(&self) -> bool {
        self.done
    }
}

/// Draft validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    MissingText,
    BlankText,
    TextTooLong { max: usize, actual: usize },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingText => write!(f, "text is required"),
            Self::BlankText => write!(f, "text must not be blank"),
            Self::TextTooLong { max, actual } => {
                write!(f, "text is {actual} characters long; at most {max} allowed")
            }
        }
    }
}

impl Error for RecordValidationError {}
