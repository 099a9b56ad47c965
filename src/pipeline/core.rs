use crate::document::Document;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single validation or transformation step applied to a recognized document
///
/// Stages are chained by [`super::Pipeline`] with [`Outcome::bind`], so a stage only
/// ever sees documents that passed every earlier stage.
///
/// # Example
/// ```
/// use docsend_lib::document::Document;
/// use docsend_lib::outcome::Outcome;
/// use docsend_lib::pipeline::{DeliveryState, PipelineStage};
///
/// struct NonEmpty;
///
/// impl PipelineStage for NonEmpty {
///     fn run(&self, document: Document) -> Outcome<Document> {
///         if document.content.is_empty() {
///             Outcome::failure("Empty document")
///         } else {
///             Outcome::success(document)
///         }
///     }
///
///     fn name(&self) -> &str {
///         "Non Empty"
///     }
///
///     fn reached(&self) -> DeliveryState {
///         DeliveryState::FormatChecked
///     }
/// }
/// ```
pub trait PipelineStage: Send + Sync {
    /// Check or transform the document
    ///
    /// A failure here switches the file onto the failure track; later stages are not run.
    fn run(&self, document: Document) -> Outcome<Document>;

    /// Stage name for logging
    fn name(&self) -> &str;

    /// State the file is in once this stage succeeds
    fn reached(&self) -> DeliveryState;

    /// Whether to pass the document through untouched
    fn should_skip(&self, _document: &Document) -> bool {
        false
    }
}

/// Where a single file is on its way through the sender
///
/// A failure records the step it happened at; the file's state is frozen from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum DeliveryState {
    Received,
    Recognized,
    FormatChecked,
    TimestampChecked,
    Signed,
    Sent,
    Failed { at: String, reason: String },
}

impl DeliveryState {
    /// Absorb a failure raised by step `at`; a terminal state stays as it is
    pub fn fail(self, at: impl Into<String>, reason: impl Into<String>) -> DeliveryState {
        if self.is_terminal() {
            self
        } else {
            DeliveryState::Failed {
                at: at.into(),
                reason: reason.into(),
            }
        }
    }

    /// Move on to `reached` unless the file already finished
    pub fn advance(self, reached: DeliveryState) -> DeliveryState {
        if self.is_terminal() {
            self
        } else {
            reached
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryState::Sent | DeliveryState::Failed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DeliveryState::Failed { .. })
    }
}

impl fmt::Display for DeliveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryState::Received => write!(f, "received"),
            DeliveryState::Recognized => write!(f, "recognized"),
            DeliveryState::FormatChecked => write!(f, "format checked"),
            DeliveryState::TimestampChecked => write!(f, "timestamp checked"),
            DeliveryState::Signed => write!(f, "signed"),
            DeliveryState::Sent => write!(f, "sent"),
            DeliveryState::Failed { at, reason } => write!(f, "failed at {}: {}", at, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(at: &str, reason: &str) -> DeliveryState {
        DeliveryState::Failed {
            at: at.to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_advance_follows_success_track() {
        let state = DeliveryState::Received
            .advance(DeliveryState::Recognized)
            .advance(DeliveryState::FormatChecked)
            .advance(DeliveryState::TimestampChecked)
            .advance(DeliveryState::Signed)
            .advance(DeliveryState::Sent);
        assert_eq!(state, DeliveryState::Sent);
        assert!(state.is_terminal());
        assert!(!state.is_failed());
        assert_eq!(state.advance(DeliveryState::Signed), DeliveryState::Sent);
    }

    #[test]
    fn test_failed_is_absorbing() {
        let state = DeliveryState::FormatChecked.fail("Validate Timestamp", "Too old document");
        assert_eq!(state, failed("Validate Timestamp", "Too old document"));
        assert!(state.is_failed());
        assert_eq!(
            state.clone().fail("Sign Content", "other"),
            failed("Validate Timestamp", "Too old document")
        );
        assert_eq!(
            state.advance(DeliveryState::Signed),
            failed("Validate Timestamp", "Too old document")
        );
        assert_eq!(DeliveryState::Sent.fail("Send", "late"), DeliveryState::Sent);
    }

    #[test]
    fn test_display() {
        assert_eq!(DeliveryState::TimestampChecked.to_string(), "timestamp checked");
        assert_eq!(failed("Send", "x").to_string(), "failed at Send: x");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(failed("Sign Content", "bad")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "state": "failed",
                "detail": { "at": "Sign Content", "reason": "bad" }
            })
        );
        let json = serde_json::to_value(DeliveryState::Signed).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "signed" }));
    }
}
