use crate::document::Document;
use crate::outcome::Outcome;
use crate::pipeline::{DeliveryState, PipelineStage};

pub const INVALID_FORMAT: &str = "Invalid format version";

/// Stage that accepts only documents whose format tag is on the allow-list
pub struct FormatStage {
    allowed: Vec<String>,
}

impl FormatStage {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl PipelineStage for FormatStage {
    fn run(&self, document: Document) -> Outcome<Document> {
        if self.allowed.iter().any(|f| *f == document.format) {
            Outcome::success(document)
        } else {
            Outcome::failure(INVALID_FORMAT)
        }
    }

    fn name(&self) -> &str {
        "Validate Format"
    }

    fn reached(&self) -> DeliveryState {
        DeliveryState::FormatChecked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn with_format(format: &str) -> Document {
        Document::new(format, Utc::now(), b"body".to_vec())
    }

    #[test]
    fn test_allowed_formats_pass() {
        let stage = FormatStage::new(["4.0", "3.1"]);
        assert!(stage.run(with_format("4.0")).is_success());
        assert!(stage.run(with_format("3.1")).is_success());
    }

    #[test]
    fn test_other_formats_fail() {
        let stage = FormatStage::new(["4.0", "3.1"]);
        assert_eq!(stage.run(with_format("2.0")), Outcome::failure(INVALID_FORMAT));
        assert_eq!(stage.run(with_format("4.0 ")), Outcome::failure(INVALID_FORMAT));
        assert_eq!(stage.run(with_format("")), Outcome::failure(INVALID_FORMAT));
    }

    #[test]
    fn test_stage_name() {
        let stage = FormatStage::new(["4.0"]);
        assert_eq!(stage.name(), "Validate Format");
        assert_eq!(stage.reached(), DeliveryState::FormatChecked);
    }
}
