use crate::collaborators::Clock;
use crate::document::Document;
use crate::outcome::Outcome;
use crate::pipeline::{DeliveryState, PipelineStage};
use chrono::Months;
use std::sync::Arc;

pub const TOO_OLD: &str = "Too old document";

/// Stage that rejects documents created too long ago
///
/// The cutoff is `now - max_age_months` in calendar months (chrono clamps to the last
/// day of a shorter month), and a document must be strictly newer than it. The clock
/// is read on every run.
pub struct TimestampStage {
    clock: Arc<dyn Clock>,
    max_age: Months,
}

impl TimestampStage {
    pub fn new(clock: Arc<dyn Clock>, max_age_months: u32) -> Self {
        Self {
            clock,
            max_age: Months::new(max_age_months),
        }
    }
}

impl PipelineStage for TimestampStage {
    fn run(&self, document: Document) -> Outcome<Document> {
        let now = self.clock.now();
        // No representable cutoff means every document is recent enough
        let fresh = match now.checked_sub_months(self.max_age) {
            Some(cutoff) => document.created > cutoff,
            None => true,
        };

        if fresh {
            Outcome::success(document)
        } else {
            Outcome::failure(TOO_OLD)
        }
    }

    fn name(&self) -> &str {
        "Validate Timestamp"
    }

    fn reached(&self) -> DeliveryState {
        DeliveryState::TimestampChecked
    }
}
