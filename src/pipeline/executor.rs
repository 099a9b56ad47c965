use super::core::{DeliveryState, PipelineStage};
use crate::document::Document;
use crate::logger::LogLevel;
use crate::outcome::Outcome;
use crate::send_log;
use std::time::Instant;

/// Runs stages in order over one document, stopping at the first failure
///
/// # Example
/// ```
/// use docsend_lib::pipeline::Pipeline;
/// use docsend_lib::pipeline::stages::FormatStage;
///
/// let pipeline = Pipeline::builder("prepare")
///     .add_stage(FormatStage::new(["4.0", "3.1"]))
///     .build();
/// assert_eq!(pipeline.stage_count(), 1);
/// ```
pub struct Pipeline {
    name: String,
    stages: Vec<Box<dyn PipelineStage>>,
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Thread `document` through every stage
    ///
    /// An already failed outcome comes back unchanged and no stage runs. `label` only
    /// identifies the document in log lines.
    pub fn execute(&self, label: &str, document: Outcome<Document>) -> Outcome<Document> {
        self.trace(label, document, DeliveryState::Recognized).0
    }

    /// Like [`Pipeline::execute`], also tracking where the file got to
    ///
    /// Each passed stage advances `state` to [`PipelineStage::reached`]; the first failing
    /// stage records itself in [`DeliveryState::Failed`]. A failed input leaves `state` as given.
    pub fn trace(
        &self,
        label: &str,
        document: Outcome<Document>,
        state: DeliveryState,
    ) -> (Outcome<Document>, DeliveryState) {
        self.stages.iter().enumerate().fold(
            (document, state),
            |(outcome, state), (index, stage)| {
                if outcome.is_failure() {
                    return (outcome, state);
                }
                let outcome = outcome.bind(|doc| self.run_stage(index, stage.as_ref(), label, doc));
                let state = match outcome.reason() {
                    Some(reason) => state.fail(stage.name(), reason),
                    None => state.advance(stage.reached()),
                };
                (outcome, state)
            },
        )
    }

    fn run_stage(
        &self,
        index: usize,
        stage: &dyn PipelineStage,
        label: &str,
        document: Document,
    ) -> Outcome<Document> {
        let total = self.stages.len();

        if stage.should_skip(&document) {
            send_log!(
                LogLevel::Info,
                "pipeline",
                "Skipping stage {}/{}: {} (file: {})",
                index + 1,
                total,
                stage.name(),
                label
            );
            return Outcome::success(document);
        }

        send_log!(
            LogLevel::Debug,
            "pipeline",
            "Executing stage {}/{}: {} (file: {})",
            index + 1,
            total,
            stage.name(),
            label
        );

        let started = Instant::now();
        stage
            .run(document)
            .on_failure(|reason| {
                send_log!(
                    LogLevel::Warn,
                    "pipeline",
                    "Stage '{}' of '{}' failed: {} (file: {})",
                    stage.name(),
                    self.name,
                    reason,
                    label
                );
            })
            .map(|doc| {
                send_log!(
                    LogLevel::Debug,
                    "pipeline",
                    "Stage '{}' done in {:.3}ms, file is {} (file: {})",
                    stage.name(),
                    started.elapsed().as_secs_f64() * 1000.0,
                    stage.reached(),
                    label
                );
                doc
            })
    }
}

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    name: String,
    stages: Vec<Box<dyn PipelineStage>>,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    pub fn add_stage<S: PipelineStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn add_boxed_stage(mut self, stage: Box<dyn PipelineStage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            stages: self.stages,
        }
    }
}
