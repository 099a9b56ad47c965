use super::executor::Pipeline;
use super::stages::{FormatStage, SignStage, TimestampStage};
use crate::collaborators::{Clock, Cryptographer, Recognizer, Sender};
use crate::config::SenderConfig;
use crate::document::{Certificate, Document, FileContent, FileSendResult};
use crate::error::DocSendResult;
use crate::logger::LogLevel;
use crate::outcome::Outcome;
use crate::pipeline::DeliveryState;
use crate::send_log;
use std::sync::Arc;

/// Step name recorded when the recognizer rejects a file
pub const RECOGNIZE_STEP: &str = "Recognize";

/// Step name recorded when the sender rejects a prepared document
pub const SEND_STEP: &str = "Send";

/// Prepares, signs and sends files, one independent outcome per file
///
/// Each file goes recognize → validate format → validate timestamp → sign, and any
/// failure in that part is prefixed once with the prepare context. A prepared document
/// is then sent; a delivery failure is prefixed with the send context instead.
///
/// # Example
/// ```
/// use docsend_lib::collaborators::{Cryptographer, Recognizer, Sender};
/// use docsend_lib::document::{Certificate, Document, FileContent};
/// use docsend_lib::error::DocSendResult;
/// use docsend_lib::pipeline::FileSender;
/// use std::sync::Arc;
///
/// struct Plain;
/// impl Recognizer for Plain {
///     fn recognize(&self, file: &FileContent) -> DocSendResult<Document> {
///         Ok(Document::new("4.0", chrono::Utc::now(), file.content.clone()))
///     }
/// }
/// impl Cryptographer for Plain {
///     fn sign(&self, content: &[u8], _: &Certificate) -> DocSendResult<Vec<u8>> {
///         Ok(content.to_vec())
///     }
/// }
/// impl Sender for Plain {
///     fn send(&self, _: &Document) -> DocSendResult<()> {
///         Ok(())
///     }
/// }
///
/// let sender = FileSender::new(
///     Arc::new(Plain),
///     Arc::new(Plain),
///     Arc::new(Plain),
///     Arc::new(chrono::Utc::now),
/// );
/// let files = vec![FileContent::new("a.doc", b"hello".to_vec())];
/// let cert = Certificate::new("CN=demo", vec![7u8; 32]);
/// let results: Vec<_> = sender.send_files(&files, &cert).collect();
/// assert!(results[0].is_success());
/// ```
pub struct FileSender {
    cryptographer: Arc<dyn Cryptographer>,
    sender: Arc<dyn Sender>,
    recognizer: Arc<dyn Recognizer>,
    clock: Arc<dyn Clock>,
    config: SenderConfig,
}

impl FileSender {
    pub fn new(
        cryptographer: Arc<dyn Cryptographer>,
        sender: Arc<dyn Sender>,
        recognizer: Arc<dyn Recognizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cryptographer,
            sender,
            recognizer,
            clock,
            config: SenderConfig::default(),
        }
    }

    /// Replace the default config, rejecting one that fails [`SenderConfig::validate`]
    pub fn with_config(mut self, config: SenderConfig) -> DocSendResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// Validation and signing stages for one certificate
    pub fn prepare_pipeline(&self, certificate: &Certificate) -> Pipeline {
        Pipeline::builder("prepare")
            .add_stage(FormatStage::new(self.config.allowed_formats.clone()))
            .add_stage(TimestampStage::new(
                self.clock.clone(),
                self.config.max_age_months,
            ))
            .add_stage(SignStage::new(
                self.cryptographer.clone(),
                certificate.clone(),
            ))
            .build()
    }

    fn recognize(&self, file: &FileContent) -> (Outcome<Document>, DeliveryState) {
        let recognized = Outcome::evaluate(|| self.recognizer.recognize(file));
        let state = match recognized.reason() {
            Some(reason) => DeliveryState::Received.fail(RECOGNIZE_STEP, reason),
            None => DeliveryState::Received.advance(DeliveryState::Recognized),
        };
        let recognized = recognized.map(|document| {
            send_log!(
                LogLevel::Debug,
                "pipeline::recognize",
                "File '{}' is {} (format {})",
                file.name,
                state,
                document.format
            );
            document
        });
        (recognized, state)
    }

    fn prepare(&self, pipeline: &Pipeline, file: &FileContent) -> (Outcome<Document>, DeliveryState) {
        let (recognized, state) = self.recognize(file);
        let (prepared, state) = pipeline.trace(&file.name, recognized, state);
        (prepared.refine_error(&self.config.prepare_context), state)
    }

    fn deliver(&self, prepared: Outcome<Document>, state: DeliveryState) -> (Outcome<()>, DeliveryState) {
        match prepared {
            Outcome::Failure(reason) => (Outcome::Failure(reason), state),
            Outcome::Success(document) => {
                let sent = Outcome::evaluate(|| self.sender.send(&document));
                let state = match sent.reason() {
                    Some(reason) => state.fail(SEND_STEP, reason),
                    None => state.advance(DeliveryState::Sent),
                };
                (sent.refine_error(&self.config.send_context), state)
            }
        }
    }

    fn process(&self, pipeline: &Pipeline, file: &FileContent) -> (FileSendResult, DeliveryState) {
        send_log!(
            LogLevel::Info,
            "pipeline::send",
            "Processing file '{}'",
            file.name
        );

        let (prepared, state) = self.prepare(pipeline, file);
        let (sent, state) = self.deliver(prepared, state);

        let level = if state.is_failed() {
            LogLevel::Warn
        } else {
            LogLevel::Info
        };
        send_log!(level, "pipeline::send", "File '{}' {}", file.name, state);

        let result = FileSendResult::new(file.clone(), sent.reason().map(str::to_string));
        (result, state)
    }

    /// Prepare and send a single file
    pub fn send_file(&self, file: &FileContent, certificate: &Certificate) -> FileSendResult {
        self.send_file_traced(file, certificate).0
    }

    /// Prepare and send a single file, also reporting the state it ended in
    ///
    /// A failed file ends in [`DeliveryState::Failed`] naming the step that rejected it:
    /// [`RECOGNIZE_STEP`], a prepare stage name, or [`SEND_STEP`].
    pub fn send_file_traced(
        &self,
        file: &FileContent,
        certificate: &Certificate,
    ) -> (FileSendResult, DeliveryState) {
        let pipeline = self.prepare_pipeline(certificate);
        self.process(&pipeline, file)
    }

    /// Lazily prepare and send each file, yielding results in input order
    ///
    /// Files are independent: a failure on one never skips or alters another.
    pub fn send_files<'a>(
        &'a self,
        files: &'a [FileContent],
        certificate: &Certificate,
    ) -> impl Iterator<Item = FileSendResult> + 'a {
        let pipeline = self.prepare_pipeline(certificate);
        files.iter().map(move |file| self.process(&pipeline, file).0)
    }
}
