//! Railway-style outcome composition and a document prepare/sign/send pipeline
//!
//! [`outcome::Outcome`] carries either a value or a single failure reason, and its
//! combinators let fallible steps be chained so the first failure short-circuits the
//! rest. [`pipeline::FileSender`] uses it to recognize, validate, sign and send a batch
//! of files, producing one [`document::FileSendResult`] per file.

pub mod collaborators;
pub mod config;
pub mod document;
pub mod error;
pub mod evidence;
pub mod logger;
pub mod outcome;
pub mod pipeline;

pub use collaborators::{Clock, Cryptographer, Recognizer, Sender, SystemClock};
pub use config::SenderConfig;
pub use document::{BatchSummary, Certificate, Document, FileContent, FileSendResult};
pub use error::{DocSendError, DocSendResult};
pub use outcome::{IntoOutcome, Outcome};
pub use pipeline::{DeliveryState, FileSender};
