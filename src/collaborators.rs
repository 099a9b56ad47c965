//! Capabilities the send pipeline depends on but does not implement
//!
//! Errors returned here are not special: their `Display` text becomes the failure
//! reason reported for the file.

use crate::document::{Certificate, Document, FileContent};
use crate::error::DocSendResult;
use chrono::{DateTime, Utc};

/// Turns raw file bytes into a [`Document`]
pub trait Recognizer: Send + Sync {
    fn recognize(&self, file: &FileContent) -> DocSendResult<Document>;
}

/// Produces signed content for a document
pub trait Cryptographer: Send + Sync {
    /// Sign `content` with `certificate`, returning the bytes that replace it
    fn sign(&self, content: &[u8], certificate: &Certificate) -> DocSendResult<Vec<u8>>;
}

/// Delivers a prepared document
pub trait Sender: Send + Sync {
    fn send(&self, document: &Document) -> DocSendResult<()>;
}

/// Source of the current time
///
/// Read on every timestamp check, never cached.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}
