use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw input file as handed to the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub name: String,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl FileContent {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A recognized document ready for validation and signing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Format version tag, e.g. "4.0"
    pub format: String,

    /// When the document was created
    pub created: DateTime<Utc>,

    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(format: impl Into<String>, created: DateTime<Utc>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            format: format.into(),
            created,
            content: content.into(),
        }
    }

    /// Return a copy of this document carrying `content` instead
    pub fn with_content(self, content: Vec<u8>) -> Self {
        Self { content, ..self }
    }
}

/// Signing credential handed through to the cryptographer
///
/// The pipeline never looks inside; only a [`crate::collaborators::Cryptographer`] does.
#[derive(Clone)]
pub struct Certificate {
    subject: String,
    secret_key: Vec<u8>,
}

impl Certificate {
    pub fn new(subject: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Self {
        Self {
            subject: subject.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

impl std::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Certificate")
            .field("subject", &self.subject)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Result of sending one file: `error` is `None` when the file went out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSendResult {
    pub file: FileContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileSendResult {
    pub fn new(file: FileContent, error: Option<String>) -> Self {
        Self { file, error }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Counts over a collected batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[FileSendResult]) -> Self {
        let sent = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            sent,
            failed: results.len() - sent,
        }
    }
}

/// Serde adapter storing byte buffers as standard base64 strings
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
