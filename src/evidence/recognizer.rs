use crate::collaborators::Recognizer;
use crate::document::{Document, FileContent};
use crate::error::{DocSendError, DocSendResult};

/// Recognizes files holding a JSON-encoded [`Document`]
///
/// ```json
/// { "format": "4.0", "created": "2024-06-01T09:30:00Z", "content": "aGVsbG8=" }
/// ```
///
/// `content` is standard base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecognizer;

impl JsonRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Encode a document in the form this recognizer reads
    pub fn encode(name: impl Into<String>, document: &Document) -> DocSendResult<FileContent> {
        Ok(FileContent::new(name, serde_json::to_vec(document)?))
    }
}

impl Recognizer for JsonRecognizer {
    fn recognize(&self, file: &FileContent) -> DocSendResult<Document> {
        if file.content.is_empty() {
            return Err(DocSendError::UnrecognizedDocument(format!(
                "{} is empty",
                file.name
            )));
        }
        serde_json::from_slice(&file.content).map_err(|e| {
            DocSendError::UnrecognizedDocument(format!("{}: {}", file.name, e))
        })
    }
}
