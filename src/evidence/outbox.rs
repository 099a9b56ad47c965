use super::hash::HashInfo;
use crate::collaborators::Sender;
use crate::document::Document;
use crate::error::{DocSendError, DocSendResult};
use std::path::{Path, PathBuf};

/// Delivers documents by writing them as JSON into a directory
///
/// Files are named after the SHA-256 of the document content, so sending the same
/// document twice overwrites rather than duplicates.
#[derive(Debug, Clone)]
pub struct OutboxSender {
    dir: PathBuf,
}

impl OutboxSender {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `document` lands when sent
    pub fn path_for(&self, document: &Document) -> PathBuf {
        let hash = HashInfo::from_bytes(&document.content);
        self.dir.join(format!("{}.json", hash.value))
    }

    pub fn load(path: impl AsRef<Path>) -> DocSendResult<Document> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Sender for OutboxSender {
    fn send(&self, document: &Document) -> DocSendResult<()> {
        if !self.dir.is_dir() {
            return Err(DocSendError::DeliveryFailed(format!(
                "outbox {} does not exist",
                self.dir.display()
            )));
        }
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(self.path_for(document), json)
            .map_err(|e| DocSendError::DeliveryFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_send_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let outbox = OutboxSender::new(temp_dir.path());
        let doc = Document::new("4.0", Utc::now(), b"signed bytes".to_vec());

        outbox.send(&doc).unwrap();

        let path = outbox.path_for(&doc);
        assert!(path.exists());
        assert_eq!(OutboxSender::load(&path).unwrap(), doc);
    }

    #[test]
    fn test_missing_outbox_fails() {
        let temp_dir = TempDir::new().unwrap();
        let outbox = OutboxSender::new(temp_dir.path().join("missing"));
        let doc = Document::new("4.0", Utc::now(), Vec::<u8>::new());

        let err = outbox.send(&doc).unwrap_err();
        assert!(matches!(err, DocSendError::DeliveryFailed(_)));
        assert!(err.to_string().contains("does not exist"));
    }
}
