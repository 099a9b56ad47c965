use crate::collaborators::Cryptographer;
use crate::document::{Certificate, Document};
use crate::outcome::Outcome;
use crate::pipeline::{DeliveryState, PipelineStage};
use std::sync::Arc;

/// Stage that replaces the document content with its signed form
///
/// Whatever the cryptographer reports on failure becomes the reason as-is.
pub struct SignStage {
    cryptographer: Arc<dyn Cryptographer>,
    certificate: Certificate,
}

impl SignStage {
    pub fn new(cryptographer: Arc<dyn Cryptographer>, certificate: Certificate) -> Self {
        Self {
            cryptographer,
            certificate,
        }
    }
}

impl PipelineStage for SignStage {
    fn run(&self, document: Document) -> Outcome<Document> {
        Outcome::evaluate(|| {
            self.cryptographer
                .sign(&document.content, &self.certificate)
        })
        .map(|signed| document.with_content(signed))
    }

    fn name(&self) -> &str {
        "Sign Content"
    }

    fn reached(&self) -> DeliveryState {
        DeliveryState::Signed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DocSendError, DocSendResult};
    use chrono::Utc;

    struct Reverse;

    impl Cryptographer for Reverse {
        fn sign(&self, content: &[u8], certificate: &Certificate) -> DocSendResult<Vec<u8>> {
            let mut out: Vec<u8> = content.iter().rev().copied().collect();
            out.extend_from_slice(certificate.subject().as_bytes());
            Ok(out)
        }
    }

    struct Broken;

    impl Cryptographer for Broken {
        fn sign(&self, _content: &[u8], _certificate: &Certificate) -> DocSendResult<Vec<u8>> {
            Err(DocSendError::from("token expired"))
        }
    }

    fn cert() -> Certificate {
        Certificate::new("|cn", vec![0u8; 32])
    }

    #[test]
    fn test_sign_replaces_content() {
        let stage = SignStage::new(Arc::new(Reverse), cert());
        let created = Utc::now();
        let doc = Document::new("3.1", created, b"abc".to_vec());

        let signed = stage.run(doc).value_or_raise().unwrap();
        assert_eq!(signed.content, b"cba|cn");
        assert_eq!(signed.format, "3.1");
        assert_eq!(signed.created, created);
    }

    #[test]
    fn test_signer_error_surfaces_as_is() {
        let stage = SignStage::new(Arc::new(Broken), cert());
        let doc = Document::new("4.0", Utc::now(), b"abc".to_vec());
        assert_eq!(stage.run(doc), Outcome::failure("token expired"));
    }

    #[test]
    fn test_stage_name() {
        let stage = SignStage::new(Arc::new(Reverse), cert());
        assert_eq!(stage.name(), "Sign Content");
        assert_eq!(stage.reached(), DeliveryState::Signed);
    }
}
