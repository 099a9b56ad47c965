use super::signature::{KeyManager, SignatureInfo};
use crate::collaborators::Cryptographer;
use crate::document::{base64_bytes, Certificate};
use crate::error::{DocSendError, DocSendResult};
use serde::{Deserialize, Serialize};

/// Signed form of a document's content: the original bytes plus a detached signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedContent {
    #[serde(with = "base64_bytes")]
    pub payload: Vec<u8>,
    pub signature: SignatureInfo,
}

impl SignedContent {
    pub fn from_bytes(bytes: &[u8]) -> DocSendResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Check the signature and the recorded payload hash
    pub fn verify(&self) -> DocSendResult<bool> {
        let expected_hash = super::hash::HashInfo::from_bytes(&self.payload).tagged();
        if expected_hash != self.signature.signed_data_hash {
            return Ok(false);
        }
        KeyManager::verify(
            &self.signature.public_key,
            &self.signature.signature,
            &self.payload,
        )
    }
}

/// Signs content with the Ed25519 key carried by the certificate
///
/// The signed content is a JSON-encoded [`SignedContent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Cryptographer;

impl Ed25519Cryptographer {
    pub fn new() -> Self {
        Self
    }
}

impl Cryptographer for Ed25519Cryptographer {
    fn sign(&self, content: &[u8], certificate: &Certificate) -> DocSendResult<Vec<u8>> {
        let key_manager = KeyManager::from_certificate(certificate)?;
        let signed = SignedContent {
            payload: content.to_vec(),
            signature: key_manager.sign(certificate.subject(), content),
        };
        serde_json::to_vec(&signed)
            .map_err(|e| DocSendError::SigningFailed(format!("Failed to encode signed content: {}", e)))
    }
}

/// Verify bytes produced by [`Ed25519Cryptographer`]
pub fn verify_signed_content(bytes: &[u8]) -> DocSendResult<bool> {
    SignedContent::from_bytes(bytes)?.verify()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_produces_verifiable_content() {
        let cert = KeyManager::generate().certificate("CN=signer");
        let signed = Ed25519Cryptographer.sign(b"contract", &cert).unwrap();

        let parsed = SignedContent::from_bytes(&signed).unwrap();
        assert_eq!(parsed.payload, b"contract");
        assert_eq!(parsed.signature.signer, "CN=signer");
        assert!(verify_signed_content(&signed).unwrap());
    }

    #[test]
    fn test_tampered_payload_fails_verification() {
        let cert = KeyManager::generate().certificate("CN=signer");
        let signed = Ed25519Cryptographer.sign(b"contract", &cert).unwrap();

        let mut parsed = SignedContent::from_bytes(&signed).unwrap();
        parsed.payload = b"forged".to_vec();
        assert!(!parsed.verify().unwrap());
    }

    #[test]
    fn test_bad_certificate_key() {
        let cert = Certificate::new("CN=broken", vec![1u8, 2, 3]);
        let err = Ed25519Cryptographer.sign(b"data", &cert).unwrap_err();
        assert!(matches!(err, DocSendError::SigningFailed(_)));
    }
}
