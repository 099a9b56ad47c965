use super::hash::HashInfo;
use crate::document::Certificate;
use crate::error::{DocSendError, DocSendResult};
use base64::{engine::general_purpose, Engine as _};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    pub algorithm: String,
    pub signer: String,
    pub public_key: String,
    pub signature: String,
    pub signed_data_hash: String,
}

pub struct KeyManager {
    signing_key: SigningKey,
}

impl KeyManager {
    /// Generate a new Ed25519 keypair
    pub fn generate() -> Self {
        let signing_key = SigningKey::from_bytes(&rand::random::<[u8; 32]>());
        Self { signing_key }
    }

    pub fn from_bytes(bytes: &[u8]) -> DocSendResult<Self> {
        let key_bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            DocSendError::SigningFailed(format!(
                "Invalid key length: expected 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&key_bytes),
        })
    }

    /// Load the key carried by a certificate
    pub fn from_certificate(certificate: &Certificate) -> DocSendResult<Self> {
        Self::from_bytes(certificate.secret_key())
    }

    /// Certificate wrapping this key
    pub fn certificate(&self, subject: impl Into<String>) -> Certificate {
        Certificate::new(subject, self.to_bytes().to_vec())
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    pub fn sign(&self, signer: &str, data: &[u8]) -> SignatureInfo {
        let signature = self.signing_key.sign(data);

        SignatureInfo {
            algorithm: "Ed25519".to_string(),
            signer: signer.to_string(),
            public_key: general_purpose::STANDARD.encode(self.public_key().as_bytes()),
            signature: general_purpose::STANDARD.encode(signature.to_bytes()),
            signed_data_hash: HashInfo::from_bytes(data).tagged(),
        }
    }

    /// Check a base64 signature against a base64 public key
    pub fn verify(public_key_b64: &str, signature_b64: &str, data: &[u8]) -> DocSendResult<bool> {
        let public_key_bytes = general_purpose::STANDARD.decode(public_key_b64)?;
        let signature_bytes = general_purpose::STANDARD.decode(signature_b64)?;

        let pk_array: [u8; 32] = public_key_bytes.as_slice().try_into().map_err(|_| {
            DocSendError::VerificationFailed("Invalid public key length".to_string())
        })?;
        let sig_array: [u8; 64] = signature_bytes.as_slice().try_into().map_err(|_| {
            DocSendError::VerificationFailed("Invalid signature length".to_string())
        })?;

        let public_key = VerifyingKey::from_bytes(&pk_array)
            .map_err(|e| DocSendError::VerificationFailed(format!("Invalid public key: {}", e)))?;
        let signature = Signature::from_bytes(&sig_array);

        Ok(public_key.verify(data, &signature).is_ok())
    }
}
