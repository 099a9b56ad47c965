use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashInfo {
    pub algorithm: String,
    pub value: String,
}

impl HashInfo {
    /// SHA-256 of data in memory
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);

        Self {
            algorithm: "SHA-256".to_string(),
            value: hex::encode(hasher.finalize()),
        }
    }

    /// Whether `data` hashes to this value
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::from_bytes(data).value == self.value
    }

    /// `sha256:<hex>` form used in signatures
    pub fn tagged(&self) -> String {
        format!("sha256:{}", self.value)
    }
}
