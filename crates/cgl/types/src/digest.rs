use crate::canonical::to_canonical_json;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// Hash function used by a chain.
///
/// State locks are chained with SHA-256, audit events with SHA3-256.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Sha256,
    Sha3_256,
}

impl HashAlgorithm {
    pub fn digest_hex(self, data: &[u8]) -> String {
        match self {
            Self::Sha256 => sha256_hex(data),
            Self::Sha3_256 => sha3_256_hex(data),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha256 => write!(f, "SHA-256"),
            Self::Sha3_256 => write!(f, "SHA3-256"),
        }
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Lowercase hex SHA3-256 of `data`.
pub fn sha3_256_hex(data: &[u8]) -> String {
    hex::encode(Sha3_256::digest(data))
}

/// Hash the canonical JSON form of `value`.
pub fn hash_canonical<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<String, serde_json::Error> {
    let canonical = to_canonical_json(value)?;
    Ok(algorithm.digest_hex(canonical.as_bytes()))
}
