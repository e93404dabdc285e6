//! Custodian key material.
//!
//! A custodian registers the public key that will be installed on the
//! target account if a revocation round executes. Key material is an
//! immutable value: the raw public key bytes plus the hash algorithm the
//! account uses to verify signatures made with it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash algorithm associated with a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-2 with 256-bit output.
    Sha2_256,
    /// SHA-2 with 384-bit output.
    Sha2_384,
    /// SHA-3 with 256-bit output.
    Sha3_256,
    /// SHA-3 with 384-bit output.
    Sha3_384,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha2_256 => "SHA2-256",
            HashAlgorithm::Sha2_384 => "SHA2-384",
            HashAlgorithm::Sha3_256 => "SHA3-256",
            HashAlgorithm::Sha3_384 => "SHA3-384",
        };
        write!(f, "{}", name)
    }
}

/// Public key material recorded by an authorizing custodian.
///
/// Immutable once constructed. The raw key bytes are scheme-agnostic;
/// the account key store interprets them when the credential is added.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodianKeyInfo {
    /// Raw public key bytes.
    pub public_key: Vec<u8>,

    /// Hash algorithm the account verifies this key with.
    pub hash_algorithm: HashAlgorithm,
}

impl CustodianKeyInfo {
    /// Create new key info from raw key bytes and a hash algorithm.
    pub fn new(public_key: impl Into<Vec<u8>>, hash_algorithm: HashAlgorithm) -> Self {
        Self {
            public_key: public_key.into(),
            hash_algorithm,
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ciborium::de::Error<std::io::Error>> {
        ciborium::from_reader(bytes)
    }
}

impl fmt::Debug for CustodianKeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode(&self.public_key);
        let short = if hex.len() > 16 { &hex[..16] } else { &hex };
        write!(f, "CustodianKeyInfo({}, {}...)", self.hash_algorithm, short)
    }
}
