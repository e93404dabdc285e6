//! Strong type definitions for Keywarden.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-byte account address.
///
/// Identifies both target accounts and authorizing parties. Authorizer
/// attribution in the revocation protocol is keyed by this type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountAddress(pub [u8; 8]);

impl AccountAddress {
    /// Create a new AccountAddress from raw bytes.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 8 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero address (used as a sentinel).
    pub const ZERO: Self = Self([0u8; 8]);
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress(0x{})", self.to_hex())
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 8]> for AccountAddress {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

/// Position of a credential in an account's key list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyIndex(pub u32);

impl KeyIndex {
    /// Create a new KeyIndex.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyIndex({})", self.0)
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for KeyIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_address_hex_roundtrip() {
        let addr = AccountAddress::from_bytes([0x42; 8]);
        let hex = addr.to_hex();
        let recovered = AccountAddress::from_hex(&hex).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn test_account_address_rejects_wrong_length() {
        assert!(AccountAddress::from_hex("abcd").is_err());
        assert!(AccountAddress::from_hex("0011223344556677aa").is_err());
    }

    #[test]
    fn test_account_address_display() {
        let addr = AccountAddress::from_bytes([0xab; 8]);
        assert_eq!(format!("{}", addr), "0xabababababababab");
    }

    #[test]
    fn test_account_address_serde_roundtrip() {
        let addr = AccountAddress::from_bytes([0x07; 8]);
        let json = serde_json::to_string(&addr).unwrap();
        let recovered: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn test_key_index_ordering() {
        assert!(KeyIndex::new(1) < KeyIndex::new(2));
        assert_eq!(KeyIndex::from(7).value(), 7);
    }
}
