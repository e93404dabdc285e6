//! Account key store: the abstract interface to the target account's
//! credential set.
//!
//! The grantor mutates the target account only through this trait, and
//! only inside `execute_revocation`. Implementations are expected to be
//! synchronous and atomic within the caller's enclosing transaction, and
//! to fail loudly on invalid indices.

use thiserror::Error;

use keywarden_core::{AccountAddress, HashAlgorithm, KeyIndex};

/// Fixed total weight budget split equally among replacement credentials.
pub const TOTAL_KEY_WEIGHT: f64 = 1000.0;

/// Errors from account key store primitives.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// No credential exists at the given index.
    #[error("no credential at index {0}")]
    UnknownKeyIndex(KeyIndex),

    /// The credential at the given index was already revoked.
    #[error("credential at index {0} is already revoked")]
    CredentialRevoked(KeyIndex),

    /// The account handle is no longer usable.
    #[error("account unavailable: {0}")]
    Unavailable(String),
}

/// Handle to one account's credential set.
///
/// Held exclusively by a single grantor; both mutating primitives take
/// `&mut self` so the type system rules out concurrent writers.
pub trait AccountKeyStore: Send {
    /// The address of the account this handle controls.
    fn address(&self) -> AccountAddress;

    /// Whether the handle is still valid for use.
    fn check(&self) -> bool;

    /// Revoke the credential at `index`.
    fn revoke_credential(&mut self, index: KeyIndex) -> Result<(), KeyStoreError>;

    /// Add a credential with the given key material and weight.
    ///
    /// Returns the index the new credential was installed at.
    fn add_credential(
        &mut self,
        public_key: &[u8],
        hash_algorithm: HashAlgorithm,
        weight: f64,
    ) -> Result<KeyIndex, KeyStoreError>;
}

/// One credential in a [`MemoryAccount`].
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    /// Raw public key bytes.
    pub public_key: Vec<u8>,
    /// Hash algorithm the account verifies this key with.
    pub hash_algorithm: HashAlgorithm,
    /// Signing weight of this credential.
    pub weight: f64,
    /// Whether the credential has been revoked.
    pub revoked: bool,
}

/// In-memory account key store.
///
/// This is primarily for testing and embedding. Revoked credentials keep
/// their index; new credentials always append.
#[derive(Debug)]
pub struct MemoryAccount {
    address: AccountAddress,
    credentials: Vec<Credential>,
}

impl MemoryAccount {
    /// Create a new account with an empty credential set.
    pub fn new(address: AccountAddress) -> Self {
        Self {
            address,
            credentials: Vec::new(),
        }
    }

    /// Append a credential at the next index, builder style.
    pub fn with_credential(
        mut self,
        public_key: impl Into<Vec<u8>>,
        hash_algorithm: HashAlgorithm,
        weight: f64,
    ) -> Self {
        self.credentials.push(Credential {
            public_key: public_key.into(),
            hash_algorithm,
            weight,
            revoked: false,
        });
        self
    }

    /// Get the credential at `index`, if any.
    pub fn credential(&self, index: KeyIndex) -> Option<&Credential> {
        self.credentials.get(index.value() as usize)
    }

    /// All credentials, revoked ones included, in index order.
    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    /// Sum of the weights of all non-revoked credentials.
    pub fn active_weight(&self) -> f64 {
        self.credentials
            .iter()
            .filter(|c| !c.revoked)
            .map(|c| c.weight)
            .sum()
    }
}

impl AccountKeyStore for MemoryAccount {
    fn address(&self) -> AccountAddress {
        self.address
    }

    fn check(&self) -> bool {
        true
    }

    fn revoke_credential(&mut self, index: KeyIndex) -> Result<(), KeyStoreError> {
        let credential = self
            .credentials
            .get_mut(index.value() as usize)
            .ok_or(KeyStoreError::UnknownKeyIndex(index))?;

        if credential.revoked {
            return Err(KeyStoreError::CredentialRevoked(index));
        }

        credential.revoked = true;
        Ok(())
    }

    fn add_credential(
        &mut self,
        public_key: &[u8],
        hash_algorithm: HashAlgorithm,
        weight: f64,
    ) -> Result<KeyIndex, KeyStoreError> {
        self.credentials.push(Credential {
            public_key: public_key.to_vec(),
            hash_algorithm,
            weight,
            revoked: false,
        });
        Ok(KeyIndex::new((self.credentials.len() - 1) as u32))
    }
}
