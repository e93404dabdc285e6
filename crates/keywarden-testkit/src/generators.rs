//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ed25519_dalek::SigningKey;

use keywarden_core::{AccountAddress, CustodianKeyInfo, HashAlgorithm, KeyIndex};

/// Generate a random account address.
pub fn account_address() -> impl Strategy<Value = AccountAddress> {
    any::<[u8; 8]>().prop_map(AccountAddress::from_bytes)
}

/// Generate a random key index.
pub fn key_index() -> impl Strategy<Value = KeyIndex> {
    (0u32..=1024).prop_map(KeyIndex::new)
}

/// Generate a hash algorithm.
pub fn hash_algorithm() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![
        Just(HashAlgorithm::Sha2_256),
        Just(HashAlgorithm::Sha2_384),
        Just(HashAlgorithm::Sha3_256),
        Just(HashAlgorithm::Sha3_384),
    ]
}

/// Generate custodian key info with a real ed25519 public key.
pub fn custodian_key_info() -> impl Strategy<Value = CustodianKeyInfo> {
    (any::<[u8; 32]>(), hash_algorithm()).prop_map(|(seed, alg)| {
        let signing_key = SigningKey::from_bytes(&seed);
        CustodianKeyInfo::new(signing_key.verifying_key().to_bytes().to_vec(), alg)
    })
}

/// Generate a positive quorum size.
pub fn threshold() -> impl Strategy<Value = u32> {
    1u32..=8
}

/// Generate a non-negative delay in milliseconds.
pub fn delay_ms() -> impl Strategy<Value = i64> {
    0i64..=1_000_000
}

/// Distinct authorizer identities plus a threshold no larger than their
/// count: one complete authorization round.
pub fn authorization_round() -> impl Strategy<Value = (Vec<AccountAddress>, u32)> {
    prop::collection::btree_set(account_address(), 1..6usize).prop_flat_map(|set| {
        let addresses: Vec<_> = set.into_iter().collect();
        let count = addresses.len() as u32;
        (Just(addresses), 1..=count)
    })
}
