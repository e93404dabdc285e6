//! Test fixtures and helpers.
//!
//! Common setup code for custody tests: a grantor over an in-memory
//! account, a recording event sink, and deterministic custodian key
//! material derived from ed25519 seeds.

use std::sync::Arc;

use ed25519_dalek::SigningKey;

use keywarden::{Custodian, Grantor, MemoryAccount, MemorySink, TOTAL_KEY_WEIGHT};
use keywarden_core::{AccountAddress, CustodianKeyInfo, HashAlgorithm, KeyIndex};

/// One trusted party: an identity plus the key material it registers.
#[derive(Debug, Clone)]
pub struct CustodyParty {
    /// The party's verified account address.
    pub address: AccountAddress,
    /// The replacement credential the party registers.
    pub key_info: CustodianKeyInfo,
}

/// Derive a party deterministically from a single-byte tag.
///
/// The address is the tag repeated; the public key is a real ed25519
/// verifying key derived from a tag-seeded signing key, so key bytes are
/// realistic and stable across runs.
pub fn custodian_party(tag: u8) -> CustodyParty {
    let mut seed = [0u8; 32];
    seed[0] = tag;
    let signing_key = SigningKey::from_bytes(&seed);

    CustodyParty {
        address: AccountAddress::from_bytes([tag; 8]),
        key_info: CustodianKeyInfo::new(
            signing_key.verifying_key().to_bytes().to_vec(),
            HashAlgorithm::Sha3_256,
        ),
    }
}

/// Derive `count` distinct parties (tags 1..=count).
pub fn custodian_parties(count: usize) -> Vec<CustodyParty> {
    (1..=count).map(|i| custodian_party(i as u8)).collect()
}

/// Fresh random key material, for tests that want unique keys per run.
pub fn random_key_info() -> CustodianKeyInfo {
    let signing_key = SigningKey::generate(&mut rand::thread_rng());
    CustodianKeyInfo::new(
        signing_key.verifying_key().to_bytes().to_vec(),
        HashAlgorithm::Sha3_256,
    )
}

/// A grantor over an in-memory account, with a recording sink.
///
/// The account starts with a single full-weight credential at index 0,
/// which is also the grantor's revocation target.
pub struct CustodyFixture {
    /// The owner's address.
    pub owner: AccountAddress,
    /// The target account's address.
    pub account: AccountAddress,
    /// The owner's grantor handle.
    pub grantor: Grantor<MemoryAccount>,
    /// Every event the grantor has emitted.
    pub sink: Arc<MemorySink>,
}

impl CustodyFixture {
    /// Create a fixture with the given quorum and veto window.
    pub fn new(threshold: u32, delay_ms: i64) -> Self {
        let owner = AccountAddress::from_bytes([0x01; 8]);
        let account_address = AccountAddress::from_bytes([0xaa; 8]);
        let account = MemoryAccount::new(account_address).with_credential(
            custodian_party(0).key_info.public_key.clone(),
            HashAlgorithm::Sha2_256,
            TOTAL_KEY_WEIGHT,
        );

        let sink = Arc::new(MemorySink::new());
        let grantor = Grantor::create(
            account,
            owner,
            threshold,
            delay_ms,
            KeyIndex::new(0),
            sink.clone(),
        )
        .expect("fixture grantor should validate");

        Self {
            owner,
            account: account_address,
            grantor,
            sink,
        }
    }

    /// Issue a custodian handle for `party`.
    pub fn custodian(&self, party: &CustodyParty) -> Custodian<MemoryAccount> {
        Custodian::create(
            self.grantor.issue_capability(),
            party.address,
            party.key_info.clone(),
        )
        .expect("fixture custodian should validate")
    }
}
