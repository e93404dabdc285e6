//! # Keywarden Testkit
//!
//! Testing utilities for the Keywarden custody system:
//!
//! - **Fixtures**: a ready-made grantor over an in-memory account with a
//!   recording event sink, plus deterministic custodian parties
//! - **Generators**: proptest strategies for addresses, key material,
//!   quorum sizes, and whole authorization rounds
//!
//! Key material is real ed25519, derived from fixed seeds so tests are
//! reproducible.

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    custodian_parties, custodian_party, random_key_info, CustodyFixture, CustodyParty,
};
