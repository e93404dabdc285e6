//! # Keywarden
//!
//! Delayed, multi-party revocation of a sensitive credential on a
//! custodial account.
//!
//! ## Overview
//!
//! An account owner delegates limited authorization rights to a set of
//! trusted third parties ("custodians"). Any quorum of custodians can
//! jointly start a pending revocation of one credential on the target
//! account; the owner keeps a delay window in which to veto; if
//! unchallenged, any custodian executes the revocation, after which the
//! authorizers are installed as equally-weighted replacement credentials.
//!
//! ## Key Concepts
//!
//! - **Grantor**: the per-account state machine. Idle → Pending (quorum
//!   met, authorizer set frozen) → Executed (terminal).
//! - **Restricted view**: the narrow interface custodians reach through a
//!   [`Capability`] — authorize and execute only, never veto or
//!   reconfigure. The partition is purely type-level.
//! - **Custodian**: a delegated handle bound to one verified party
//!   identity and that party's replacement key material.
//! - **Veto window**: the fixed delay between quorum and execution
//!   eligibility, during which only the owner may cancel.
//!
//! All operations are synchronous single-call transitions. Time is
//! supplied by the host as an explicit Unix-millisecond `now`; nothing
//! executes automatically.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use keywarden::{Custodian, Grantor, MemoryAccount, MemorySink, TOTAL_KEY_WEIGHT};
//! use keywarden::core::{AccountAddress, CustodianKeyInfo, HashAlgorithm, KeyIndex};
//!
//! let owner = AccountAddress::from_bytes([0x01; 8]);
//! let account = MemoryAccount::new(AccountAddress::from_bytes([0xaa; 8]))
//!     .with_credential(vec![0u8; 32], HashAlgorithm::Sha2_256, TOTAL_KEY_WEIGHT);
//!
//! // Owner side: create the grantor (quorum 2, 100 s veto window).
//! let sink = Arc::new(MemorySink::new());
//! let grantor = Grantor::create(account, owner, 2, 100_000, KeyIndex::new(0), sink).unwrap();
//!
//! // Hand one capability to each trusted party.
//! let x = Custodian::create(
//!     grantor.issue_capability(),
//!     AccountAddress::from_bytes([0x02; 8]),
//!     CustodianKeyInfo::new(vec![2u8; 32], HashAlgorithm::Sha3_256),
//! ).unwrap();
//! let y = Custodian::create(
//!     grantor.issue_capability(),
//!     AccountAddress::from_bytes([0x03; 8]),
//!     CustodianKeyInfo::new(vec![3u8; 32], HashAlgorithm::Sha3_256),
//! ).unwrap();
//!
//! // Custodians authorize; the second call freezes the round.
//! x.authorize_revocation(0).unwrap();
//! y.authorize_revocation(10_000).unwrap();
//!
//! // After the window, either custodian executes.
//! x.execute_revocation(110_000).unwrap();
//! ```

pub mod account;
pub mod capability;
pub mod custodian;
pub mod error;
pub mod event;
pub mod grantor;
pub mod paths;

// Re-export the core types crate
pub use keywarden_core as core;

// Re-export main types for convenience
pub use account::{AccountKeyStore, Credential, KeyStoreError, MemoryAccount, TOTAL_KEY_WEIGHT};
pub use capability::Capability;
pub use custodian::Custodian;
pub use error::{Result, WardenError};
pub use event::{EventSink, MemorySink, NullSink, RevocationEvent};
pub use grantor::{Grantor, RestrictedGrantor, RevocationStatus};
