//! # Keywarden Core
//!
//! Core value types for the Keywarden custody system.
//!
//! This crate holds the leaf types shared by the state machine and its
//! callers:
//!
//! - [`AccountAddress`]: identity of an account or authorizing party
//! - [`KeyIndex`]: position of a credential in an account's key list
//! - [`CustodianKeyInfo`]: the public key a custodian registers as its
//!   replacement credential, plus its [`HashAlgorithm`]
//!
//! All types are plain values with no behavior beyond construction,
//! display, and CBOR encoding.

pub mod keys;
pub mod types;

pub use keys::{CustodianKeyInfo, HashAlgorithm};
pub use types::{AccountAddress, KeyIndex};
