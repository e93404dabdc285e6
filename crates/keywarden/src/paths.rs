//! Persisted storage locations.
//!
//! Hosts that persist custody objects do so under three fixed slots.
//! These are conventions shared with external bookkeeping, not tunable
//! parameters; the state machine itself never reads them.

/// Slot for the grantor instance, under the owner's account.
pub const GRANTOR_STORAGE_PATH: &str = "keywarden/grantor";

/// Slot for the restricted-view capability issued to custodians.
pub const RESTRICTED_GRANTOR_PATH: &str = "keywarden/grantorRestricted";

/// Slot for a custodian instance, under the trusted party's account.
pub const CUSTODIAN_STORAGE_PATH: &str = "keywarden/custodian";
