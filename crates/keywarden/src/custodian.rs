//! The custodian: a delegated handle held by one trusted party.
//!
//! A custodian wraps a capability to a grantor's restricted view together
//! with the holder's own identity and replacement key material. Both
//! operations are pass-throughs; all protocol state lives in the grantor.
//!
//! The authorizer identity is bound once, at construction, by whatever
//! authentication layer hands the custodian out. Neither operation
//! accepts a caller-supplied identity, so a holder can only ever
//! authorize as itself.

use keywarden_core::{AccountAddress, CustodianKeyInfo};

use crate::account::AccountKeyStore;
use crate::capability::Capability;
use crate::error::{Result, WardenError};
use crate::grantor::RestrictedGrantor;

/// Delegated authorize/execute handle for one trusted party.
///
/// Meant to be held by exactly one party; transfer it by moving it.
/// The wrapped capability is immutable after construction.
pub struct Custodian<S: AccountKeyStore> {
    revokable: Capability<RestrictedGrantor<S>>,
    key_info: CustodianKeyInfo,
    party: AccountAddress,
}

impl<S: AccountKeyStore> Custodian<S> {
    /// Create a custodian for `party`.
    ///
    /// `party` must be the verified identity of the handle's holder; the
    /// calling authentication layer is responsible for that guarantee.
    /// Fails with [`WardenError::Validation`] if the capability fails its
    /// validity check.
    pub fn create(
        revokable: Capability<RestrictedGrantor<S>>,
        party: AccountAddress,
        key_info: CustodianKeyInfo,
    ) -> Result<Self> {
        if !revokable.check() {
            return Err(WardenError::Validation(
                "restricted grantor capability failed its validity check".into(),
            ));
        }
        Ok(Self {
            revokable,
            key_info,
            party,
        })
    }

    /// Record this party's authorization for the pending revocation.
    pub fn authorize_revocation(&self, now: i64) -> Result<()> {
        self.revokable
            .borrow()?
            .revoke(self.party, self.key_info.clone(), now)
    }

    /// Execute the revocation once the veto window has elapsed.
    pub fn execute_revocation(&self, now: i64) -> Result<()> {
        self.revokable.borrow()?.execute_revocation(now)
    }

    /// The identity this custodian authorizes as.
    pub fn party(&self) -> AccountAddress {
        self.party
    }

    /// The replacement key material this custodian registered.
    pub fn key_info(&self) -> &CustodianKeyInfo {
        &self.key_info
    }
}

impl<S: AccountKeyStore> std::fmt::Debug for Custodian<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custodian")
            .field("party", &self.party)
            .field("key_info", &self.key_info)
            .field("capability_valid", &self.revokable.check())
            .finish()
    }
}
