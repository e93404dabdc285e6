//! The grantor: the per-account revocation state machine.
//!
//! A grantor moves through three states:
//!
//! - **Idle**: collecting authorizations, no quorum yet.
//! - **Pending**: quorum met, authorizer set frozen, veto window running.
//! - **Executed**: credential rotated, terminal.
//!
//! The state is split across two types. [`RestrictedGrantor`] is the
//! narrow view custodians reach through a [`Capability`]; it exposes only
//! [`revoke`](RestrictedGrantor::revoke) and
//! [`execute_revocation`](RestrictedGrantor::execute_revocation).
//! [`Grantor`] is the owner's handle; it holds the only strong reference
//! to the shared state and additionally exposes veto, reconfiguration,
//! and inspection. The partition is enforced by the type system alone;
//! there is no runtime role check.
//!
//! Time is never read internally. Every time-sensitive operation takes an
//! explicit `now` (Unix milliseconds) from the host, so execution only
//! happens when an authenticated caller asks for it after the delay.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use keywarden_core::{AccountAddress, CustodianKeyInfo, KeyIndex};

use crate::account::{AccountKeyStore, TOTAL_KEY_WEIGHT};
use crate::capability::Capability;
use crate::error::{Result, WardenError};
use crate::event::{EventSink, RevocationEvent};

/// Owner-visible summary of a grantor's lifecycle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationStatus {
    /// No quorum yet; authorizations are being collected.
    Idle,
    /// Quorum met; execution becomes legal at `eligible_at` (Unix ms).
    Pending {
        /// First timestamp at which `execute_revocation` may succeed.
        eligible_at: i64,
    },
    /// The revocation executed. Terminal.
    Executed,
}

struct GrantorState<S> {
    account: S,
    owner: AccountAddress,
    authorizations: BTreeMap<AccountAddress, CustodianKeyInfo>,
    authorization_threshold: u32,
    revocation_delay_ms: i64,
    target_key_index: KeyIndex,
    revocation_timestamp: Option<i64>,
    revoked: bool,
}

impl<S> GrantorState<S> {
    fn state_name(&self) -> &'static str {
        if self.revoked {
            "executed"
        } else if self.revocation_timestamp.is_some() {
            "pending"
        } else {
            "idle"
        }
    }
}

/// The narrow view of a grantor reachable through a capability.
///
/// Custodians can record authorizations and trigger execution, but cannot
/// veto, retarget, or read the authorizer map.
pub struct RestrictedGrantor<S: AccountKeyStore> {
    state: Mutex<GrantorState<S>>,
    sink: Arc<dyn EventSink>,
}

impl<S: AccountKeyStore> RestrictedGrantor<S> {
    /// Record one custodian authorization.
    ///
    /// A repeated `authorizer` fails with
    /// [`WardenError::DuplicateAuthorization`] in every state. A new
    /// authorizer is only accepted while the round is still open: once
    /// the quorum is met the set is frozen and further calls fail with
    /// [`WardenError::StateConflict`]. The call that brings the count to
    /// exactly the threshold stamps the revocation timestamp, fixing both
    /// the replacement-key set and the execution-eligible time.
    pub fn revoke(
        &self,
        authorizer: AccountAddress,
        key_info: CustodianKeyInfo,
        now: i64,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        if state.authorizations.contains_key(&authorizer) {
            return Err(WardenError::DuplicateAuthorization(authorizer));
        }
        if state.revoked {
            return Err(WardenError::StateConflict {
                operation: "revoke",
                state: "executed",
            });
        }
        if state.revocation_timestamp.is_some() {
            return Err(WardenError::StateConflict {
                operation: "revoke",
                state: "pending",
            });
        }

        state.authorizations.insert(authorizer, key_info);

        if state.authorizations.len() as u32 == state.authorization_threshold {
            state.revocation_timestamp = Some(now);
            tracing::info!(
                account = %state.account.address(),
                quorum = state.authorization_threshold,
                eligible_at = now + state.revocation_delay_ms,
                "authorization quorum met, authorizer set frozen"
            );
        } else {
            tracing::debug!(
                account = %state.account.address(),
                authorizer = %authorizer,
                count = state.authorizations.len(),
                "authorization recorded"
            );
        }

        let event = RevocationEvent::AuthorizationRecorded {
            account: state.account.address(),
            authorizer,
            grantor_owner: state.owner,
            execution_eligible_at: state
                .revocation_timestamp
                .map(|ts| ts + state.revocation_delay_ms),
        };
        drop(state);
        self.sink.emit(event);
        Ok(())
    }

    /// Execute the frozen revocation round.
    ///
    /// Requires the Pending state and an elapsed delay. On success the
    /// target credential is revoked, one replacement credential per
    /// authorizer is installed at an equal share of
    /// [`TOTAL_KEY_WEIGHT`], and the grantor becomes Executed forever.
    /// The local seal is only applied after every key-store call
    /// succeeded; rollback of the store itself belongs to the enclosing
    /// transaction.
    pub fn execute_revocation(&self, now: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();

        if state.revoked {
            return Err(WardenError::StateConflict {
                operation: "execute_revocation",
                state: "executed",
            });
        }
        let stamped = match state.revocation_timestamp {
            Some(ts) => ts,
            None => {
                return Err(WardenError::StateConflict {
                    operation: "execute_revocation",
                    state: "idle",
                })
            }
        };

        let eligible_at = stamped + state.revocation_delay_ms;
        if now < eligible_at {
            return Err(WardenError::PrematureExecution { eligible_at, now });
        }

        let st = &mut *state;
        st.account.revoke_credential(st.target_key_index)?;

        let share = TOTAL_KEY_WEIGHT / st.authorizations.len() as f64;
        for key_info in st.authorizations.values() {
            st.account
                .add_credential(&key_info.public_key, key_info.hash_algorithm, share)?;
        }

        st.revoked = true;
        tracing::info!(
            account = %st.account.address(),
            target = %st.target_key_index,
            replacements = st.authorizations.len(),
            share_weight = share,
            "revocation executed"
        );

        let event = RevocationEvent::RevocationExecuted {
            account: st.account.address(),
            authorizers: st.authorizations.keys().copied().collect(),
        };
        drop(state);
        self.sink.emit(event);
        Ok(())
    }
}

/// The owner's handle to a grantor.
///
/// Holds the only strong reference to the shared state; dropping it
/// invalidates every capability issued through
/// [`issue_capability`](Grantor::issue_capability).
pub struct Grantor<S: AccountKeyStore> {
    inner: Arc<RestrictedGrantor<S>>,
}

impl<S: AccountKeyStore> Grantor<S> {
    /// Create a grantor over `account`, owned by `owner`.
    ///
    /// Takes the account handle by value: the grantor is the account's
    /// single writer for the lifetime of the custody arrangement. Fails
    /// with [`WardenError::Validation`] if the account handle fails its
    /// validity check, the threshold is zero, or the delay is negative.
    pub fn create(
        account: S,
        owner: AccountAddress,
        authorization_threshold: u32,
        revocation_delay_ms: i64,
        target_key_index: KeyIndex,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        if !account.check() {
            return Err(WardenError::Validation(
                "account key store failed its validity check".into(),
            ));
        }
        if authorization_threshold == 0 {
            return Err(WardenError::Validation(
                "authorization threshold must be positive".into(),
            ));
        }
        if revocation_delay_ms < 0 {
            return Err(WardenError::Validation(
                "revocation delay must not be negative".into(),
            ));
        }

        Ok(Self {
            inner: Arc::new(RestrictedGrantor {
                state: Mutex::new(GrantorState {
                    account,
                    owner,
                    authorizations: BTreeMap::new(),
                    authorization_threshold,
                    revocation_delay_ms,
                    target_key_index,
                    revocation_timestamp: None,
                    revoked: false,
                }),
                sink,
            }),
        })
    }

    /// Issue a capability to the restricted view.
    ///
    /// One capability is typically handed to each custodian. All issued
    /// capabilities are invalidated together when this handle is dropped.
    pub fn issue_capability(&self) -> Capability<RestrictedGrantor<S>> {
        Capability::new(&self.inner)
    }

    /// Cancel the current authorization round.
    ///
    /// Clears the authorizer set and the frozen timestamp together,
    /// returning the grantor to Idle. The target key index and the
    /// quorum/delay configuration are untouched. Fails once Executed.
    pub fn veto(&self) -> Result<()> {
        let mut state = self.inner.state.lock().unwrap();

        if state.revoked {
            return Err(WardenError::StateConflict {
                operation: "veto",
                state: "executed",
            });
        }

        state.authorizations.clear();
        state.revocation_timestamp = None;
        tracing::info!(account = %state.account.address(), "revocation vetoed by owner");

        let event = RevocationEvent::RevocationVetoed {
            account: state.account.address(),
            grantor_owner: Some(state.owner),
        };
        drop(state);
        self.inner.sink.emit(event);
        Ok(())
    }

    /// Point the grantor at a different credential index.
    ///
    /// Takes effect on the next execution. Fails once Executed.
    pub fn update_target_key_index(&self, new_index: KeyIndex) -> Result<()> {
        let mut state = self.inner.state.lock().unwrap();

        if state.revoked {
            return Err(WardenError::StateConflict {
                operation: "update_target_key_index",
                state: "executed",
            });
        }

        state.target_key_index = new_index;
        Ok(())
    }

    /// Current lifecycle position.
    pub fn status(&self) -> RevocationStatus {
        let state = self.inner.state.lock().unwrap();
        if state.revoked {
            RevocationStatus::Executed
        } else {
            match state.revocation_timestamp {
                Some(ts) => RevocationStatus::Pending {
                    eligible_at: ts + state.revocation_delay_ms,
                },
                None => RevocationStatus::Idle,
            }
        }
    }

    /// Number of authorizations recorded in the current round.
    pub fn authorization_count(&self) -> usize {
        self.inner.state.lock().unwrap().authorizations.len()
    }

    /// Identities that have authorized in the current round.
    pub fn authorizers(&self) -> Vec<AccountAddress> {
        self.inner
            .state
            .lock()
            .unwrap()
            .authorizations
            .keys()
            .copied()
            .collect()
    }

    /// The credential index the next execution will revoke.
    pub fn target_key_index(&self) -> KeyIndex {
        self.inner.state.lock().unwrap().target_key_index
    }

    /// The owner this grantor was created for.
    pub fn owner(&self) -> AccountAddress {
        self.inner.state.lock().unwrap().owner
    }

    /// Run `f` against the account handle, for owner-side inspection.
    pub fn with_account<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.inner.state.lock().unwrap();
        f(&state.account)
    }
}

impl<S: AccountKeyStore> std::fmt::Debug for Grantor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock().unwrap();
        f.debug_struct("Grantor")
            .field("owner", &state.owner)
            .field("account", &state.account.address())
            .field("threshold", &state.authorization_threshold)
            .field("state", &state.state_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MemoryAccount;
    use crate::event::MemorySink;
    use keywarden_core::HashAlgorithm;

    fn party(tag: u8) -> AccountAddress {
        AccountAddress::from_bytes([tag; 8])
    }

    fn key_info(tag: u8) -> CustodianKeyInfo {
        CustodianKeyInfo::new(vec![tag; 32], HashAlgorithm::Sha3_256)
    }

    fn grantor(threshold: u32, delay_ms: i64) -> (Grantor<MemoryAccount>, Arc<MemorySink>) {
        let account = MemoryAccount::new(party(0xaa)).with_credential(
            vec![0x00; 32],
            HashAlgorithm::Sha2_256,
            TOTAL_KEY_WEIGHT,
        );
        let sink = Arc::new(MemorySink::new());
        let grantor = Grantor::create(
            account,
            party(0x01),
            threshold,
            delay_ms,
            KeyIndex::new(0),
            sink.clone(),
        )
        .unwrap();
        (grantor, sink)
    }

    #[test]
    fn test_create_rejects_zero_threshold() {
        let account = MemoryAccount::new(party(0xaa));
        let result = Grantor::create(
            account,
            party(0x01),
            0,
            1_000,
            KeyIndex::new(0),
            Arc::new(MemorySink::new()),
        );
        assert!(matches!(result, Err(WardenError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_negative_delay() {
        let account = MemoryAccount::new(party(0xaa));
        let result = Grantor::create(
            account,
            party(0x01),
            1,
            -1,
            KeyIndex::new(0),
            Arc::new(MemorySink::new()),
        );
        assert!(matches!(result, Err(WardenError::Validation(_))));
    }

    #[test]
    fn test_timestamp_frozen_exactly_at_threshold() {
        let (grantor, _sink) = grantor(3, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 10).unwrap();
        assert_eq!(grantor.status(), RevocationStatus::Idle);

        view.revoke(party(2), key_info(2), 20).unwrap();
        assert_eq!(grantor.status(), RevocationStatus::Idle);

        view.revoke(party(3), key_info(3), 30).unwrap();
        assert_eq!(
            grantor.status(),
            RevocationStatus::Pending { eligible_at: 130 }
        );
    }

    #[test]
    fn test_revoke_rejected_once_frozen() {
        let (grantor, _sink) = grantor(1, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 0).unwrap();

        let err = view.revoke(party(2), key_info(2), 1).unwrap_err();
        assert!(matches!(
            err,
            WardenError::StateConflict {
                operation: "revoke",
                state: "pending"
            }
        ));
        assert_eq!(grantor.authorization_count(), 1);
    }

    #[test]
    fn test_duplicate_authorizer_rejected_in_any_state() {
        let (grantor, _sink) = grantor(2, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 0).unwrap();
        // Idle: duplicate before quorum.
        assert!(matches!(
            view.revoke(party(1), key_info(1), 1),
            Err(WardenError::DuplicateAuthorization(_))
        ));

        view.revoke(party(2), key_info(2), 5).unwrap();
        // Pending: duplicate wins over the frozen-round conflict.
        assert!(matches!(
            view.revoke(party(1), key_info(1), 6),
            Err(WardenError::DuplicateAuthorization(_))
        ));

        view.execute_revocation(200).unwrap();
        // Executed: still a duplicate.
        assert!(matches!(
            view.revoke(party(2), key_info(2), 201),
            Err(WardenError::DuplicateAuthorization(_))
        ));
    }

    #[test]
    fn test_execute_before_quorum_is_state_conflict() {
        let (grantor, _sink) = grantor(2, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        assert!(matches!(
            view.execute_revocation(1_000),
            Err(WardenError::StateConflict {
                operation: "execute_revocation",
                state: "idle"
            })
        ));
    }

    #[test]
    fn test_execute_before_delay_is_premature() {
        let (grantor, _sink) = grantor(1, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 50).unwrap();

        let err = view.execute_revocation(149).unwrap_err();
        assert!(matches!(
            err,
            WardenError::PrematureExecution {
                eligible_at: 150,
                now: 149
            }
        ));

        // Boundary: eligible exactly at stamp + delay.
        view.execute_revocation(150).unwrap();
        assert_eq!(grantor.status(), RevocationStatus::Executed);
    }

    #[test]
    fn test_execute_is_exactly_once() {
        let (grantor, _sink) = grantor(1, 0);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 0).unwrap();
        view.execute_revocation(0).unwrap();

        assert!(matches!(
            view.execute_revocation(1),
            Err(WardenError::StateConflict {
                operation: "execute_revocation",
                state: "executed"
            })
        ));
        // The account was mutated exactly once.
        grantor.with_account(|acct| {
            assert!(acct.credential(KeyIndex::new(0)).unwrap().revoked);
            assert_eq!(acct.credentials().len(), 2);
        });
    }

    #[test]
    fn test_veto_clears_round_atomically() {
        let (grantor, _sink) = grantor(2, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 0).unwrap();
        view.revoke(party(2), key_info(2), 10).unwrap();
        assert!(matches!(grantor.status(), RevocationStatus::Pending { .. }));

        grantor.veto().unwrap();
        assert_eq!(grantor.status(), RevocationStatus::Idle);
        assert_eq!(grantor.authorization_count(), 0);

        // Previous authorizers may start over.
        view.revoke(party(1), key_info(1), 20).unwrap();
        assert_eq!(grantor.authorization_count(), 1);
    }

    #[test]
    fn test_veto_rejected_after_execution() {
        let (grantor, _sink) = grantor(1, 0);
        let view = grantor.issue_capability();
        view.borrow().unwrap().revoke(party(1), key_info(1), 0).unwrap();
        view.borrow().unwrap().execute_revocation(0).unwrap();

        assert!(matches!(
            grantor.veto(),
            Err(WardenError::StateConflict {
                operation: "veto",
                state: "executed"
            })
        ));
    }

    #[test]
    fn test_update_target_applies_to_next_execution() {
        let account = MemoryAccount::new(party(0xaa))
            .with_credential(vec![0x00; 32], HashAlgorithm::Sha2_256, 500.0)
            .with_credential(vec![0x01; 32], HashAlgorithm::Sha2_256, 500.0);
        let grantor = Grantor::create(
            account,
            party(0x01),
            1,
            0,
            KeyIndex::new(0),
            Arc::new(MemorySink::new()),
        )
        .unwrap();
        let view = grantor.issue_capability();

        grantor.update_target_key_index(KeyIndex::new(1)).unwrap();
        assert_eq!(grantor.target_key_index(), KeyIndex::new(1));

        view.borrow().unwrap().revoke(party(1), key_info(1), 0).unwrap();
        view.borrow().unwrap().execute_revocation(0).unwrap();

        grantor.with_account(|acct| {
            assert!(!acct.credential(KeyIndex::new(0)).unwrap().revoked);
            assert!(acct.credential(KeyIndex::new(1)).unwrap().revoked);
        });

        assert!(matches!(
            grantor.update_target_key_index(KeyIndex::new(0)),
            Err(WardenError::StateConflict { .. })
        ));
    }

    #[test]
    fn test_capabilities_die_with_owner_handle() {
        let (grantor, _sink) = grantor(1, 0);
        let cap = grantor.issue_capability();
        assert!(cap.check());

        drop(grantor);
        assert!(!cap.check());
        assert!(matches!(cap.borrow(), Err(WardenError::Access(_))));
    }

    #[test]
    fn test_eligible_time_only_on_freezing_authorization() {
        let (grantor, sink) = grantor(2, 100);
        let view = grantor.issue_capability();
        let view = view.borrow().unwrap();

        view.revoke(party(1), key_info(1), 0).unwrap();
        view.revoke(party(2), key_info(2), 10).unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            RevocationEvent::AuthorizationRecorded {
                execution_eligible_at: None,
                ..
            }
        ));
        assert!(matches!(
            events[1],
            RevocationEvent::AuthorizationRecorded {
                execution_eligible_at: Some(110),
                ..
            }
        ));
    }
}
