//! Notification events produced by the revocation lifecycle.
//!
//! The grantor reports every state transition to an [`EventSink`] supplied
//! at construction. Delivery is synchronous and fire-and-forget; a sink
//! must never fail back into the state machine.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use keywarden_core::AccountAddress;

/// A notification emitted by a grantor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevocationEvent {
    /// A custodian's authorization was recorded.
    AuthorizationRecorded {
        /// The target account.
        account: AccountAddress,
        /// The authorizing party.
        authorizer: AccountAddress,
        /// The owner of the grantor.
        grantor_owner: AccountAddress,
        /// When execution becomes legal (Unix ms). Present only on the
        /// authorization that met the quorum.
        execution_eligible_at: Option<i64>,
    },

    /// The owner vetoed the current authorization round.
    RevocationVetoed {
        /// The target account.
        account: AccountAddress,
        /// The owner of the grantor, when known.
        grantor_owner: Option<AccountAddress>,
    },

    /// The revocation executed and replacement credentials were installed.
    RevocationExecuted {
        /// The target account.
        account: AccountAddress,
        /// Every authorizer in the frozen quorum.
        authorizers: Vec<AccountAddress>,
    },
}

/// Receiver for revocation events.
pub trait EventSink: Send + Sync {
    /// Deliver one event. Must not panic and must not block indefinitely.
    fn emit(&self, event: RevocationEvent);
}

/// In-memory sink that records every event, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RwLock<Vec<RevocationEvent>>,
}

impl MemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far, in order.
    pub fn events(&self) -> Vec<RevocationEvent> {
        self.events.read().unwrap().clone()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<RevocationEvent> {
        std::mem::take(&mut *self.events.write().unwrap())
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: RevocationEvent) {
        self.events.write().unwrap().push(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: RevocationEvent) {}
}
