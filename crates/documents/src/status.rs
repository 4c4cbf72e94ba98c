//! Document status lifecycle.
//!
//! The single transition table for all document kinds; legality is checked
//! here and nowhere else.

use serde::{Deserialize, Serialize};

/// Lifecycle states shared by all document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Waiting,
    Ready,
    Done,
    Canceled,
}

impl DocumentStatus {
    /// Done and canceled are terminal; no transitions leave them.
    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentStatus::Done | DocumentStatus::Canceled)
    }

    /// Whether `self → to` is a legal transition.
    ///
    /// `draft → {waiting, ready, done, canceled}`,
    /// `waiting → {ready, done, canceled}` (picking promotes a waiting
    /// delivery to ready), `ready → {done, canceled}`.
    pub fn can_transition(self, to: DocumentStatus) -> bool {
        use DocumentStatus::*;
        match (self, to) {
            (Draft, Waiting | Ready | Done | Canceled) => true,
            (Waiting, Ready | Done | Canceled) => true,
            (Ready, Done | Canceled) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Waiting => "waiting",
            DocumentStatus::Ready => "ready",
            DocumentStatus::Done => "done",
            DocumentStatus::Canceled => "canceled",
        }
    }
}
