//! Change-notification payloads
//!
//! The store broadcasts a [`ChangeEvent`] for every row-level mutation of
//! the `pedido` table. The payload is deliberately thin: it signals that
//! *something* changed, not what. Consumers must treat every event as
//! "re-fetch the relevant view". The notification may race with
//! read-your-write visibility, may coalesce, and may be dropped under
//! load. Level-triggered, not edge-precise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row-level mutation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Change notification for one row of the `pedido` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Mutation kind
    pub action: ChangeAction,
    /// Affected record ID (`pedido:<key>`); advisory only
    pub id: String,
}

impl ChangeEvent {
    pub fn new(action: ChangeAction, id: impl Into<String>) -> Self {
        Self {
            action,
            id: id.into(),
        }
    }
}
