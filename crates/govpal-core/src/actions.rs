//! User actions and the bounded action ledger.
//!
//! Every trackable interaction at the presentation boundary becomes a
//! [`UserAction`]. Actions are immutable once appended; the
//! [`ActionLedger`] keeps only the 10 most recent, evicting strictly FIFO.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Maximum number of actions retained by a ledger.
pub const LEDGER_CAPACITY: usize = 10;

/// Number of most-recent actions behavioral rules consult.
pub const RULE_WINDOW: usize = 5;

/// Kind of tracked user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Free-text search query.
    Query,
    /// Generic UI click.
    Click,
    /// Document opened for viewing.
    OpenDoc,
    /// Statute/code section viewed.
    ViewStatute,
    /// Address selected from a result list.
    SelectAddress,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Click => write!(f, "click"),
            Self::OpenDoc => write!(f, "open_doc"),
            Self::ViewStatute => write!(f, "view_statute"),
            Self::SelectAddress => write!(f, "select_address"),
        }
    }
}

/// A single tracked interaction. Immutable once appended to a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
    /// Interaction kind.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Free-text content (query string, document name, statute ref, …).
    pub content: String,
    /// ISO 8601 timestamp.
    pub timestamp: String,
    /// Opaque boundary-supplied metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl UserAction {
    /// Create an action with the current UTC timestamp.
    ///
    /// Rejects empty/whitespace-only content — malformed records never
    /// reach a ledger.
    pub fn new(action_type: ActionType, content: impl Into<String>) -> Result<Self, CoreError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CoreError::InvalidAction("empty content".into()));
        }
        Ok(Self {
            action_type,
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
            metadata: None,
        })
    }

    /// Attach boundary metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Fixed-capacity FIFO ledger of the most recent user actions.
///
/// INVARIANT: `len() <= LEDGER_CAPACITY` at all times; the oldest entry is
/// evicted first. `append` is the sole mutation.
#[derive(Debug, Clone, Default)]
pub struct ActionLedger {
    entries: VecDeque<UserAction>,
}

impl ActionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LEDGER_CAPACITY),
        }
    }

    /// Append an action, evicting the oldest entry on overflow.
    pub fn append(&mut self, action: UserAction) {
        if self.entries.len() == LEDGER_CAPACITY {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(action);
    }

    /// Number of retained actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All retained actions, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &UserAction> {
        self.entries.iter()
    }

    /// The most recent `n` actions, oldest first.
    ///
    /// Behavioral rules call this with [`RULE_WINDOW`].
    #[must_use]
    pub fn window(&self, n: usize) -> Vec<&UserAction> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }
}
