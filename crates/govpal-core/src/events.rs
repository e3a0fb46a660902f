//! Adaptation events and the append-only audit log.
//!
//! Every autonomous change to the visible widget set — and every
//! user-initiated removal — is recorded as an [`AdaptationEvent`]. Events
//! are immutable once appended; the [`AdaptationLog`] only grows.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids;

/// Trigger label for user-initiated widget removal.
pub const TRIGGER_USER_DISMISSED: &str = "user_dismissed";

/// One recorded adaptation.
///
/// INVARIANT: exactly one of `widgets_added` / `widgets_removed` is
/// non-empty. Use [`AdaptationEvent::added`] / [`AdaptationEvent::removed`]
/// — they enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationEvent {
    /// Event id (`adp_<uuidv7>`).
    pub id: String,
    /// Label of the rule (or `user_dismissed`) that produced this event.
    pub trigger: String,
    /// Human-readable summary for the audit display.
    pub description: String,
    /// ISO 8601 timestamp.
    pub timestamp: String,
    /// Widget ids injected by this adaptation.
    pub widgets_added: Vec<String>,
    /// Widget ids removed by this adaptation.
    pub widgets_removed: Vec<String>,
}

impl AdaptationEvent {
    /// Record a widget injection.
    ///
    /// Errors if `widget_ids` is empty — an event must describe a change.
    pub fn added(
        trigger: impl Into<String>,
        description: impl Into<String>,
        widget_ids: Vec<String>,
    ) -> Result<Self, CoreError> {
        if widget_ids.is_empty() {
            return Err(CoreError::InvalidEvent("no widgets added".into()));
        }
        Ok(Self {
            id: ids::adaptation_id(),
            trigger: trigger.into(),
            description: description.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            widgets_added: widget_ids,
            widgets_removed: Vec::new(),
        })
    }

    /// Record a widget removal.
    pub fn removed(
        trigger: impl Into<String>,
        description: impl Into<String>,
        widget_ids: Vec<String>,
    ) -> Result<Self, CoreError> {
        if widget_ids.is_empty() {
            return Err(CoreError::InvalidEvent("no widgets removed".into()));
        }
        Ok(Self {
            id: ids::adaptation_id(),
            trigger: trigger.into(),
            description: description.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            widgets_added: Vec::new(),
            widgets_removed: widget_ids,
        })
    }
}

/// Append-only, session-scoped adaptation history.
#[derive(Debug, Clone, Default)]
pub struct AdaptationLog {
    events: Vec<AdaptationEvent>,
}

impl AdaptationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event. Events are never mutated or deleted afterwards.
    pub fn append(&mut self, event: AdaptationEvent) {
        self.events.push(event);
    }

    /// The last `n` events, most recent first (audit display order).
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&AdaptationEvent> {
        self.events.iter().rev().take(n).collect()
    }

    /// Total number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether anything has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AdaptationEvent> {
        self.events.iter()
    }
}
