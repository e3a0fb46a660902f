//! Request and response bodies.
//!
//! All bodies use `camelCase` field names. Engine-owned types
//! (`WidgetInstance`, `AdaptationEvent`, `ProjectProposal`) serialize
//! directly; this module only adds the envelopes around them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use govpal_core::actions::ActionType;
use govpal_core::documents::DocumentAnalysisResult;
use govpal_core::events::AdaptationEvent;
use govpal_core::widgets::WidgetInstance;
use govpal_engine::ProjectProposal;

/// POST /sessions
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    /// Department id; settings default when omitted.
    pub department_id: Option<String>,
    /// Role id; settings default when omitted.
    pub role: Option<String>,
}

/// Session envelope returned on create and switch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Session id.
    pub session_id: String,
    /// Active department.
    pub department_id: String,
    /// Active role.
    pub role: String,
}

/// POST /sessions/{id}/actions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Interaction kind.
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Free-text content.
    pub content: String,
    /// Opaque boundary metadata.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Adaptation events fired by one engine cycle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    /// Events fired by this cycle, in firing order.
    pub events: Vec<AdaptationEvent>,
}

/// POST /sessions/{id}/documents
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBatchRequest {
    /// Analyzed documents from the classification collaborator.
    pub documents: Vec<DocumentAnalysisResult>,
}

/// Document batch outcome: fired events plus the recomputed proposal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBatchResponse {
    /// Events fired by this batch.
    pub events: Vec<AdaptationEvent>,
    /// Proposal recomputed over the full document history.
    pub proposal: Option<ProjectProposal>,
}

/// GET /sessions/{id}/view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    /// Active department.
    pub department_id: String,
    /// Department display name from the manifest.
    pub department_name: String,
    /// Active role.
    pub role: String,
    /// Ordered composition view: base widgets then adaptive widgets.
    pub widgets: Vec<WidgetInstance>,
    /// Display-only theme hints from the manifest.
    pub theme: Map<String, Value>,
}

/// PUT /sessions/{id}/context
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwitchContextRequest {
    /// New department id, if switching departments.
    pub department_id: Option<String>,
    /// New role, if switching roles.
    pub role: Option<String>,
}

/// DELETE /sessions/{id}/widgets/{widget_id}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveWidgetResponse {
    /// Whether the widget was present and removed.
    pub removed: bool,
}

/// GET /health
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Seconds since server start.
    pub uptime_secs: u64,
    /// Number of live sessions.
    pub active_sessions: usize,
}
