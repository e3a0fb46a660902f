//! Adaptive widget synthesis.
//!
//! Every target id in the rule table has a render contract here. Synthesis
//! is deterministic: the instance is built from the session's ledger and
//! document state as they stand at synthesis time, and is never updated
//! afterwards (a later removal + re-fire re-synthesizes from fresh state).

use serde_json::{Map, Value, json};

use govpal_core::actions::ActionType;
use govpal_core::documents::{DocumentAnalysisResult, DocumentCategory};
use govpal_core::widgets::{WidgetInstance, WidgetLayout, WidgetSource};

use crate::rules;
use crate::session::Session;

fn layout(width: u32, height: u32) -> WidgetLayout {
    // Adaptive widgets are appended below the base grid; the rendering
    // collaborator reflows rows, so only the size matters here.
    WidgetLayout { x: 0, y: 0, width, height }
}

fn config(entries: &[(&str, Value)]) -> Map<String, Value> {
    let mut m = Map::new();
    for (key, value) in entries {
        let _ = m.insert((*key).to_string(), value.clone());
    }
    m
}

/// Address-like strings currently in the ledger, oldest first.
///
/// Queries matching the street-address pattern plus every selected
/// address; duplicates removed, first occurrence wins.
fn ledger_addresses(session: &Session) -> Vec<String> {
    let mut seen = Vec::new();
    for action in session.ledger().iter() {
        let is_address = match action.action_type {
            ActionType::Query => rules::is_address_like(&action.content),
            ActionType::SelectAddress => true,
            _ => false,
        };
        if is_address && !seen.contains(&action.content) {
            seen.push(action.content.clone());
        }
    }
    seen
}

/// Most recent statute-like query or viewed statute, if any.
fn last_statute_reference(session: &Session) -> Option<String> {
    session
        .ledger()
        .iter()
        .rev()
        .find(|a| match a.action_type {
            ActionType::ViewStatute => true,
            ActionType::Query => rules::is_statute_like(&a.content),
            _ => false,
        })
        .map(|a| a.content.clone())
}

fn filenames_in(session: &Session, category: DocumentCategory) -> Vec<String> {
    session
        .documents()
        .iter()
        .filter(|d| d.category == category)
        .map(|d| d.filename.clone())
        .collect()
}

fn addresses_in(session: &Session, category: DocumentCategory) -> Vec<String> {
    session
        .documents()
        .iter()
        .filter(|d| d.category == category)
        .flat_map(|d| d.key_data.addresses.iter().cloned())
        .collect()
}

fn expiration_dates(session: &Session) -> Vec<String> {
    session
        .documents()
        .iter()
        .filter_map(|d| d.flags.expiration_date.clone())
        .collect()
}

fn flagged_filenames(session: &Session) -> Vec<String> {
    session
        .documents()
        .iter()
        .filter(|d| DocumentAnalysisResult::is_flagged(d))
        .map(|d| d.filename.clone())
        .collect()
}

/// Synthesize the adaptive widget instance for a rule target id.
///
/// Total over the rule table's target ids; an id outside the table (which
/// the engine never produces) degrades to a generic panel rather than an
/// error.
#[must_use]
pub fn synthesize(id: &str, trigger: &str, session: &Session) -> WidgetInstance {
    let (widget_type, title, l, cfg): (&str, &str, WidgetLayout, Map<String, Value>) = match id {
        "adaptive_map" => (
            "map",
            "Location Map",
            layout(6, 4),
            config(&[("addresses", json!(ledger_addresses(session)))]),
        ),
        "adaptive_timeline" => (
            "timeline",
            "Activity Timeline",
            layout(6, 4),
            config(&[("source", json!("actions"))]),
        ),
        "adaptive_codebrowser" => (
            "code_browser",
            "Code Browser",
            layout(8, 4),
            config(&[("reference", json!(last_statute_reference(session)))]),
        ),
        "adaptive_diff" => (
            "diff",
            "Document Compare",
            layout(12, 4),
            config(&[("documents", json!(session.opened_documents()))]),
        ),
        "adaptive_budget" => ("chart", "Budget Snapshot", layout(6, 4), Map::new()),
        "permit_tracker" => (
            "table",
            "Permit Tracker",
            layout(6, 4),
            config(&[(
                "files",
                json!(filenames_in(session, DocumentCategory::BuildingPermit)),
            )]),
        ),
        "property_map" => (
            "map",
            "Property Map",
            layout(6, 4),
            config(&[(
                "addresses",
                json!(addresses_in(session, DocumentCategory::BuildingPermit)),
            )]),
        ),
        "zoning_map" => (
            "map",
            "Zoning Map",
            layout(6, 4),
            config(&[(
                "addresses",
                json!(addresses_in(session, DocumentCategory::ZoningApplication)),
            )]),
        ),
        "code_browser" => ("code_browser", "Municipal Code", layout(6, 4), Map::new()),
        "contract_monitor" => (
            "table",
            "Contract Monitor",
            layout(6, 4),
            config(&[(
                "files",
                json!(filenames_in(session, DocumentCategory::Contract)),
            )]),
        ),
        "vendor_tracker" => (
            "table",
            "Vendor Tracker",
            layout(6, 4),
            config(&[(
                "parties",
                json!(
                    session
                        .documents()
                        .iter()
                        .filter(|d| d.category == DocumentCategory::Contract)
                        .flat_map(|d| d.key_data.parties.iter().cloned())
                        .collect::<Vec<_>>()
                ),
            )]),
        ),
        "insurance_tracker" => (
            "table",
            "Insurance Tracker",
            layout(6, 4),
            config(&[(
                "files",
                json!(filenames_in(session, DocumentCategory::Insurance)),
            )]),
        ),
        "expiration_monitor" => (
            "calendar",
            "Expiration Monitor",
            layout(6, 4),
            config(&[("dates", json!(expiration_dates(session)))]),
        ),
        "document_alerts" => (
            "feed",
            "Document Alerts",
            layout(6, 4),
            config(&[("files", json!(flagged_filenames(session)))]),
        ),
        "compliance_checker" => ("checklist", "Compliance Checker", layout(6, 4), Map::new()),
        other => ("panel", other, layout(6, 4), Map::new()),
    };

    WidgetInstance {
        id: id.to_string(),
        widget_type: widget_type.to_string(),
        title: title.to_string(),
        description: None,
        layout: l,
        config: cfg,
        permissions: Vec::new(),
        source: WidgetSource::Adaptive {
            trigger: trigger.to_string(),
        },
    }
}
