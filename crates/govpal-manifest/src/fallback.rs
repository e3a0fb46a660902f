//! Built-in deterministic manifests.
//!
//! Used whenever the manifest collaborator is unreachable or a department
//! id is unrecognized. Content is compiled in and identical on every call,
//! so the base view always has something stable to compile against.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use govpal_core::widgets::{RoleOverride, WidgetDefinition, WidgetLayout};

use crate::types::DepartmentManifest;

/// Department ids with dedicated built-in manifests.
pub const KNOWN_DEPARTMENTS: &[&str] = &["planning", "finance", "clerk"];

fn layout(x: u32, y: u32, width: u32, height: u32) -> WidgetLayout {
    WidgetLayout { x, y, width, height }
}

fn widget(id: &str, widget_type: &str, title: &str, l: WidgetLayout) -> WidgetDefinition {
    WidgetDefinition {
        id: id.into(),
        widget_type: widget_type.into(),
        title: title.into(),
        description: None,
        layout: l,
        config: Map::new(),
        permissions: Vec::new(),
        role_overrides: HashMap::new(),
    }
}

fn theme(primary: &str, accent: &str) -> Map<String, Value> {
    let mut m = Map::new();
    let _ = m.insert("primaryColor".into(), json!(primary));
    let _ = m.insert("accentColor".into(), json!(accent));
    m
}

/// Built-in manifest for a department id.
///
/// Unknown ids get the generic manifest — callers never see an error.
#[must_use]
pub fn builtin(department_id: &str) -> DepartmentManifest {
    match department_id {
        "planning" => planning(),
        "finance" => finance(),
        "clerk" => clerk(),
        _ => generic(),
    }
}

fn planning() -> DepartmentManifest {
    let mut document_search = widget("document_search", "search", "Document Search", layout(0, 0, 8, 2));
    let _ = document_search.role_overrides.insert(
        "viewer".into(),
        RoleOverride {
            layout: Some(layout(0, 0, 4, 2)),
            ..RoleOverride::default()
        },
    );

    let mut recent_activity = widget("recent_activity", "feed", "Recent Activity", layout(8, 0, 4, 4));
    // Inspectors work from the permit queue; activity feed is hidden for them.
    let _ = recent_activity.role_overrides.insert(
        "inspector".into(),
        RoleOverride {
            layout: Some(layout(0, 0, 0, 0)),
            ..RoleOverride::default()
        },
    );

    DepartmentManifest {
        name: "Planning & Zoning".into(),
        description: "Permits, zoning applications, and land use".into(),
        widgets: vec![
            widget("permit_queue", "table", "Permit Queue", layout(0, 2, 8, 4)),
            widget("zoning_summary", "chart", "Zoning Summary", layout(0, 6, 6, 3)),
            document_search,
            recent_activity,
            widget("gis_overview", "map", "GIS Overview", layout(6, 6, 6, 3)),
        ],
        roles: HashMap::from([
            (
                "planner".into(),
                vec![
                    "permit_queue".into(),
                    "zoning_summary".into(),
                    "document_search".into(),
                    "gis_overview".into(),
                ],
            ),
            (
                "inspector".into(),
                vec![
                    "permit_queue".into(),
                    "document_search".into(),
                    "recent_activity".into(),
                ],
            ),
            (
                "viewer".into(),
                vec!["document_search".into(), "recent_activity".into()],
            ),
        ]),
        theme: theme("#1a4d2e", "#e8c872"),
    }
}

fn finance() -> DepartmentManifest {
    DepartmentManifest {
        name: "Finance".into(),
        description: "Budgets, expenses, and revenue".into(),
        widgets: vec![
            widget("budget_overview", "chart", "Budget Overview", layout(0, 0, 6, 4)),
            widget("expense_table", "table", "Expenses", layout(6, 0, 6, 4)),
            widget("revenue_trends", "chart", "Revenue Trends", layout(0, 4, 8, 3)),
            widget("document_search", "search", "Document Search", layout(8, 4, 4, 3)),
        ],
        roles: HashMap::from([
            (
                "analyst".into(),
                vec![
                    "budget_overview".into(),
                    "expense_table".into(),
                    "revenue_trends".into(),
                    "document_search".into(),
                ],
            ),
            (
                "auditor".into(),
                vec!["expense_table".into(), "document_search".into()],
            ),
            (
                "viewer".into(),
                vec!["budget_overview".into(), "document_search".into()],
            ),
        ]),
        theme: theme("#14396d", "#c4d7f2"),
    }
}

fn clerk() -> DepartmentManifest {
    DepartmentManifest {
        name: "City Clerk".into(),
        description: "Records, agendas, and minutes".into(),
        widgets: vec![
            widget("agenda_calendar", "calendar", "Agenda Calendar", layout(0, 0, 6, 4)),
            widget("records_search", "search", "Records Search", layout(6, 0, 6, 2)),
            widget("meeting_minutes", "table", "Meeting Minutes", layout(6, 2, 6, 2)),
            widget("document_search", "search", "Document Search", layout(0, 4, 12, 2)),
        ],
        roles: HashMap::from([
            (
                "clerk".into(),
                vec![
                    "agenda_calendar".into(),
                    "records_search".into(),
                    "meeting_minutes".into(),
                    "document_search".into(),
                ],
            ),
            (
                "viewer".into(),
                vec!["agenda_calendar".into(), "records_search".into()],
            ),
        ]),
        theme: theme("#3d2b56", "#d9c7f0"),
    }
}

fn generic() -> DepartmentManifest {
    DepartmentManifest {
        name: "General".into(),
        description: "Default department view".into(),
        widgets: vec![
            widget("document_search", "search", "Document Search", layout(0, 0, 8, 2)),
            widget("recent_activity", "feed", "Recent Activity", layout(8, 0, 4, 4)),
        ],
        roles: HashMap::from([(
            "viewer".into(),
            vec!["document_search".into(), "recent_activity".into()],
        )]),
        theme: theme("#333333", "#999999"),
    }
}
