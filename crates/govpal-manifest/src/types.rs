//! Department manifest types.
//!
//! Wire format uses `camelCase` renaming to match the manifest
//! collaborator. The manifest is immutable per session and replaced
//! wholesale on department switch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use govpal_core::widgets::WidgetDefinition;

/// Declarative, per-department description of available widgets and role
/// permissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentManifest {
    /// Department display name.
    pub name: String,
    /// Department description.
    pub description: String,
    /// Available widgets, in display order.
    pub widgets: Vec<WidgetDefinition>,
    /// Role → ordered list of permitted widget ids.
    pub roles: HashMap<String, Vec<String>>,
    /// Display-only theming hints, opaque to the engine.
    pub theme: Map<String, Value>,
}

impl DepartmentManifest {
    /// Permitted widget ids for a role. An unknown role gets an empty
    /// permission list — zero base widgets, not an error.
    #[must_use]
    pub fn permissions_for(&self, role: &str) -> &[String] {
        self.roles.get(role).map_or(&[], Vec::as_slice)
    }
}
