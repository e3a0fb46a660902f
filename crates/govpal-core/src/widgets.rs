//! Widget definitions, instances, and the session-scoped adaptive set.
//!
//! A [`WidgetDefinition`] is manifest-owned and immutable for the session.
//! A [`WidgetInstance`] is what the composition view hands to the rendering
//! collaborator — either compiled from a base definition or synthesized by
//! an adaptation rule. The [`AdaptiveWidgetSet`] holds rule-injected
//! instances in insertion order and guards against duplicate ids.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Grid placement and size of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout {
    /// Grid column.
    pub x: u32,
    /// Grid row.
    pub y: u32,
    /// Width in grid units.
    pub width: u32,
    /// Height in grid units.
    pub height: u32,
}

impl WidgetLayout {
    /// A zero-width, zero-height layout hides the widget entirely.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Per-role patch applied over a widget definition.
///
/// Shallow merge: a present field replaces the base field wholesale, there
/// is no recursive merging of layout or config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleOverride {
    /// Replacement layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<WidgetLayout>,
    /// Replacement config map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    /// Replacement permission tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// A widget as declared in a department manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefinition {
    /// Unique id within the manifest.
    pub id: String,
    /// Render-type tag consumed by the presentation layer.
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Display title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grid placement.
    pub layout: WidgetLayout,
    /// Opaque key-value config for the rendering collaborator.
    #[serde(default)]
    pub config: Map<String, Value>,
    /// Permission tags.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Role-keyed override patches.
    #[serde(default)]
    pub role_overrides: HashMap<String, RoleOverride>,
}

/// Where a rendered widget instance came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum WidgetSource {
    /// Compiled from the department manifest for the session role.
    Base,
    /// Injected by an adaptation rule.
    Adaptive {
        /// Label of the rule that injected it.
        trigger: String,
    },
}

/// A concrete widget handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInstance {
    /// Widget id (unique within the composition view).
    pub id: String,
    /// Render-type tag.
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grid placement.
    pub layout: WidgetLayout,
    /// Opaque render config.
    #[serde(default)]
    pub config: Map<String, Value>,
    /// Permission tags carried through from the merged definition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Provenance.
    pub source: WidgetSource,
}

/// Session-scoped set of rule-injected widgets.
///
/// Insertion-ordered; append/remove only. NOT subject to role filtering —
/// once injected, an adaptive widget stays visible to every role until
/// explicitly removed.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveWidgetSet {
    widgets: Vec<WidgetInstance>,
}

impl AdaptiveWidgetSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { widgets: Vec::new() }
    }

    /// Whether a widget id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.widgets.iter().any(|w| w.id == id)
    }

    /// Insert an instance. Returns `false` (and drops the instance) if the
    /// id is already present — rules re-firing must not duplicate widgets.
    pub fn insert(&mut self, widget: WidgetInstance) -> bool {
        if self.contains(&widget.id) {
            return false;
        }
        self.widgets.push(widget);
        true
    }

    /// Remove a widget by id. Returns `true` if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        self.widgets.len() < before
    }

    /// All instances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WidgetInstance> {
        self.widgets.iter()
    }

    /// Number of adaptive widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
