//! Base-view compilation.
//!
//! Turns `(manifest, role)` into the ordered base widget list:
//!
//! 1. Look up the role's permission list (absent role ⇒ empty list).
//! 2. Retain manifest widgets whose id is permitted, in manifest order.
//! 3. Apply the role's override patch, if any: shallow merge over layout,
//!    config, and permission tags — a present override field replaces the
//!    base field wholesale.
//! 4. Drop widgets whose merged layout is 0×0 (hard-hide via override).
//!
//! Deterministic and idempotent for fixed inputs.

use govpal_core::widgets::{WidgetDefinition, WidgetInstance, WidgetLayout, WidgetSource};

use crate::types::DepartmentManifest;

/// Compile the ordered base widget list for a role.
#[must_use]
pub fn compile_base_view(manifest: &DepartmentManifest, role: &str) -> Vec<WidgetInstance> {
    let permitted = manifest.permissions_for(role);

    manifest
        .widgets
        .iter()
        .filter(|w| permitted.iter().any(|id| id == &w.id))
        .filter_map(|w| instantiate(w, role))
        .collect()
}

/// Apply the role override patch and build the render instance.
///
/// Returns `None` when the merged layout hard-hides the widget.
fn instantiate(definition: &WidgetDefinition, role: &str) -> Option<WidgetInstance> {
    let patch = definition.role_overrides.get(role);

    let layout: WidgetLayout = patch
        .and_then(|p| p.layout)
        .unwrap_or(definition.layout);
    if layout.is_hidden() {
        return None;
    }

    let config = patch
        .and_then(|p| p.config.clone())
        .unwrap_or_else(|| definition.config.clone());

    let permissions = patch
        .and_then(|p| p.permissions.clone())
        .unwrap_or_else(|| definition.permissions.clone());

    Some(WidgetInstance {
        id: definition.id.clone(),
        widget_type: definition.widget_type.clone(),
        title: definition.title.clone(),
        description: definition.description.clone(),
        layout,
        config,
        permissions,
        source: WidgetSource::Base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    fn ids(view: &[WidgetInstance]) -> Vec<&str> {
        view.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn planner_view_preserves_manifest_order() {
        let manifest = fallback::builtin("planning");
        let view = compile_base_view(&manifest, "planner");
        assert_eq!(
            ids(&view),
            vec!["permit_queue", "zoning_summary", "document_search", "gis_overview"]
        );
    }

    #[test]
    fn unknown_role_compiles_to_empty_view() {
        let manifest = fallback::builtin("planning");
        assert!(compile_base_view(&manifest, "mayor").is_empty());
    }

    #[test]
    fn viewer_override_replaces_layout() {
        let manifest = fallback::builtin("planning");
        let view = compile_base_view(&manifest, "viewer");
        let search = view.iter().find(|w| w.id == "document_search").unwrap();
        assert_eq!(search.layout.width, 4);
    }

    #[test]
    fn permission_override_replaces_base_tags() {
        use govpal_core::widgets::{RoleOverride, WidgetDefinition, WidgetLayout};
        use std::collections::HashMap;

        let mut definition = WidgetDefinition {
            id: "permit_queue".into(),
            widget_type: "table".into(),
            title: "Permit Queue".into(),
            description: None,
            layout: WidgetLayout { x: 0, y: 0, width: 6, height: 4 },
            config: serde_json::Map::new(),
            permissions: vec!["read".into(), "write".into()],
            role_overrides: HashMap::new(),
        };
        let _ = definition.role_overrides.insert(
            "viewer".into(),
            RoleOverride {
                permissions: Some(vec!["read".into()]),
                ..RoleOverride::default()
            },
        );
        let manifest = crate::types::DepartmentManifest {
            name: "Planning".into(),
            description: String::new(),
            widgets: vec![definition],
            roles: HashMap::from([
                ("viewer".into(), vec!["permit_queue".into()]),
                ("planner".into(), vec!["permit_queue".into()]),
            ]),
            theme: serde_json::Map::new(),
        };

        let viewer = compile_base_view(&manifest, "viewer");
        assert_eq!(viewer[0].permissions, vec!["read"]);
        // roles without an override keep the base tags
        let planner = compile_base_view(&manifest, "planner");
        assert_eq!(planner[0].permissions, vec!["read", "write"]);
    }

    #[test]
    fn zero_size_override_drops_widget() {
        let manifest = fallback::builtin("planning");
        let view = compile_base_view(&manifest, "inspector");
        // recent_activity is permitted for inspectors but hard-hidden by override
        assert_eq!(ids(&view), vec!["permit_queue", "document_search"]);
    }

    #[test]
    fn compile_is_idempotent() {
        let manifest = fallback::builtin("finance");
        for role in ["analyst", "auditor", "viewer", "unknown"] {
            let first = compile_base_view(&manifest, role);
            let second = compile_base_view(&manifest, role);
            assert_eq!(first, second, "role {role} not idempotent");
        }
    }

    #[test]
    fn all_base_instances_are_marked_base() {
        let manifest = fallback::builtin("clerk");
        for w in compile_base_view(&manifest, "clerk") {
            assert_eq!(w.source, WidgetSource::Base);
        }
    }
}
