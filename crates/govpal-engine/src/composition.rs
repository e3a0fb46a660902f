//! Composition view assembly.
//!
//! The rendered view is the role-filtered base view followed by every
//! adaptive widget in insertion order. Adaptive widgets are exempt from
//! role filtering: once a rule injects one it stays visible across role
//! and department switches until explicitly removed.

use govpal_core::widgets::WidgetInstance;
use govpal_manifest::{DepartmentManifest, compile_base_view};

use crate::session::Session;

/// Render the full composition view for a session against a manifest.
#[must_use]
pub fn render(manifest: &DepartmentManifest, session: &Session) -> Vec<WidgetInstance> {
    let mut view = compile_base_view(manifest, &session.role);
    view.extend(session.adaptive().iter().cloned());
    view
}
