//! Prefixed ID generation.
//!
//! All runtime-generated identifiers are UUIDv7 strings with a short type
//! prefix (`sess_`, `adp_`, `prop_`) so log lines and wire payloads are
//! self-describing. Widget ids are NOT generated here — they come from
//! manifests or the fixed rule tables and are plain strings.

use uuid::Uuid;

/// Generate a new session ID (`sess_<uuidv7>`).
#[must_use]
pub fn session_id() -> String {
    format!("sess_{}", Uuid::now_v7())
}

/// Generate a new adaptation-event ID (`adp_<uuidv7>`).
#[must_use]
pub fn adaptation_id() -> String {
    format!("adp_{}", Uuid::now_v7())
}

/// Generate a new project-proposal ID (`prop_<uuidv7>`).
#[must_use]
pub fn proposal_id() -> String {
    format!("prop_{}", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_prefixed_and_unique() {
        let a = session_id();
        let b = session_id();
        assert!(a.starts_with("sess_"));
        assert_ne!(a, b);
    }

    #[test]
    fn adaptation_ids_are_prefixed() {
        assert!(adaptation_id().starts_with("adp_"));
    }

    #[test]
    fn proposal_ids_are_prefixed() {
        assert!(proposal_id().starts_with("prop_"));
    }
}
