//! The fixed adaptation rule table.
//!
//! Rules are pure predicates over `(action window, cumulative documents)`.
//! Behavioral rules consult the last [`RULE_WINDOW`] ledger entries;
//! document rules consult the full document history received this session.
//! Each rule is independent and idempotent: the engine skips a rule whose
//! guard widget is already present, so re-firing never duplicates widgets
//! or audit events.

use std::sync::LazyLock;

use regex::Regex;

use govpal_core::actions::{ActionType, RULE_WINDOW, UserAction};
use govpal_core::documents::{DocumentAnalysisResult, DocumentCategory};

use crate::session::Session;

// ── Text patterns ─────────────────────────────────────────────────────

/// Street-address shape: number, one or more words, street-type suffix.
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\s+\w+(?:\s+\w+)*\s+(?:street|st|avenue|ave|boulevard|blvd|road|rd)\b")
        .unwrap_or_else(|e| unreachable!("invalid address pattern: {e}"))
});

/// Legal citation: keyword or section sign followed by a number.
static STATUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:section|code|statute|ordinance)\s*\.?\s*\d+|§\s*\d+")
        .unwrap_or_else(|e| unreachable!("invalid statute pattern: {e}"))
});

/// Financial vocabulary, or any dollar amount.
static FINANCIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:budget|cost|expense|revenue|financial|money)\b|\$")
        .unwrap_or_else(|e| unreachable!("invalid financial pattern: {e}"))
});

/// Whether a string looks like a street address.
#[must_use]
pub fn is_address_like(text: &str) -> bool {
    ADDRESS.is_match(text)
}

/// Whether a string contains a legal citation.
#[must_use]
pub fn is_statute_like(text: &str) -> bool {
    STATUTE.is_match(text)
}

/// Whether a string contains financial vocabulary.
#[must_use]
pub fn is_financial_like(text: &str) -> bool {
    FINANCIAL.is_match(text)
}

// ── Rule table ────────────────────────────────────────────────────────

/// Input read by rule predicates. Borrowed from the session at the start
/// of each evaluation cycle, never cached across cycles.
pub struct RuleContext<'a> {
    /// Most recent ledger entries, oldest first.
    pub window: Vec<&'a UserAction>,
    /// Every document received this session, in arrival order.
    pub documents: &'a [DocumentAnalysisResult],
    /// Distinct documents opened this session.
    pub distinct_opened: usize,
}

impl<'a> RuleContext<'a> {
    /// Snapshot the rule-visible slice of a session.
    #[must_use]
    pub fn of(session: &'a Session) -> Self {
        Self {
            window: session.ledger().window(RULE_WINDOW),
            documents: session.documents(),
            distinct_opened: session.distinct_documents_opened(),
        }
    }

    fn matching_queries(&self, pattern: fn(&str) -> bool) -> usize {
        self.window
            .iter()
            .filter(|a| a.action_type == ActionType::Query && pattern(&a.content))
            .count()
    }

    fn has_category(&self, category: DocumentCategory) -> bool {
        self.documents.iter().any(|d| d.category == category)
    }
}

/// One row of the fixed rule table.
pub struct Rule {
    /// Trigger label recorded on the adaptation event.
    pub label: &'static str,
    /// Audit description recorded on the adaptation event.
    pub description: &'static str,
    /// Widget ids this rule injects, in injection order. The first id is
    /// the guard: the rule is skipped while it is present.
    pub targets: &'static [&'static str],
    /// Firing condition.
    pub predicate: fn(&RuleContext<'_>) -> bool,
}

/// The complete rule table, evaluated top to bottom on every cycle.
pub static RULES: &[Rule] = &[
    // ── Behavioral ────────────────────────────────────────────────────
    Rule {
        label: "address-pattern",
        description: "Repeated address searches detected; showing location map and activity timeline",
        targets: &["adaptive_map", "adaptive_timeline"],
        predicate: |ctx| ctx.matching_queries(is_address_like) >= 2,
    },
    Rule {
        label: "statute-reference",
        description: "Legal citation lookup detected; showing municipal code browser",
        targets: &["adaptive_codebrowser"],
        predicate: |ctx| {
            ctx.matching_queries(is_statute_like) >= 1
                || ctx
                    .window
                    .iter()
                    .any(|a| a.action_type == ActionType::ViewStatute)
        },
    },
    Rule {
        label: "multi-document-open",
        description: "Multiple documents open; showing document comparison",
        targets: &["adaptive_diff"],
        predicate: |ctx| ctx.distinct_opened >= 3,
    },
    Rule {
        label: "financial-query",
        description: "Repeated financial queries detected; showing budget snapshot",
        targets: &["adaptive_budget"],
        predicate: |ctx| ctx.matching_queries(is_financial_like) >= 2,
    },
    // ── Document-triggered ────────────────────────────────────────────
    Rule {
        label: "permits-detected",
        description: "Building permits found in uploaded documents",
        targets: &["permit_tracker", "property_map"],
        predicate: |ctx| ctx.has_category(DocumentCategory::BuildingPermit),
    },
    Rule {
        label: "zoning-detected",
        description: "Zoning applications found in uploaded documents",
        targets: &["zoning_map", "code_browser"],
        predicate: |ctx| ctx.has_category(DocumentCategory::ZoningApplication),
    },
    Rule {
        label: "contracts-detected",
        description: "Contracts found in uploaded documents",
        targets: &["contract_monitor", "vendor_tracker"],
        predicate: |ctx| ctx.has_category(DocumentCategory::Contract),
    },
    Rule {
        label: "insurance-detected",
        description: "Insurance documents found in uploaded documents",
        targets: &["insurance_tracker", "expiration_monitor"],
        predicate: |ctx| ctx.has_category(DocumentCategory::Insurance),
    },
    Rule {
        label: "risk-flagged",
        description: "Documents flagged for attention; showing alerts and compliance checks",
        targets: &["document_alerts", "compliance_checker"],
        predicate: |ctx| ctx.documents.iter().any(DocumentAnalysisResult::is_flagged),
    },
];
