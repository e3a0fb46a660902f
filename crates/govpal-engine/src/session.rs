//! Per-session engine state.
//!
//! A [`Session`] owns everything the rule engine consults: the bounded
//! action ledger, the cumulative document set, the adaptive widget set,
//! and the append-only adaptation log. Department and role are mutable;
//! switching either never resets accumulated state — adaptive widgets,
//! ledger contents, and the log all survive a department change.

use std::collections::HashSet;

use govpal_core::actions::{ActionLedger, ActionType, UserAction};
use govpal_core::documents::DocumentAnalysisResult;
use govpal_core::events::AdaptationLog;
use govpal_core::ids;
use govpal_core::widgets::AdaptiveWidgetSet;

use crate::proposal::ProjectProposal;

/// State for one dashboard session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session id (`sess_<uuidv7>`).
    pub id: String,
    /// Active department id.
    pub department_id: String,
    /// Active role within the department.
    pub role: String,

    ledger: ActionLedger,
    adaptive: AdaptiveWidgetSet,
    log: AdaptationLog,
    documents: Vec<DocumentAnalysisResult>,
    opened_documents: HashSet<String>,
    proposal: Option<ProjectProposal>,
}

impl Session {
    /// Create a fresh session for a department and role.
    #[must_use]
    pub fn new(department_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: ids::session_id(),
            department_id: department_id.into(),
            role: role.into(),
            ledger: ActionLedger::new(),
            adaptive: AdaptiveWidgetSet::new(),
            log: AdaptationLog::new(),
            documents: Vec::new(),
            opened_documents: HashSet::new(),
            proposal: None,
        }
    }

    /// Record an action in the ledger and distinct-open bookkeeping.
    ///
    /// Does NOT run rule evaluation — [`crate::engine::record_action`]
    /// wraps this with the evaluation cycle.
    pub(crate) fn push_action(&mut self, action: UserAction) {
        if action.action_type == ActionType::OpenDoc {
            let _ = self.opened_documents.insert(action.content.clone());
        }
        self.ledger.append(action);
    }

    /// Extend the cumulative document set with a validated batch.
    pub(crate) fn push_documents(&mut self, batch: Vec<DocumentAnalysisResult>) {
        self.documents.extend(batch);
    }

    /// Replace the project proposal wholesale.
    pub(crate) fn set_proposal(&mut self, proposal: Option<ProjectProposal>) {
        self.proposal = proposal;
    }

    /// Switch department. Accumulated session state is preserved; only the
    /// base view (compiled elsewhere from the new manifest) changes.
    pub fn switch_department(&mut self, department_id: impl Into<String>) {
        self.department_id = department_id.into();
    }

    /// Switch role within the current department.
    pub fn switch_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    /// The bounded action ledger.
    #[must_use]
    pub fn ledger(&self) -> &ActionLedger {
        &self.ledger
    }

    /// Rule-injected widgets, insertion-ordered.
    #[must_use]
    pub fn adaptive(&self) -> &AdaptiveWidgetSet {
        &self.adaptive
    }

    pub(crate) fn adaptive_mut(&mut self) -> &mut AdaptiveWidgetSet {
        &mut self.adaptive
    }

    /// The append-only adaptation history.
    #[must_use]
    pub fn log(&self) -> &AdaptationLog {
        &self.log
    }

    pub(crate) fn log_mut(&mut self) -> &mut AdaptationLog {
        &mut self.log
    }

    /// All documents received this session, in arrival order.
    #[must_use]
    pub fn documents(&self) -> &[DocumentAnalysisResult] {
        &self.documents
    }

    /// Number of distinct documents opened this session (cumulative,
    /// survives ledger eviction).
    #[must_use]
    pub fn distinct_documents_opened(&self) -> usize {
        self.opened_documents.len()
    }

    /// Distinct opened document names, sorted for deterministic output.
    #[must_use]
    pub fn opened_documents(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.opened_documents.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Current project proposal, if any documents have arrived.
    #[must_use]
    pub fn proposal(&self) -> Option<&ProjectProposal> {
        self.proposal.as_ref()
    }
}
