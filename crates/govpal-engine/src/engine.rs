//! The evaluate-after-every-change cycle.
//!
//! Every mutation of rule-visible state (action append, document batch,
//! user removal) runs through here. Evaluation is synchronous and pure
//! in-memory: it re-reads ledger and document state at execution time, so
//! there is no snapshot to go stale between trigger and evaluation.
//! Callers serialize access per session via [`crate::registry`].

use tracing::{debug, instrument};

use govpal_core::actions::UserAction;
use govpal_core::documents::DocumentAnalysisResult;
use govpal_core::events::{AdaptationEvent, TRIGGER_USER_DISMISSED};

use crate::catalog;
use crate::errors::Result;
use crate::proposal;
use crate::rules::{RULES, RuleContext};
use crate::session::Session;

/// Evaluate the full rule table against current session state.
///
/// Each firing rule injects its absent targets and appends exactly one
/// adaptation event listing the ids it actually added. Rules whose guard
/// widget is already present are skipped, so evaluation is idempotent.
fn evaluate(session: &mut Session) -> Result<Vec<AdaptationEvent>> {
    let mut fired = Vec::new();

    for rule in RULES {
        // First target is the guard: present means this rule already ran.
        if session.adaptive().contains(rule.targets[0]) {
            continue;
        }

        let matched = {
            let ctx = RuleContext::of(session);
            (rule.predicate)(&ctx)
        };
        if !matched {
            continue;
        }

        let mut added = Vec::new();
        for target in rule.targets {
            if session.adaptive().contains(target) {
                continue;
            }
            let instance = catalog::synthesize(target, rule.label, session);
            if session.adaptive_mut().insert(instance) {
                added.push((*target).to_string());
            }
        }
        if added.is_empty() {
            continue;
        }

        debug!(rule = rule.label, widgets = ?added, "adaptation rule fired");
        let event = AdaptationEvent::added(rule.label, rule.description, added)?;
        session.log_mut().append(event.clone());
        fired.push(event);
    }

    Ok(fired)
}

/// Append a user action and re-evaluate the rule table.
///
/// Returns the adaptation events fired by this cycle (often empty).
#[instrument(skip(session, action), fields(session_id = %session.id, action_type = %action.action_type))]
pub fn record_action(session: &mut Session, action: UserAction) -> Result<Vec<AdaptationEvent>> {
    session.push_action(action);
    evaluate(session)
}

/// Receive an analyzed document batch: validate, accumulate, re-evaluate,
/// and recompute the project proposal wholesale.
///
/// A batch with any invalid record is rejected before anything reaches
/// session state.
#[instrument(skip(session, batch), fields(session_id = %session.id, batch_len = batch.len()))]
pub fn ingest_documents(
    session: &mut Session,
    batch: Vec<DocumentAnalysisResult>,
) -> Result<Vec<AdaptationEvent>> {
    for doc in &batch {
        doc.validate()?;
    }
    session.push_documents(batch);
    let fired = evaluate(session)?;
    session.set_proposal(proposal::synthesize(session.documents()));
    Ok(fired)
}

/// Remove an adaptive widget at the user's request.
///
/// Present id: removed from the set and recorded as a `user_dismissed`
/// event. Absent id: no-op, no event, returns `false`.
#[instrument(skip(session), fields(session_id = %session.id))]
pub fn remove_adaptive_widget(session: &mut Session, widget_id: &str) -> Result<bool> {
    if !session.adaptive_mut().remove(widget_id) {
        return Ok(false);
    }
    let event = AdaptationEvent::removed(
        TRIGGER_USER_DISMISSED,
        "Widget removed by user",
        vec![widget_id.to_string()],
    )?;
    session.log_mut().append(event);
    Ok(true)
}
