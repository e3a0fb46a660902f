//! Per-session adaptive widget composition engine.
//!
//! Sits between the presentation boundary and the manifest layer: tracks
//! user actions and analyzed documents per session, evaluates the fixed
//! rule table after every change, synthesizes and injects adaptive
//! widgets, records every change in the adaptation log, and keeps the
//! project proposal in sync with the document set.
//!
//! Modules:
//! - [`session`] — per-session state (ledger, adaptive set, log, documents)
//! - [`rules`] — the fixed behavioral and document-triggered rule tables
//! - [`catalog`] — deterministic synthesis of adaptive widget instances
//! - [`engine`] — the evaluate-after-every-change cycle
//! - [`composition`] — base view + adaptive overlay assembly
//! - [`proposal`] — project proposal synthesis from the document set
//! - [`registry`] — multi-session bookkeeping with per-session locking

#![deny(unsafe_code)]

pub mod catalog;
pub mod composition;
pub mod engine;
pub mod errors;
pub mod proposal;
pub mod registry;
pub mod rules;
pub mod session;

pub use engine::{ingest_documents, record_action, remove_adaptive_widget};
pub use errors::EngineError;
pub use proposal::ProjectProposal;
pub use registry::SessionRegistry;
pub use session::Session;
