//! # govpal-core
//!
//! Foundation types for the GovPal adaptive dashboard engine.
//!
//! This crate provides the shared vocabulary that all other govpal crates
//! depend on:
//!
//! - **IDs**: [`ids::session_id`], [`ids::adaptation_id`] prefixed UUIDv7 strings
//! - **Actions**: [`actions::UserAction`] and the bounded [`actions::ActionLedger`]
//! - **Documents**: [`documents::DocumentAnalysisResult`] analysis records
//! - **Widgets**: [`widgets::WidgetDefinition`], [`widgets::WidgetInstance`],
//!   and the insertion-ordered [`widgets::AdaptiveWidgetSet`]
//! - **Events**: [`events::AdaptationEvent`] and the append-only
//!   [`events::AdaptationLog`]
//! - **Errors**: [`errors::CoreError`] hierarchy via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other govpal crates.

#![deny(unsafe_code)]

pub mod actions;
pub mod documents;
pub mod errors;
pub mod events;
pub mod ids;
pub mod logging;
pub mod widgets;
