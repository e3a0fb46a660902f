//! # govpal-server
//!
//! HTTP surface for the GovPal adaptive widget composition engine.
//!
//! Wires the session registry, manifest store, and settings into an Axum
//! router. All composition semantics live in `govpal-engine`; this crate
//! only translates HTTP requests into engine calls and engine state into
//! JSON bodies.

#![deny(unsafe_code)]

pub mod error;
pub mod server;
pub mod wire;

pub use error::ApiError;
pub use server::{AppState, GovpalServer};
