//! # govpal-manifest
//!
//! Department manifests and the base-view compiler.
//!
//! A [`types::DepartmentManifest`] declares which widgets a department
//! offers and which widget ids each role may see. Manifests are fetched
//! from the manifest collaborator over HTTP and fail soft: any transport
//! failure or unknown department id yields a built-in deterministic
//! manifest from [`fallback`], never an error.
//!
//! [`compiler::compile_base_view`] turns `(manifest, role)` into the
//! ordered base widget list: role permission filter, per-role override
//! patch (shallow merge, override wins), and the zero-size hard-hide.

#![deny(unsafe_code)]

pub mod compiler;
pub mod errors;
pub mod fallback;
pub mod store;
pub mod types;

pub use compiler::compile_base_view;
pub use errors::ManifestError;
pub use store::{HttpManifestFetcher, ManifestFetcher, ManifestStore};
pub use types::DepartmentManifest;
