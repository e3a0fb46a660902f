//! Fail-soft manifest store.
//!
//! [`ManifestStore::load`] never errors: a transport failure, bad status,
//! or undecodable body degrades to the built-in fallback manifest for the
//! requested department. Loaded manifests are cached per department so
//! rule evaluation is never blocked behind I/O; `invalidate` forces a
//! refetch on the next load.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use crate::errors::{ManifestError, Result};
use crate::fallback;
use crate::types::DepartmentManifest;

/// Source of remote department manifests.
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    /// Fetch the manifest for a department id.
    async fn fetch(&self, department_id: &str) -> Result<DepartmentManifest>;
}

/// HTTP manifest collaborator client.
pub struct HttpManifestFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpManifestFetcher {
    /// Create a fetcher against a collaborator base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ManifestFetcher for HttpManifestFetcher {
    async fn fetch(&self, department_id: &str) -> Result<DepartmentManifest> {
        let url = format!(
            "{}/departments/{department_id}/manifest",
            self.base_url.trim_end_matches('/')
        );
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ManifestError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Cached, fail-soft manifest supplier.
pub struct ManifestStore {
    fetcher: Option<Arc<dyn ManifestFetcher>>,
    cache: RwLock<HashMap<String, Arc<DepartmentManifest>>>,
}

impl ManifestStore {
    /// Create a store backed by a remote fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ManifestFetcher>) -> Self {
        Self {
            fetcher: Some(fetcher),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store that only serves the built-in manifests.
    #[must_use]
    pub fn builtin_only() -> Self {
        Self {
            fetcher: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load the manifest for a department.
    ///
    /// Fails soft: any fetch/decode failure (or the absence of a fetcher)
    /// yields the deterministic built-in manifest for the department.
    #[instrument(skip(self), fields(department_id))]
    pub async fn load(&self, department_id: &str) -> Arc<DepartmentManifest> {
        if let Some(cached) = self.cache.read().get(department_id) {
            return Arc::clone(cached);
        }

        let manifest = match &self.fetcher {
            Some(fetcher) => match fetcher.fetch(department_id).await {
                Ok(m) => {
                    debug!(department_id, "manifest fetched");
                    m
                }
                Err(e) => {
                    warn!(department_id, error = %e, "manifest fetch failed, using builtin fallback");
                    fallback::builtin(department_id)
                }
            },
            None => fallback::builtin(department_id),
        };

        let manifest = Arc::new(manifest);
        let _ = self
            .cache
            .write()
            .insert(department_id.to_string(), Arc::clone(&manifest));
        manifest
    }

    /// Drop the cached manifest for a department (next load refetches).
    pub fn invalidate(&self, department_id: &str) {
        let _ = self.cache.write().remove(department_id);
    }
}
