//! Test fixtures for code built on the backend contracts
//!
//! `TestRequest` stands in for a web request during tests: it carries a
//! request context and a fresh in-memory cache, wired together the way the
//! application wires them per request.

use crate::cache::PackageCache;
use crate::error::Result;
use crate::memory::MemoryCache;
use crate::request::RequestContext;
use chrono::Utc;
use std::sync::Arc;
use wheelhouse_model::Package;

/// Build a package with a current timestamp and conventional filename
pub fn make_package(name: &str, version: &str) -> Package {
    Package::from_version(name, version, Utc::now())
}

/// Fake request with an in-memory cache attached
pub struct TestRequest {
    request: RequestContext,
    pub db: Arc<MemoryCache>,
}

impl TestRequest {
    pub fn new() -> Self {
        let request = RequestContext::new("/path/");
        let db = Arc::new(MemoryCache::with_request(request.clone()));
        Self { request, db }
    }

    pub fn path_url(&self) -> &str {
        &self.request.path_url
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.request.param(name)
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.request.set_param(name, value);
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Put a package into both storage and the cache index
    pub async fn seed(&self, package: &Package, data: &[u8]) -> Result<()> {
        self.db.storage().upload(package.clone(), data.to_vec()).await?;
        self.db.save(package.clone()).await
    }

    /// Return the cache and storage to a pristine state
    pub async fn teardown(&self) -> Result<()> {
        self.db.reset().await
    }
}

impl Default for TestRequest {
    fn default() -> Self {
        Self::new()
    }
}
