//! In-memory storage and cache backends
//!
//! Hold everything in process memory with no persistence. Suitable for
//! development and tests; a fresh instance starts empty and `reset` returns
//! it there.

use crate::cache::PackageCache;
use crate::config::{CacheConfig, Settings};
use crate::error::{BackendError, Result};
use crate::request::RequestContext;
use crate::storage::{DownloadResponse, PackageStorage};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use tracing::debug;
use wheelhouse_model::{normalize_name, Package};

/// Storage backend keeping payloads in a map keyed by filename
pub struct MemoryStorage {
    request: RwLock<Option<RequestContext>>,
    packages: RwLock<HashMap<String, (Package, Vec<u8>)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            request: RwLock::new(None),
            packages: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_request(request: RequestContext) -> Self {
        Self {
            request: RwLock::new(Some(request)),
            packages: RwLock::new(HashMap::new()),
        }
    }

    /// Request context the backend is currently bound to
    pub async fn request(&self) -> Option<RequestContext> {
        self.request.read().await.clone()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageStorage for MemoryStorage {
    fn list(&self) -> BoxStream<'_, Result<Package>> {
        let packages = &self.packages;
        stream::once(async move {
            // Snapshot under the read lock when first polled; each call
            // re-enumerates.
            let snapshot: Vec<Package> = packages
                .read()
                .await
                .values()
                .map(|(package, _)| package.clone())
                .collect();
            stream::iter(snapshot.into_iter().map(Ok))
        })
        .flatten()
        .boxed()
    }

    async fn upload(&self, package: Package, data: Vec<u8>) -> Result<()> {
        debug!(filename = %package.filename, size = data.len(), "Stored package payload");
        let mut packages = self.packages.write().await;
        packages.insert(package.filename.clone(), (package, data));
        Ok(())
    }

    async fn delete(&self, package: &Package) -> Result<()> {
        let mut packages = self.packages.write().await;
        if packages.remove(&package.filename).is_none() {
            return Err(BackendError::not_found(&package.filename));
        }
        debug!(filename = %package.filename, "Deleted package payload");
        Ok(())
    }

    async fn open(&self, package: &Package) -> Result<Vec<u8>> {
        let packages = self.packages.read().await;
        packages
            .get(&package.filename)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| BackendError::not_found(&package.filename))
    }

    async fn download_response(&self, _package: &Package) -> Result<Option<DownloadResponse>> {
        // No shortcut here; callers fall back to open()
        Ok(None)
    }

    async fn reset(&self) -> Result<()> {
        let mut packages = self.packages.write().await;
        packages.clear();
        debug!("Storage reset");
        Ok(())
    }

    async fn bind(&self, request: RequestContext) {
        *self.request.write().await = Some(request);
    }
}

/// Cache backend keeping the package index in a map keyed by filename
pub struct MemoryCache {
    request: RwLock<Option<RequestContext>>,
    storage: MemoryStorage,
    packages: RwLock<HashMap<String, Package>>,
    config: RwLock<CacheConfig>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            request: RwLock::new(None),
            storage: MemoryStorage::new(),
            packages: RwLock::new(HashMap::new()),
            config: RwLock::new(CacheConfig::default()),
        }
    }

    /// Create a cache bound to a request, binding its storage too
    pub fn with_request(request: RequestContext) -> Self {
        Self {
            request: RwLock::new(Some(request.clone())),
            storage: MemoryStorage::with_request(request),
            packages: RwLock::new(HashMap::new()),
            config: RwLock::new(CacheConfig::default()),
        }
    }

    /// Request context the cache is currently bound to
    pub async fn request(&self) -> Option<RequestContext> {
        self.request.read().await.clone()
    }

    /// Configuration last applied via `configure`
    pub async fn config(&self) -> CacheConfig {
        self.config.read().await.clone()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageCache for MemoryCache {
    fn storage(&self) -> &dyn PackageStorage {
        &self.storage
    }

    async fn configure(&self, settings: &Settings) -> Result<()> {
        let config = CacheConfig::from_settings(settings)?;
        *self.config.write().await = config;
        Ok(())
    }

    async fn fetch(&self, filename: &str) -> Result<Option<Package>> {
        let packages = self.packages.read().await;
        Ok(packages.get(filename).cloned())
    }

    async fn all(&self, name: &str) -> Result<Vec<Package>> {
        let name = normalize_name(name);
        let packages = self.packages.read().await;
        Ok(packages
            .values()
            .filter(|package| package.name == name)
            .cloned()
            .collect())
    }

    async fn distinct(&self) -> Result<BTreeSet<String>> {
        let packages = self.packages.read().await;
        Ok(packages
            .values()
            .map(|package| package.name.clone())
            .collect())
    }

    async fn save(&self, package: Package) -> Result<()> {
        debug!(filename = %package.filename, "Indexed package");
        let mut packages = self.packages.write().await;
        packages.insert(package.filename.clone(), package);
        Ok(())
    }

    async fn clear(&self, package: &Package) -> Result<()> {
        let mut packages = self.packages.write().await;
        if packages.remove(&package.filename).is_none() {
            return Err(BackendError::not_found(&package.filename));
        }
        debug!(filename = %package.filename, "Dropped package from index");
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut packages = self.packages.write().await;
        packages.clear();
        debug!("Index cleared");
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        {
            let mut packages = self.packages.write().await;
            packages.clear();
        }
        self.storage.reset().await?;
        debug!("Cache reset");
        Ok(())
    }

    async fn bind(&self, request: RequestContext) {
        *self.request.write().await = Some(request.clone());
        self.storage.bind(request).await;
    }
}
