//! Cache backend contract
//!
//! The cache owns the package metadata index and the storage backend behind
//! it. It answers lookups without touching storage; keeping index and
//! payloads in step is the caller's job.

use crate::config::Settings;
use crate::error::Result;
use crate::request::RequestContext;
use crate::storage::PackageStorage;
use async_trait::async_trait;
use std::collections::BTreeSet;
use wheelhouse_model::Package;

#[async_trait]
pub trait PackageCache: Send + Sync {
    /// Storage backend this cache fronts
    fn storage(&self) -> &dyn PackageStorage;

    /// Apply settings to the cache
    async fn configure(&self, settings: &Settings) -> Result<()>;

    /// Look up a single package by filename
    async fn fetch(&self, filename: &str) -> Result<Option<Package>>;

    /// All packages for a name, in no particular order.
    ///
    /// The name is normalized before matching, so `My_Pkg` and `my-pkg`
    /// query the same packages.
    async fn all(&self, name: &str) -> Result<Vec<Package>>;

    /// The set of distinct package names in the index
    async fn distinct(&self) -> Result<BTreeSet<String>>;

    /// Add or replace the index entry for a package.
    ///
    /// Only the index is touched; the payload goes through
    /// [`storage`](PackageCache::storage) separately.
    async fn save(&self, package: Package) -> Result<()>;

    /// Remove a package from the index
    async fn clear(&self, package: &Package) -> Result<()>;

    /// Empty the index, leaving storage untouched
    async fn clear_all(&self) -> Result<()>;

    /// Return the cache and its storage to a pristine state
    async fn reset(&self) -> Result<()>;

    /// Rebind the cache and its storage to a new request context
    async fn bind(&self, request: RequestContext);
}
