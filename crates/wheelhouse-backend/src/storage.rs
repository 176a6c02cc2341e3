//! Storage backend contract
//!
//! A storage backend owns the package payloads. Implementations range from
//! object stores to the in-memory double used in tests; they all answer the
//! same questions: what files exist, and what bytes live behind each one.

use crate::error::Result;
use crate::request::RequestContext;
use async_trait::async_trait;
use futures::stream::BoxStream;
use wheelhouse_model::Package;

/// How a package download is served to the client
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadResponse {
    /// Client fetches the payload itself (presigned URL, CDN, ...)
    Redirect { url: String },
    /// Payload is served directly
    Payload { content_type: String, data: Vec<u8> },
}

#[async_trait]
pub trait PackageStorage: Send + Sync {
    /// Stream every package the backend knows about.
    ///
    /// The stream is lazy; backends take their snapshot when it is first
    /// polled, and each call starts a fresh enumeration.
    fn list(&self) -> BoxStream<'_, Result<Package>>;

    /// Store a payload under the package's filename, replacing any existing
    /// payload for that filename
    async fn upload(&self, package: Package, data: Vec<u8>) -> Result<()>;

    /// Remove the payload for a package
    async fn delete(&self, package: &Package) -> Result<()>;

    /// Read back the payload for a package
    async fn open(&self, package: &Package) -> Result<Vec<u8>>;

    /// Backend-preferred way to serve a download, or `None` when the backend
    /// has no shortcut and the payload should be read via [`open`]
    ///
    /// [`open`]: PackageStorage::open
    async fn download_response(&self, package: &Package) -> Result<Option<DownloadResponse>>;

    /// Drop all stored payloads
    async fn reset(&self) -> Result<()>;

    /// Rebind the backend to a new request context
    async fn bind(&self, request: RequestContext);
}

/// Serve a download, falling back to streaming the raw payload when the
/// backend has no shortcut
pub async fn download(storage: &dyn PackageStorage, package: &Package) -> Result<DownloadResponse> {
    if let Some(response) = storage.download_response(package).await? {
        return Ok(response);
    }
    let data = storage.open(package).await?;
    Ok(DownloadResponse::Payload {
        content_type: "application/octet-stream".to_string(),
        data,
    })
}
