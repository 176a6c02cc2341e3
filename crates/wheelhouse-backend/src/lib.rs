//! Backend contracts for the Wheelhouse package index
//!
//! Defines the storage and cache traits the index is built on, plus
//! in-memory implementations and the fixtures used to test code against
//! them.

pub mod cache;
pub mod config;
pub mod error;
pub mod memory;
pub mod request;
pub mod storage;
pub mod testing;

pub use cache::PackageCache;
pub use config::{CacheConfig, Settings};
pub use error::{BackendError, Result};
pub use memory::{MemoryCache, MemoryStorage};
pub use request::RequestContext;
pub use storage::{download, DownloadResponse, PackageStorage};
pub use testing::{make_package, TestRequest};
