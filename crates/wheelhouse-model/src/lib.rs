//! Package metadata model for the Wheelhouse index
//!
//! A `Package` describes one uploaded distribution file. Package names are
//! normalized so that lookups are insensitive to case and separator style.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static NAME_SEPARATORS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// Normalize a package name: lowercase, runs of `-`, `_`, `.` collapse to `-`
pub fn normalize_name(name: &str) -> String {
    NAME_SEPARATORS_RE.replace_all(name, "-").to_lowercase()
}

/// Conventional source-distribution filename for a name and version
pub fn default_filename(name: &str, version: &str) -> String {
    format!("{}-{}.tar.gz", name, version)
}

/// Metadata for one distribution file in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Normalized package name
    pub name: String,
    pub version: String,
    /// Unique key for the package across the index
    pub filename: String,
    pub last_modified: DateTime<Utc>,
    /// Backend-specific attributes (summary, uploader, ...)
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Package {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        filename: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            name: normalize_name(&name.into()),
            version: version.into(),
            filename: filename.into(),
            last_modified,
            extra: BTreeMap::new(),
        }
    }

    /// Build a package whose filename follows the sdist convention.
    ///
    /// The filename keeps the name as given; only the `name` field is
    /// normalized.
    pub fn from_version(
        name: impl Into<String>,
        version: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        let filename = default_filename(&name, &version);
        Self::new(name, version, filename, last_modified)
    }

    /// Attach a backend-specific attribute
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_name_lowercases() {
        assert_eq!(normalize_name("Django"), "django");
    }

    #[test]
    fn test_normalize_name_collapses_separators() {
        assert_eq!(normalize_name("my..weird__pkg-name"), "my-weird-pkg-name");
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(default_filename("mypkg", "1.1"), "mypkg-1.1.tar.gz");
    }

    #[test]
    fn test_new_normalizes_name() {
        let pkg = Package::new("My_Pkg", "1.0", "My_Pkg-1.0.tar.gz", Utc::now());
        assert_eq!(pkg.name, "my-pkg");
        assert_eq!(pkg.filename, "My_Pkg-1.0.tar.gz");
    }

    #[test]
    fn test_from_version_derives_filename_before_normalizing() {
        let pkg = Package::from_version("My_Pkg", "1.0", Utc::now());
        assert_eq!(pkg.name, "my-pkg");
        assert_eq!(pkg.version, "1.0");
        assert_eq!(pkg.filename, "My_Pkg-1.0.tar.gz");
    }

    #[test]
    fn test_with_extra() {
        let pkg = Package::from_version("mypkg", "1.1", Utc::now())
            .with_extra("summary", json!("A test package"));
        assert_eq!(pkg.extra["summary"], json!("A test package"));
    }

    #[test]
    fn test_package_serialization_round_trip() {
        let pkg = Package::from_version("mypkg", "1.1", Utc::now()).with_extra("owner", json!("a"));
        let encoded = serde_json::to_string(&pkg).unwrap();
        let decoded: Package = serde_json::from_str(&encoded).unwrap();
        assert_eq!(pkg, decoded);
    }

    #[test]
    fn test_extra_defaults_to_empty_on_deserialize() {
        let decoded: Package = serde_json::from_str(
            r#"{"name":"mypkg","version":"1.1","filename":"mypkg-1.1.tar.gz","last_modified":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(decoded.extra.is_empty());
    }
}
