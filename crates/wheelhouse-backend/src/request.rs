//! Per-request context handed to the backends
//!
//! Backends never see the web framework directly; they get a small
//! descriptor carrying the request path, query parameters, and settings.

use crate::config::Settings;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub path_url: String,
    params: HashMap<String, String>,
    settings: Settings,
}

impl RequestContext {
    pub fn new(path_url: impl Into<String>) -> Self {
        Self {
            path_url: path_url.into(),
            params: HashMap::new(),
            settings: Settings::new(),
        }
    }

    /// Look up a query parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Look up a setting by key
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}
