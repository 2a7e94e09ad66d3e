// Copyright 2025 Cowboy AI, LLC.

//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::errors::DomainResult;

/// Tunables for listing and searching the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Page size used when a query does not ask for one
    pub default_page_limit: usize,
    /// Largest page size a query may ask for
    pub max_page_limit: usize,
    /// Search text is truncated to this many characters
    pub max_search_length: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 10,
            max_page_limit: 100,
            max_search_length: 120,
        }
    }
}

impl RegistryConfig {
    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp values into a usable range
    pub fn sanitized(mut self) -> Self {
        self.max_page_limit = self.max_page_limit.max(1);
        self.default_page_limit = self.default_page_limit.clamp(1, self.max_page_limit);
        self
    }
}
