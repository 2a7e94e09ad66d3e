// Copyright 2025 Cowboy AI, LLC.

//! Query support: search filter, text normalization and paginated results

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::RegistryConfig;

/// Search and pagination parameters for listing records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyFilter {
    /// Partial match against name or document
    pub search: Option<String>,
    /// Zero-based page index
    pub page: usize,
    /// Page size; `0` means the configured default
    pub limit: usize,
}

impl FamilyFilter {
    /// Create a filter for the first page with the default size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Set the page index
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Resolve defaults and bounds against the registry configuration
    pub fn resolve(&self, config: &RegistryConfig) -> ResolvedFilter {
        let limit = match self.limit {
            0 => config.default_page_limit,
            n => n.min(config.max_page_limit),
        }
        .max(1);

        let search = self
            .search
            .as_deref()
            .map(|text| {
                let truncated: String = text.chars().take(config.max_search_length).collect();
                normalize_basic(&truncated)
            })
            .filter(|text| !text.is_empty());

        ResolvedFilter {
            search,
            offset: self.page.saturating_mul(limit),
            limit,
        }
    }
}

/// A filter with defaults applied and search text normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter {
    /// Normalized search text, if any
    pub search: Option<String>,
    /// Number of matches to skip
    pub offset: usize,
    /// Maximum number of items to return
    pub limit: usize,
}

impl ResolvedFilter {
    /// Whether a record with this name and document matches the search
    pub fn matches(&self, name: &str, document: &str) -> bool {
        match &self.search {
            None => true,
            Some(search) => {
                normalize_basic(name).contains(search.as_str())
                    || normalize_basic(document).contains(search.as_str())
            }
        }
    }
}

/// Trim, lowercase, strip diacritics and collapse runs of whitespace
pub fn normalize_basic(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One page of results plus the number of matches before slicing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPaginated<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total number of matches
    pub total: usize,
}

impl<T> ListPaginated<T> {
    /// Create a page
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    /// Map the items to a different type
    pub fn map<U, F>(self, f: F) -> ListPaginated<U>
    where
        F: FnMut(T) -> U,
    {
        ListPaginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
