// Copyright 2025 Cowboy AI, LLC.

//! Repository contract for family records

use async_trait::async_trait;

use super::query_support::{FamilyFilter, ListPaginated};
use crate::errors::DomainResult;
use crate::family::{FamilyId, FamilyRecord};

/// Keyed store of family records
///
/// Implementations must route every record through
/// [`Validate::assert_valid`](crate::Validate::assert_valid) in `persist`
/// and must hide soft-deleted records from every finder.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Load one active record, without attached relations
    async fn find_by_id(&self, id: FamilyId) -> DomainResult<Option<FamilyRecord>>;

    /// Load one page of active records matching the filter
    async fn find_paginated(&self, filter: &FamilyFilter)
        -> DomainResult<ListPaginated<FamilyRecord>>;

    /// Load active records whose father or mother is `id`
    async fn find_descendants(&self, id: FamilyId) -> DomainResult<Vec<FamilyRecord>>;

    /// Validate and store a record, inserting or replacing by id
    async fn persist(&self, record: FamilyRecord) -> DomainResult<FamilyRecord>;

    /// Soft-delete a record and clear parent links that point at it
    async fn delete(&self, id: FamilyId) -> DomainResult<()>;
}
