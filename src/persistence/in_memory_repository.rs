// Copyright 2025 Cowboy AI, LLC.

//! In-memory repository for family records

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::query_support::{FamilyFilter, ListPaginated};
use super::repository::FamilyRepository;
use crate::config::RegistryConfig;
use crate::errors::{DomainError, DomainResult};
use crate::family::{FamilyId, FamilyRecord, FamilyRow};
use crate::validation::Validate;

/// Family repository backed by an ordered in-memory map
///
/// Rows are kept newest-first: a newly inserted record goes to the front,
/// a replaced record keeps its position. Clones share the same store.
#[derive(Debug, Clone)]
pub struct InMemoryFamilyRepository {
    rows: Arc<RwLock<IndexMap<FamilyId, FamilyRow>>>,
    config: RegistryConfig,
}

impl Default for InMemoryFamilyRepository {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl InMemoryFamilyRepository {
    /// Create an empty repository
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            rows: Arc::new(RwLock::new(IndexMap::new())),
            config: config.sanitized(),
        }
    }

    /// Start building a repository with configuration and seed data
    pub fn builder() -> InMemoryFamilyRepositoryBuilder {
        InMemoryFamilyRepositoryBuilder::default()
    }

    /// Active configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of stored rows, soft-deleted ones included
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows at all
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Raw row for `id`, soft-deleted or not
    pub async fn row(&self, id: FamilyId) -> Option<FamilyRow> {
        self.rows.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl FamilyRepository for InMemoryFamilyRepository {
    async fn find_by_id(&self, id: FamilyId) -> DomainResult<Option<FamilyRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(&id)
            .filter(|row| row.deleted_at.is_none())
            .cloned()
            .map(FamilyRow::into_record))
    }

    async fn find_paginated(
        &self,
        filter: &FamilyFilter,
    ) -> DomainResult<ListPaginated<FamilyRecord>> {
        let resolved = filter.resolve(&self.config);
        let rows = self.rows.read().await;

        let matching: Vec<&FamilyRow> = rows
            .values()
            .filter(|row| row.deleted_at.is_none())
            .filter(|row| resolved.matches(&row.name, &row.document))
            .collect();

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(resolved.offset)
            .take(resolved.limit)
            .cloned()
            .map(FamilyRow::into_record)
            .collect();

        debug!(
            total,
            offset = resolved.offset,
            limit = resolved.limit,
            "Listed family records"
        );
        Ok(ListPaginated::new(items, total))
    }

    async fn find_descendants(&self, id: FamilyId) -> DomainResult<Vec<FamilyRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| row.deleted_at.is_none())
            .filter(|row| row.father_id == Some(id) || row.mother_id == Some(id))
            .cloned()
            .map(FamilyRow::into_record)
            .collect())
    }

    async fn persist(&self, record: FamilyRecord) -> DomainResult<FamilyRecord> {
        if let Err(err) = record.assert_valid() {
            warn!(
                id = %record.id(),
                issues = err.issues().len(),
                "Rejected invalid family record"
            );
            return Err(err.into());
        }

        let row = FamilyRow::from_record(&record);
        let mut rows = self.rows.write().await;
        match rows.get_mut(&row.id) {
            Some(existing) if existing.deleted_at.is_some() => {
                warn!(id = %record.id(), "Rejected write to a deleted family record");
                return Err(DomainError::not_found("Family", record.id()));
            }
            Some(existing) => {
                *existing = row;
                debug!(id = %record.id(), "Replaced family record");
            }
            None => {
                rows.shift_insert(0, row.id, row);
                debug!(id = %record.id(), "Inserted family record");
            }
        }

        Ok(record)
    }

    async fn delete(&self, id: FamilyId) -> DomainResult<()> {
        let mut rows = self.rows.write().await;

        let row = rows
            .get_mut(&id)
            .filter(|row| row.deleted_at.is_none())
            .ok_or_else(|| DomainError::not_found("Family", id))?;

        let mut record = row.clone().into_record();
        record.soft_delete();
        *row = FamilyRow::from_record(&record);

        let mut detached = 0usize;
        for row in rows.values_mut() {
            if row.father_id != Some(id) && row.mother_id != Some(id) {
                continue;
            }
            let mut child = row.clone().into_record();
            if child.detach_parent(id) {
                *row = FamilyRow::from_record(&child);
                detached += 1;
            }
        }

        info!(%id, detached, "Soft-deleted family record");
        Ok(())
    }
}

/// Builder for [`InMemoryFamilyRepository`]
#[derive(Debug, Default)]
pub struct InMemoryFamilyRepositoryBuilder {
    config: Option<RegistryConfig>,
    seed: Vec<FamilyRecord>,
}

impl InMemoryFamilyRepositoryBuilder {
    /// Use a specific configuration
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Pre-populate the store; records are listed in the order given
    pub fn seed(mut self, records: impl IntoIterator<Item = FamilyRecord>) -> Self {
        self.seed.extend(records);
        self
    }

    /// Validate the seed records and build the repository
    pub fn build(self) -> DomainResult<InMemoryFamilyRepository> {
        let mut rows = IndexMap::with_capacity(self.seed.len());
        for record in &self.seed {
            record.assert_valid()?;
            let row = FamilyRow::from_record(record);
            if rows.insert(row.id, row).is_some() {
                return Err(DomainError::InvalidOperation {
                    reason: format!("duplicate seed record {}", record.id()),
                });
            }
        }

        debug!(seeded = rows.len(), "Built in-memory family repository");
        Ok(InMemoryFamilyRepository {
            rows: Arc::new(RwLock::new(rows)),
            config: self.config.unwrap_or_default().sanitized(),
        })
    }
}
