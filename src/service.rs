// Copyright 2025 Cowboy AI, LLC.

//! Family service
//!
//! Orchestration on top of a [`FamilyRepository`]: existence checks for the
//! record and its parents, wiring of attached relations, and delegation to
//! the repository, which validates on persist.

use futures::try_join;
use tracing::{debug, info};

use crate::errors::{DomainError, DomainResult};
use crate::family::{CreateUpdateFamily, FamilyId, FamilyRecord};
use crate::persistence::{FamilyFilter, FamilyRepository, ListPaginated};

/// Use-case layer for the family registry
#[derive(Debug, Clone)]
pub struct FamilyService<R> {
    repository: R,
}

impl<R: FamilyRepository> FamilyService<R> {
    /// Create a service over a repository
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Load a record with its father, mother and children attached
    ///
    /// Fails with `EntityNotFound` when the record does not exist or has
    /// been deleted. Parents that no longer resolve are left unattached.
    pub async fn find_by_id(&self, id: FamilyId) -> DomainResult<FamilyRecord> {
        let mut record = self.require(id).await?;

        let (father, mother, children) = try_join!(
            self.lookup(record.father_id()),
            self.lookup(record.mother_id()),
            self.repository.find_descendants(id),
        )?;

        if let Some(father) = father {
            record.set_father(father);
        }
        if let Some(mother) = mother {
            record.set_mother(mother);
        }
        record.set_children(children);

        debug!(%id, "Loaded family record with relations");
        Ok(record)
    }

    /// One page of records matching the filter
    pub async fn find_paginated(
        &self,
        filter: &FamilyFilter,
    ) -> DomainResult<ListPaginated<FamilyRecord>> {
        self.repository.find_paginated(filter).await
    }

    /// Create a record from a client payload
    ///
    /// Referenced parents must exist; they are attached so that the
    /// relation rules see them when the repository validates.
    pub async fn create(&self, payload: CreateUpdateFamily) -> DomainResult<FamilyRecord> {
        let attributes = payload.into_attributes()?;
        let mut record = FamilyRecord::new(attributes);

        self.attach_parents(&mut record).await?;
        let stored = self.repository.persist(record).await?;

        info!(id = %stored.id(), "Created family record");
        Ok(stored)
    }

    /// Apply a client payload to an existing record
    ///
    /// Blank or absent fields keep their current value. Parents, old or
    /// new, must exist and are re-attached before the record is persisted.
    pub async fn update(
        &self,
        id: FamilyId,
        payload: CreateUpdateFamily,
    ) -> DomainResult<FamilyRecord> {
        let update = payload.into_update()?;
        let mut record = self.require(id).await?;

        let changed = record.update(update);
        self.attach_parents(&mut record).await?;
        let stored = self.repository.persist(record).await?;

        info!(%id, changed, "Updated family record");
        Ok(stored)
    }

    /// Soft-delete a record and detach its children
    pub async fn delete(&self, id: FamilyId) -> DomainResult<()> {
        self.require(id).await?;
        self.repository.delete(id).await?;

        info!(%id, "Deleted family record");
        Ok(())
    }

    async fn require(&self, id: FamilyId) -> DomainResult<FamilyRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Family", id))
    }

    async fn lookup(&self, id: Option<FamilyId>) -> DomainResult<Option<FamilyRecord>> {
        match id {
            Some(id) => self.repository.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn resolve_parent(
        &self,
        id: Option<FamilyId>,
        role: &'static str,
    ) -> DomainResult<Option<FamilyRecord>> {
        let Some(id) = id else {
            return Ok(None);
        };
        match self.repository.find_by_id(id).await? {
            Some(parent) => Ok(Some(parent)),
            None => {
                debug!(%id, role, "Referenced parent does not exist");
                Err(DomainError::not_found(role, id))
            }
        }
    }

    async fn attach_parents(&self, record: &mut FamilyRecord) -> DomainResult<()> {
        let (father, mother) = try_join!(
            self.resolve_parent(record.father_id(), "Father"),
            self.resolve_parent(record.mother_id(), "Mother"),
        )?;

        if let Some(father) = father {
            record.set_father(father);
        }
        if let Some(mother) = mother {
            record.set_mother(mother);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::FamilyAttributes;
    use crate::persistence::{InMemoryFamilyRepository, MockFamilyRepository};
    use crate::validation::IssueCode;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn person(name: &str, year: i32) -> FamilyRecord {
        FamilyRecord::new(FamilyAttributes {
            name: name.to_string(),
            birth_date: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
            document: format!("doc-{}", name.to_lowercase()),
            father_id: None,
            mother_id: None,
        })
    }

    fn payload(name: &str, birth_date: &str) -> CreateUpdateFamily {
        CreateUpdateFamily {
            name: name.to_string(),
            birth_date: Some(birth_date.to_string()),
            document: format!("doc-{}", name.to_lowercase()),
            father_id: None,
            mother_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_missing_father_is_not_found() {
        let mut repository = MockFamilyRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_persist().never();

        let service = FamilyService::new(repository);
        let err = service
            .create(CreateUpdateFamily {
                father_id: Some(FamilyId::new().to_string()),
                ..payload("Child", "2000-01-01")
            })
            .await
            .unwrap_err();

        match err {
            DomainError::EntityNotFound { entity_type, .. } => assert_eq!(entity_type, "Father"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_attaches_parents_before_persist() {
        let father = person("Father", 1960);
        let father_id = father.id();

        let mut repository = MockFamilyRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == father_id)
            .returning(move |_| Ok(Some(father.clone())));
        repository
            .expect_persist()
            .withf(move |record| record.father().map(FamilyRecord::id) == Some(father_id))
            .times(1)
            .returning(Ok);

        let service = FamilyService::new(repository);
        let created = service
            .create(CreateUpdateFamily {
                father_id: Some(father_id.to_string()),
                ..payload("Child", "1990-06-15")
            })
            .await
            .unwrap();

        assert_eq!(created.father_id(), Some(father_id));
    }

    #[tokio::test]
    async fn test_create_rejects_child_older_than_father() {
        let repository = InMemoryFamilyRepository::default();
        let service = FamilyService::new(repository.clone());
        let father = service.create(payload("Father", "1990-01-01")).await.unwrap();

        let err = service
            .create(CreateUpdateFamily {
                father_id: Some(father.id().to_string()),
                ..payload("Child", "1980-01-01")
            })
            .await
            .unwrap_err();

        let issues = err.validation_issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "father.birthDate");
        assert_eq!(issues[0].code, IssueCode::BirthOrder);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_malformed_parent_id_is_invalid_identifier() {
        let service = FamilyService::new(InMemoryFamilyRepository::default());
        let err = service
            .create(CreateUpdateFamily {
                mother_id: Some("not-a-uuid".to_string()),
                ..payload("Child", "2000-01-01")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidIdentifier(_)));
    }

    /// Test that find_by_id attaches every relation
    ///
    /// ```mermaid
    /// graph TD
    ///     F[Father] --> P[Person]
    ///     M[Mother] --> P
    ///     P --> C1[Child 1]
    ///     P --> C2[Child 2]
    /// ```
    #[tokio::test]
    async fn test_find_by_id_attaches_relations() {
        let service = FamilyService::new(InMemoryFamilyRepository::default());
        let father = service.create(payload("Father", "1950-01-01")).await.unwrap();
        let mother = service.create(payload("Mother", "1952-01-01")).await.unwrap();
        let person = service
            .create(CreateUpdateFamily {
                father_id: Some(father.id().to_string()),
                mother_id: Some(mother.id().to_string()),
                ..payload("Person", "1980-01-01")
            })
            .await
            .unwrap();
        for name in ["Kid One", "Kid Two"] {
            service
                .create(CreateUpdateFamily {
                    father_id: Some(person.id().to_string()),
                    ..payload(name, "2010-01-01")
                })
                .await
                .unwrap();
        }

        let loaded = service.find_by_id(person.id()).await.unwrap();

        assert_eq!(loaded.father().map(FamilyRecord::name), Some("Father"));
        assert_eq!(loaded.mother().map(FamilyRecord::name), Some("Mother"));
        let mut children: Vec<_> = loaded
            .children()
            .unwrap()
            .iter()
            .map(FamilyRecord::name)
            .collect();
        children.sort_unstable();
        assert_eq!(children, vec!["Kid One", "Kid Two"]);
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let service = FamilyService::new(InMemoryFamilyRepository::default());
        let err = service.find_by_id(FamilyId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_applies_payload_and_reattaches_parents() {
        let service = FamilyService::new(InMemoryFamilyRepository::default());
        let old_father = service.create(payload("Old Father", "1950-01-01")).await.unwrap();
        let new_father = service.create(payload("New Father", "1955-01-01")).await.unwrap();
        let child = service
            .create(CreateUpdateFamily {
                father_id: Some(old_father.id().to_string()),
                ..payload("Child", "1990-01-01")
            })
            .await
            .unwrap();

        let updated = service
            .update(
                child.id(),
                CreateUpdateFamily {
                    name: "  Child   Renamed ".to_string(),
                    father_id: Some(new_father.id().to_string()),
                    ..CreateUpdateFamily::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Child Renamed");
        assert_eq!(updated.document(), "doc-child");
        assert_eq!(updated.father().map(FamilyRecord::id), Some(new_father.id()));
        assert!(updated.updated_at() >= child.updated_at());
    }

    #[tokio::test]
    async fn test_update_unknown_record_is_not_found() {
        let mut repository = MockFamilyRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_persist().never();

        let service = FamilyService::new(repository);
        let err = service
            .update(FamilyId::new(), payload("Anyone", "2000-01-01"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_unknown_record_does_not_reach_repository_delete() {
        let mut repository = MockFamilyRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_delete().never();

        let service = FamilyService::new(repository);
        assert!(service.delete(FamilyId::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_detaches_children() {
        let service = FamilyService::new(InMemoryFamilyRepository::default());
        let parent = service.create(payload("Parent", "1950-01-01")).await.unwrap();
        let child = service
            .create(CreateUpdateFamily {
                mother_id: Some(parent.id().to_string()),
                ..payload("Child", "1980-01-01")
            })
            .await
            .unwrap();

        service.delete(parent.id()).await.unwrap();

        assert!(service.find_by_id(parent.id()).await.unwrap_err().is_not_found());
        let child = service.find_by_id(child.id()).await.unwrap();
        assert_eq!(child.mother_id(), None);
        assert!(child.mother().is_none());
    }
}
