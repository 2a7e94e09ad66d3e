// Copyright 2025 Cowboy AI, LLC.

//! Family-member records
//!
//! A [`FamilyRecord`] is one person in the registry. Parent links are kept
//! twice on purpose: as identifiers (`father_id`, `mother_id`), which are
//! what gets persisted, and as optionally attached records (`father`,
//! `mother`, `children`), which an orchestration layer loads before
//! validation or presentation. The two can diverge; the validator reports
//! that as `relation.inconsistentId`.

mod mapper;
mod payload;
mod rules;

pub use mapper::{FamilyPresenter, FamilyRow};
pub use payload::CreateUpdateFamily;
pub use rules::{
    DOCUMENT_MAX_LENGTH, MIN_BIRTH_DATE, NAME_MAX_LENGTH, NAME_MIN_LENGTH,
};

use chrono::{DateTime, Utc};

use crate::entity::{DomainEntity, Entity, EntityId};
use crate::validation::{Validate, ValidationResult};

/// Marker type for family-member identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FamilyMarker;

/// Identifier of a family-member record
pub type FamilyId = EntityId<FamilyMarker>;

/// Attributes supplied when a record is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyAttributes {
    /// Full name
    pub name: String,
    /// Birth instant; `None` when missing or unparseable
    pub birth_date: Option<DateTime<Utc>>,
    /// Identity document
    pub document: String,
    /// Father's identifier
    pub father_id: Option<FamilyId>,
    /// Mother's identifier
    pub mother_id: Option<FamilyId>,
}

/// Partial update. `None` and blank strings leave the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyUpdate {
    /// New name
    pub name: Option<String>,
    /// New birth instant
    pub birth_date: Option<DateTime<Utc>>,
    /// New document
    pub document: Option<String>,
    /// New father identifier
    pub father_id: Option<FamilyId>,
    /// New mother identifier
    pub mother_id: Option<FamilyId>,
}

/// One family member with its audit envelope and optional attached relations
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyRecord {
    entity: Entity<FamilyMarker>,
    name: String,
    birth_date: Option<DateTime<Utc>>,
    document: String,
    father_id: Option<FamilyId>,
    mother_id: Option<FamilyId>,
    father: Option<Box<FamilyRecord>>,
    mother: Option<Box<FamilyRecord>>,
    children: Option<Vec<FamilyRecord>>,
}

impl FamilyRecord {
    /// Create a new record with a generated id and fresh timestamps
    pub fn new(attributes: FamilyAttributes) -> Self {
        Self::with_entity(Entity::new(), attributes)
    }

    /// Rebuild a record around an existing audit envelope
    pub fn with_entity(entity: Entity<FamilyMarker>, attributes: FamilyAttributes) -> Self {
        let FamilyAttributes {
            name,
            birth_date,
            document,
            father_id,
            mother_id,
        } = attributes;

        Self {
            entity,
            name,
            birth_date,
            document,
            father_id,
            mother_id,
            father: None,
            mother: None,
            children: None,
        }
    }

    /// Record identifier
    pub fn id(&self) -> FamilyId {
        self.entity.id
    }

    /// Audit envelope (id and lifecycle timestamps)
    pub fn entity(&self) -> &Entity<FamilyMarker> {
        &self.entity
    }

    /// Full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Birth instant, `None` when missing or unparseable
    pub fn birth_date(&self) -> Option<DateTime<Utc>> {
        self.birth_date
    }

    /// Identity document
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Father's identifier
    pub fn father_id(&self) -> Option<FamilyId> {
        self.father_id
    }

    /// Mother's identifier
    pub fn mother_id(&self) -> Option<FamilyId> {
        self.mother_id
    }

    /// Attached father record
    pub fn father(&self) -> Option<&FamilyRecord> {
        self.father.as_deref()
    }

    /// Attached mother record
    pub fn mother(&self) -> Option<&FamilyRecord> {
        self.mother.as_deref()
    }

    /// Attached children
    pub fn children(&self) -> Option<&[FamilyRecord]> {
        self.children.as_deref()
    }

    /// When the record was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.entity.created_at
    }

    /// When the record was last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.entity.updated_at
    }

    /// When the record was soft-deleted
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.entity.deleted_at
    }

    /// Whether the record has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.entity.is_deleted()
    }

    /// Apply a partial update.
    ///
    /// Only supplied, non-blank values overwrite. `updated_at` advances when
    /// at least one value actually changed; the return value says whether it did.
    pub fn update(&mut self, update: FamilyUpdate) -> bool {
        let mut changed = false;

        if let Some(name) = update.name.filter(|n| !n.trim().is_empty()) {
            changed |= replace_if_different(&mut self.name, name);
        }
        if let Some(birth_date) = update.birth_date {
            changed |= replace_if_different(&mut self.birth_date, Some(birth_date));
        }
        if let Some(document) = update.document.filter(|d| !d.trim().is_empty()) {
            changed |= replace_if_different(&mut self.document, document);
        }
        if let Some(father_id) = update.father_id {
            changed |= replace_if_different(&mut self.father_id, Some(father_id));
        }
        if let Some(mother_id) = update.mother_id {
            changed |= replace_if_different(&mut self.mother_id, Some(mother_id));
        }

        if changed {
            self.entity.touch();
        }
        changed
    }

    /// Clear a parent id that points at a removed record. Returns whether anything changed.
    pub fn detach_parent(&mut self, parent_id: FamilyId) -> bool {
        let mut changed = false;
        if self.father_id == Some(parent_id) {
            self.father_id = None;
            self.father = None;
            changed = true;
        }
        if self.mother_id == Some(parent_id) {
            self.mother_id = None;
            self.mother = None;
            changed = true;
        }
        if changed {
            self.entity.touch();
        }
        changed
    }

    /// Attach the father record
    pub fn set_father(&mut self, father: FamilyRecord) -> &mut Self {
        self.father = Some(Box::new(father));
        self
    }

    /// Attach the mother record
    pub fn set_mother(&mut self, mother: FamilyRecord) -> &mut Self {
        self.mother = Some(Box::new(mother));
        self
    }

    /// Attach the children
    pub fn set_children(&mut self, children: Vec<FamilyRecord>) -> &mut Self {
        self.children = Some(children);
        self
    }

    /// Drop every attached relation, keeping only identifiers
    pub fn without_relations(mut self) -> Self {
        self.father = None;
        self.mother = None;
        self.children = None;
        self
    }

    /// Stamp `deleted_at`. Returns `false` when already deleted.
    pub fn soft_delete(&mut self) -> bool {
        self.entity.soft_delete()
    }
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl DomainEntity for FamilyRecord {
    type IdType = FamilyMarker;

    fn id(&self) -> FamilyId {
        self.entity.id
    }
}

impl Validate for FamilyRecord {
    fn validate_all_at(&self, now: DateTime<Utc>) -> ValidationResult {
        rules::FamilyValidator::new(now).validate(self)
    }
}
