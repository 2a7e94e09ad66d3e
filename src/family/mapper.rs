// Copyright 2025 Cowboy AI, LLC.

//! Persistence and presentation shapes for family records

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{FamilyAttributes, FamilyId, FamilyRecord};
use crate::entity::Entity;

/// Flat storage row. Attached relations are never stored, only parent ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRow {
    /// Record identifier
    pub id: FamilyId,
    /// Full name
    pub name: String,
    /// Birth instant
    pub birth_date: Option<DateTime<Utc>>,
    /// Identity document
    pub document: String,
    /// Father's identifier
    pub father_id: Option<FamilyId>,
    /// Mother's identifier
    pub mother_id: Option<FamilyId>,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Last update instant
    pub updated_at: DateTime<Utc>,
    /// Soft deletion instant
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FamilyRow {
    /// Flatten a record for storage
    pub fn from_record(record: &FamilyRecord) -> Self {
        let entity = record.entity();
        Self {
            id: entity.id,
            name: record.name().to_string(),
            birth_date: record.birth_date(),
            document: record.document().to_string(),
            father_id: record.father_id(),
            mother_id: record.mother_id(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
        }
    }

    /// Rehydrate a record without attached relations
    pub fn into_record(self) -> FamilyRecord {
        let entity = Entity {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        };
        FamilyRecord::with_entity(
            entity,
            FamilyAttributes {
                name: self.name,
                birth_date: self.birth_date,
                document: self.document,
                father_id: self.father_id,
                mother_id: self.mother_id,
            },
        )
    }
}

/// Client-facing view of a record, nesting whatever relations are attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPresenter {
    /// Record identifier
    pub id: String,
    /// Full name
    pub name: String,
    /// Birth instant
    pub birth_date: Option<DateTime<Utc>>,
    /// Identity document
    pub document: String,
    /// Father's identifier
    pub father_id: Option<String>,
    /// Mother's identifier
    pub mother_id: Option<String>,
    /// Attached father
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<Box<FamilyPresenter>>,
    /// Attached mother
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<Box<FamilyPresenter>>,
    /// Attached children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FamilyPresenter>>,
}

impl FamilyPresenter {
    /// Map a record and, recursively, its attached relations
    pub fn from_record(record: &FamilyRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            birth_date: record.birth_date(),
            document: record.document().to_string(),
            father_id: record.father_id().map(|id| id.to_string()),
            mother_id: record.mother_id().map(|id| id.to_string()),
            father: record.father().map(|f| Box::new(Self::from_record(f))),
            mother: record.mother().map(|m| Box::new(Self::from_record(m))),
            children: record
                .children()
                .map(|children| children.iter().map(Self::from_record).collect()),
        }
    }
}

impl From<&FamilyRecord> for FamilyPresenter {
    fn from(record: &FamilyRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, year: i32) -> FamilyRecord {
        child_of(name, year, None)
    }

    fn child_of(name: &str, year: i32, father_id: Option<FamilyId>) -> FamilyRecord {
        FamilyRecord::new(FamilyAttributes {
            name: name.to_string(),
            birth_date: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
            document: format!("doc-{name}"),
            father_id,
            mother_id: None,
        })
    }

    #[test]
    fn test_row_drops_relations() {
        let father = record("Father", 1960);
        let mut child = child_of("Child", 1990, Some(father.id()));
        child.set_father(father.clone());

        let row = FamilyRow::from_record(&child);
        assert_eq!(row.father_id, Some(father.id()));

        let restored = row.into_record();
        assert_eq!(restored.id(), child.id());
        assert_eq!(restored.created_at(), child.created_at());
        assert!(restored.father().is_none());
        assert_eq!(restored, child.without_relations());
    }

    /// Test presenter nesting
    ///
    /// ```mermaid
    /// graph TD
    ///     P[Presenter] -->|father| F[Father presenter]
    ///     P -->|children| C[Child presenters]
    /// ```
    #[test]
    fn test_presenter_nests_attached_relations() {
        let father = record("Father", 1960);
        let grandchild = record("Grandchild", 2020);
        let mut person = child_of("Person", 1990, Some(father.id()));
        person.set_father(father.clone()).set_children(vec![grandchild]);

        let view = FamilyPresenter::from(&person);
        assert_eq!(view.father_id, Some(father.id().to_string()));
        assert_eq!(view.father.as_ref().map(|f| f.name.as_str()), Some("Father"));
        assert!(view.mother.is_none());
        assert_eq!(view.children.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_presenter_omits_unattached_relations_on_the_wire() {
        let view = FamilyPresenter::from_record(&record("Solo", 1980));
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("father").is_none());
        assert!(json.get("children").is_none());
        assert_eq!(json["fatherId"], serde_json::Value::Null);
        assert_eq!(json["birthDate"], "1980-01-01T00:00:00Z");
    }
}
