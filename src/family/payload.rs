// Copyright 2025 Cowboy AI, LLC.

//! Create/update payload and its normalization

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::rules::BIRTH_DATE_INVALID_MESSAGE;
use super::{FamilyAttributes, FamilyId, FamilyUpdate};
use crate::errors::{DomainError, DomainResult};
use crate::validation::{DomainValidationError, IssueCode, ValidationIssue};

/// Client-supplied fields for creating or updating a record
///
/// Everything arrives as text. Normalization trims values, collapses runs
/// of whitespace inside the name and treats blank parent ids as absent. A
/// birth date that cannot be parsed becomes `None` on create, which the
/// validator reports as `birthDate.invalid`, and is rejected outright on
/// update. A malformed parent id is rejected here on both paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateFamily {
    /// Full name
    #[serde(default)]
    pub name: String,
    /// RFC 3339 instant or `YYYY-MM-DD` date
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Identity document
    #[serde(default)]
    pub document: String,
    /// Father's identifier (UUID)
    #[serde(default)]
    pub father_id: Option<String>,
    /// Mother's identifier (UUID)
    #[serde(default)]
    pub mother_id: Option<String>,
}

impl CreateUpdateFamily {
    /// Trim values, collapse whitespace in the name and drop blank optionals
    pub fn normalized(self) -> Self {
        Self {
            name: collapse_whitespace(&self.name),
            birth_date: non_blank(self.birth_date),
            document: self.document.trim().to_string(),
            father_id: non_blank(self.father_id),
            mother_id: non_blank(self.mother_id),
        }
    }

    /// Attributes for a new record
    pub fn into_attributes(self) -> DomainResult<FamilyAttributes> {
        let payload = self.normalized();
        let (father_id, mother_id) = payload.parent_ids()?;

        Ok(FamilyAttributes {
            birth_date: payload.birth_date.as_deref().and_then(parse_birth_date),
            name: payload.name,
            document: payload.document,
            father_id,
            mother_id,
        })
    }

    /// Partial update for an existing record
    ///
    /// A birth date that was supplied but cannot be parsed is rejected with
    /// a `birthDate.invalid` issue instead of leaving the stored date alone.
    pub fn into_update(self) -> DomainResult<FamilyUpdate> {
        let payload = self.normalized();
        let (father_id, mother_id) = payload.parent_ids()?;
        let birth_date = match payload.birth_date.as_deref() {
            Some(text) => Some(parse_birth_date(text).ok_or_else(invalid_birth_date)?),
            None => None,
        };

        Ok(FamilyUpdate {
            birth_date,
            name: Some(payload.name).filter(|n| !n.is_empty()),
            document: Some(payload.document).filter(|d| !d.is_empty()),
            father_id,
            mother_id,
        })
    }

    fn parent_ids(&self) -> DomainResult<(Option<FamilyId>, Option<FamilyId>)> {
        let father_id = self.father_id.as_deref().map(str::parse::<FamilyId>).transpose()?;
        let mother_id = self.mother_id.as_deref().map(str::parse::<FamilyId>).transpose()?;
        Ok((father_id, mother_id))
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid_birth_date() -> DomainError {
    DomainValidationError::new(vec![ValidationIssue::new(
        "birthDate",
        IssueCode::BirthDateInvalid,
        BIRTH_DATE_INVALID_MESSAGE,
    )])
    .into()
}

fn parse_birth_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
