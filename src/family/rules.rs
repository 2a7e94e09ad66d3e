// Copyright 2025 Cowboy AI, LLC.

//! Validation rules for family-member records
//!
//! Rule groups run unconditionally and in a fixed order (name, document,
//! birth date, audit timestamps, relations), so the same snapshot always
//! yields the same issue list in the same order.

use chrono::{DateTime, TimeZone, Utc};

use super::FamilyRecord;
use crate::validation::{IssueCode, ValidationIssue, ValidationResult};

// Lengths are counted in Unicode scalar values (`chars()`), so a character
// outside the Basic Multilingual Plane counts once, not as a surrogate pair.

/// Minimum name length, in characters after trimming
pub const NAME_MIN_LENGTH: usize = 2;
/// Maximum name length, in characters after trimming
pub const NAME_MAX_LENGTH: usize = 120;
/// Maximum document length, in characters after trimming
pub const DOCUMENT_MAX_LENGTH: usize = 50;
/// Message attached to `birthDate.invalid`
pub(crate) const BIRTH_DATE_INVALID_MESSAGE: &str = "Birth date is invalid.";
/// Earliest accepted birth date, as (year, month, day) at 00:00:00 UTC
pub const MIN_BIRTH_DATE: (i32, u32, u32) = (1900, 1, 1);

/// Runs the full rule set against one record at a fixed evaluation instant
pub(crate) struct FamilyValidator {
    now: DateTime<Utc>,
    min_birth: DateTime<Utc>,
}

impl FamilyValidator {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        let (year, month, day) = MIN_BIRTH_DATE;
        let min_birth = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { now, min_birth }
    }

    pub(crate) fn validate(&self, record: &FamilyRecord) -> ValidationResult {
        let mut issues = Vec::new();
        validate_name(record, &mut issues);
        validate_document(record, &mut issues);
        self.validate_birth_date(record, &mut issues);
        self.validate_audit_timestamps(record, &mut issues);
        validate_relations(record, &mut issues);
        ValidationResult::from_issues(issues)
    }

    fn validate_birth_date(&self, record: &FamilyRecord, issues: &mut Vec<ValidationIssue>) {
        let Some(birth_date) = record.birth_date else {
            issues.push(ValidationIssue::new(
                "birthDate",
                IssueCode::BirthDateInvalid,
                BIRTH_DATE_INVALID_MESSAGE,
            ));
            return;
        };

        if birth_date < self.min_birth {
            issues.push(ValidationIssue::new(
                "birthDate",
                IssueCode::BirthDateTooEarly,
                "Birth date is too early.",
            ));
        }
        if birth_date > self.now {
            issues.push(ValidationIssue::new(
                "birthDate",
                IssueCode::BirthDateInFuture,
                "Birth date cannot be in the future.",
            ));
        }
    }

    fn validate_audit_timestamps(&self, record: &FamilyRecord, issues: &mut Vec<ValidationIssue>) {
        let entity = &record.entity;

        if entity.created_at > self.now {
            issues.push(ValidationIssue::new(
                "createdAt",
                IssueCode::CreatedAtInvalid,
                "createdAt is invalid.",
            ));
        }

        if entity.updated_at < entity.created_at || entity.updated_at > self.now {
            issues.push(ValidationIssue::new(
                "updatedAt",
                IssueCode::UpdatedAtInvalid,
                "updatedAt is invalid.",
            ));
        }

        if let Some(deleted_at) = entity.deleted_at {
            if deleted_at < entity.created_at || deleted_at > self.now {
                issues.push(ValidationIssue::new(
                    "deletedAt",
                    IssueCode::DeletedAtInvalid,
                    "deletedAt is invalid.",
                ));
            }
        }
    }
}

fn validate_name(record: &FamilyRecord, issues: &mut Vec<ValidationIssue>) {
    let length = record.name.trim().chars().count();

    if length < NAME_MIN_LENGTH {
        issues.push(ValidationIssue::new(
            "name",
            IssueCode::NameMinLength,
            format!("Name must have at least {NAME_MIN_LENGTH} characters."),
        ));
    }
    if length > NAME_MAX_LENGTH {
        issues.push(ValidationIssue::new(
            "name",
            IssueCode::NameMaxLength,
            format!("Name must have at most {NAME_MAX_LENGTH} characters."),
        ));
    }
}

fn validate_document(record: &FamilyRecord, issues: &mut Vec<ValidationIssue>) {
    let length = record.document.trim().chars().count();

    if length == 0 {
        issues.push(ValidationIssue::new(
            "document",
            IssueCode::DocumentRequired,
            "Document is required.",
        ));
    } else if length > DOCUMENT_MAX_LENGTH {
        issues.push(ValidationIssue::new(
            "document",
            IssueCode::DocumentMaxLength,
            format!("Document must have at most {DOCUMENT_MAX_LENGTH} characters."),
        ));
    }
}

/// Which parent a relation rule is looking at
#[derive(Clone, Copy)]
enum Parent {
    Father,
    Mother,
}

impl Parent {
    fn id_path(self) -> &'static str {
        match self {
            Parent::Father => "fatherId",
            Parent::Mother => "motherId",
        }
    }

    fn relation_path(self) -> &'static str {
        match self {
            Parent::Father => "father",
            Parent::Mother => "mother",
        }
    }

    fn birth_date_path(self) -> &'static str {
        match self {
            Parent::Father => "father.birthDate",
            Parent::Mother => "mother.birthDate",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Parent::Father => "Father",
            Parent::Mother => "Mother",
        }
    }
}

fn validate_relations(record: &FamilyRecord, issues: &mut Vec<ValidationIssue>) {
    let self_id = record.id();
    let father_id = record.father_id;
    let mother_id = record.mother_id;

    for (parent, parent_id) in [(Parent::Father, father_id), (Parent::Mother, mother_id)] {
        if parent_id == Some(self_id) {
            issues.push(ValidationIssue::new(
                parent.id_path(),
                IssueCode::SelfParent,
                format!("{} cannot be self.", parent.label()),
            ));
        }
    }

    if let (Some(father), Some(mother)) = (father_id, mother_id) {
        if father == mother {
            issues.push(ValidationIssue::new(
                "fatherId|motherId",
                IssueCode::ParentsDistinct,
                "Father and mother must be different.",
            ));
        }
    }

    let attached = [
        (Parent::Father, record.father(), father_id),
        (Parent::Mother, record.mother(), mother_id),
    ];

    for (parent, reference, parent_id) in attached {
        if let Some(reference) = reference {
            if Some(reference.id()) != parent_id {
                issues.push(ValidationIssue::new(
                    parent.relation_path(),
                    IssueCode::InconsistentId,
                    format!(
                        "{} entity does not match {}.",
                        parent.label(),
                        parent.id_path()
                    ),
                ));
            }
        }
    }

    // An attached parent with no birth date always fails. A child with no
    // birth date cannot be ordered against, so only the parent's side counts.
    for (parent, reference, _) in attached {
        let Some(reference) = reference else {
            continue;
        };
        let out_of_order = match (reference.birth_date, record.birth_date) {
            (None, _) => true,
            (Some(parent_birth), Some(child_birth)) => parent_birth >= child_birth,
            (Some(_), None) => false,
        };
        if out_of_order {
            issues.push(ValidationIssue::new(
                parent.birth_date_path(),
                IssueCode::BirthOrder,
                format!(
                    "{}'s birth date must be before child's birth date.",
                    parent.label()
                ),
            ));
        }
    }
}
