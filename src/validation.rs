// Copyright 2025 Cowboy AI, LLC.

//! Validation results, issues and the validation failure type
//!
//! A validation pass never stops at the first failing rule: it collects
//! every [`ValidationIssue`] into a [`ValidationResult`]. Callers that need
//! a hard gate use [`Validate::assert_valid`], which turns a failed pass into
//! a [`DomainValidationError`] carrying the complete issue list.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable machine-readable identifier of a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum IssueCode {
    /// Trimmed name shorter than the minimum
    #[serde(rename = "name.minLength")]
    NameMinLength,
    /// Trimmed name longer than the maximum
    #[serde(rename = "name.maxLength")]
    NameMaxLength,
    /// Document empty after trimming
    #[serde(rename = "document.required")]
    DocumentRequired,
    /// Trimmed document longer than the maximum
    #[serde(rename = "document.maxLength")]
    DocumentMaxLength,
    /// Birth date missing or unparseable
    #[serde(rename = "birthDate.invalid")]
    BirthDateInvalid,
    /// Birth date before the earliest accepted date
    #[serde(rename = "birthDate.tooEarly")]
    BirthDateTooEarly,
    /// Birth date after the evaluation instant
    #[serde(rename = "birthDate.inFuture")]
    BirthDateInFuture,
    /// Creation timestamp in the future
    #[serde(rename = "createdAt.invalid")]
    CreatedAtInvalid,
    /// Update timestamp out of order
    #[serde(rename = "updatedAt.invalid")]
    UpdatedAtInvalid,
    /// Deletion timestamp out of order
    #[serde(rename = "deletedAt.invalid")]
    DeletedAtInvalid,
    /// A parent id points at the record itself
    #[serde(rename = "relation.selfParent")]
    SelfParent,
    /// Father and mother ids are the same
    #[serde(rename = "relation.parentsDistinct")]
    ParentsDistinct,
    /// Attached parent does not match the parent id
    #[serde(rename = "relation.inconsistentId")]
    InconsistentId,
    /// Attached parent not born strictly before the record
    #[serde(rename = "relation.birthOrder")]
    BirthOrder,
}

impl IssueCode {
    /// The dotted wire identifier, e.g. `"relation.selfParent"`
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::NameMinLength => "name.minLength",
            IssueCode::NameMaxLength => "name.maxLength",
            IssueCode::DocumentRequired => "document.required",
            IssueCode::DocumentMaxLength => "document.maxLength",
            IssueCode::BirthDateInvalid => "birthDate.invalid",
            IssueCode::BirthDateTooEarly => "birthDate.tooEarly",
            IssueCode::BirthDateInFuture => "birthDate.inFuture",
            IssueCode::CreatedAtInvalid => "createdAt.invalid",
            IssueCode::UpdatedAtInvalid => "updatedAt.invalid",
            IssueCode::DeletedAtInvalid => "deletedAt.invalid",
            IssueCode::SelfParent => "relation.selfParent",
            IssueCode::ParentsDistinct => "relation.parentsDistinct",
            IssueCode::InconsistentId => "relation.inconsistentId",
            IssueCode::BirthOrder => "relation.birthOrder",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    /// Field or relation path, e.g. `birthDate`, `father.birthDate` or `fatherId|motherId`
    pub path: String,
    /// Rule identifier
    pub code: IssueCode,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue
    pub fn new(path: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.code, self.message)
    }
}

/// Outcome of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    /// `true` when `errors` is empty
    pub ok: bool,
    /// Every failing check, in evaluation order
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Build a result from collected issues
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Whether any issue was reported for `path`
    pub fn has_issue(&self, path: &str, code: IssueCode) -> bool {
        self.errors
            .iter()
            .any(|issue| issue.path == path && issue.code == code)
    }

    /// Issue codes in evaluation order
    pub fn codes(&self) -> Vec<IssueCode> {
        self.errors.iter().map(|issue| issue.code).collect()
    }

    /// Turn a failed pass into an error
    pub fn into_result(self) -> Result<(), DomainValidationError> {
        if self.ok {
            Ok(())
        } else {
            Err(DomainValidationError::new(self.errors))
        }
    }
}

/// A record failed validation
///
/// Carries the complete, ordered issue list of the failed pass so a
/// transport adapter can report it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DomainValidationError {
    message: String,
    issues: Vec<ValidationIssue>,
}

impl DomainValidationError {
    /// Create an error with a summary message derived from the issues
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty(), "a validation error needs at least one issue");
        let message = match issues.as_slice() {
            [single] => format!("Validation failed: {single}"),
            _ => format!("Validation failed with {} issues", issues.len()),
        };
        Self { message, issues }
    }

    /// Summary message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The issues of the failed pass
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Take ownership of the issues
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

/// Types that run a full, non-fail-fast validation pass over themselves
pub trait Validate {
    /// Run every rule against the given evaluation instant
    fn validate_all_at(&self, now: DateTime<Utc>) -> ValidationResult;

    /// Run every rule against the current instant
    fn validate_all(&self) -> ValidationResult {
        self.validate_all_at(Utc::now())
    }

    /// Whether every rule currently holds
    fn validate(&self) -> bool {
        self.validate_all().ok
    }

    /// Return `self` unchanged when valid, otherwise the full issue list as an error
    fn assert_valid(&self) -> Result<&Self, DomainValidationError> {
        self.validate_all().into_result()?;
        Ok(self)
    }
}
