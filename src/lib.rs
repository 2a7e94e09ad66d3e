// Copyright 2025 Cowboy AI, LLC.

//! # Family Domain
//!
//! Domain core of a family-registry system: the family-member record, the
//! validator that guards it, and the thin layers around it.
//!
//! - **Entity**: audit envelope with typed identity and soft deletion
//! - **Family**: the [`FamilyRecord`] with its parent links and attached relations
//! - **Validation**: deterministic, exhaustive rule evaluation producing
//!   structured [`ValidationIssue`]s
//! - **Persistence**: the [`FamilyRepository`] contract and an in-memory store
//! - **Service**: existence checks and relation wiring around the repository
//!
//! ## Design Principles
//!
//! 1. **All issues at once**: validation never stops at the first failing rule
//! 2. **Deterministic**: identical input and evaluation instant give identical output
//! 3. **Pure rules**: the validator reads nothing but the record and the clock
//! 4. **Single failure kind**: invalid records surface as [`DomainValidationError`]
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use family_domain::{FamilyAttributes, FamilyRecord, IssueCode, Validate};
//!
//! let record = FamilyRecord::new(FamilyAttributes {
//!     name: "A".to_string(),
//!     birth_date: Some(Utc.with_ymd_and_hms(1990, 5, 20, 0, 0, 0).unwrap()),
//!     document: String::new(),
//!     father_id: None,
//!     mother_id: None,
//! });
//!
//! let result = record.validate_all();
//! assert!(!result.ok);
//! assert_eq!(
//!     result.codes(),
//!     vec![IssueCode::NameMinLength, IssueCode::DocumentRequired]
//! );
//! ```

#![warn(missing_docs)]

pub mod config;
mod entity;
mod errors;
pub mod family;
pub mod persistence;
mod service;
mod validation;

pub use config::RegistryConfig;
pub use entity::{DomainEntity, Entity, EntityId};
pub use errors::{DomainError, DomainResult};
pub use family::{
    CreateUpdateFamily, FamilyAttributes, FamilyId, FamilyMarker, FamilyPresenter, FamilyRecord,
    FamilyRow, FamilyUpdate,
};
pub use persistence::{
    FamilyFilter, FamilyRepository, InMemoryFamilyRepository, InMemoryFamilyRepositoryBuilder,
    ListPaginated,
};
pub use service::FamilyService;
pub use validation::{
    DomainValidationError, IssueCode, Validate, ValidationIssue, ValidationResult,
};
