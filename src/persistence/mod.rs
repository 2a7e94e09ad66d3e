// Copyright 2025 Cowboy AI, LLC.

//! # Persistence Layer
//!
//! Storage for family records behind the [`FamilyRepository`] trait.
//!
//! ## Components
//!
//! - **Repository contract**: keyed lookup, paginated search, descendant lookup,
//!   validated persist and cascading soft delete
//! - **Query support**: search filter, text normalization and paginated results
//! - **In-memory store**: ordered map implementation used by services and tests

pub mod in_memory_repository;
pub mod query_support;
pub mod repository;

pub use in_memory_repository::{InMemoryFamilyRepository, InMemoryFamilyRepositoryBuilder};
pub use query_support::{normalize_basic, FamilyFilter, ListPaginated, ResolvedFilter};
pub use repository::FamilyRepository;

#[cfg(test)]
pub use repository::MockFamilyRepository;
