// Copyright 2025 Cowboy AI, LLC.

//! Entity types with identity and an audited lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::DomainError;

/// Audit envelope shared by every entity: identity plus lifecycle timestamps
///
/// `created_at` is stamped once, `updated_at` moves forward on every
/// mutation and `deleted_at` is stamped once on soft deletion. Ordering
/// between these instants is checked by validators, not by construction,
/// so a rehydrated entity may carry inconsistent values.
///
/// # Examples
///
/// ```rust
/// use family_domain::{Entity, EntityId};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// struct Customer;
///
/// let customer = Entity::<Customer>::new();
/// assert_eq!(customer.created_at, customer.updated_at);
/// assert!(!customer.is_deleted());
///
/// let id = EntityId::<Customer>::new();
/// let customer = Entity::with_id(id);
/// assert_eq!(customer.id, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Entity<T> {
    /// The unique identifier for this entity
    pub id: EntityId<T>,
    /// When this entity was created
    pub created_at: DateTime<Utc>,
    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,
    /// When this entity was soft-deleted, if ever
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<T> Entity<T> {
    /// Create a new entity with a generated ID
    pub fn new() -> Self {
        Self::with_id(EntityId::new())
    }

    /// Create an entity with a specific ID
    pub fn with_id(id: EntityId<T>) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Advance `updated_at` to the current instant
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Stamp `deleted_at`. Returns `false` when the entity was already deleted.
    pub fn soft_delete(&mut self) -> bool {
        if self.deleted_at.is_some() {
            return false;
        }
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Whether `deleted_at` has been stamped
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl<T> Default for Entity<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A typed entity ID using phantom types for type safety
///
/// Equality is value equality on the wrapped UUID. The phantom type
/// parameter keeps IDs of different entity types apart at compile time.
///
/// # Examples
///
/// ```rust
/// use family_domain::EntityId;
///
/// struct User;
/// struct Product;
///
/// let user_id = EntityId::<User>::new();
/// let parsed: EntityId<User> = user_id.to_string().parse().unwrap();
/// assert_eq!(user_id, parsed);
///
/// // let _: EntityId<Product> = user_id; // does not compile
/// let casted: EntityId<Product> = user_id.cast();
/// assert_eq!(casted.as_uuid(), user_id.as_uuid());
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId<T> {
    id: Uuid,
    #[serde(skip)]
    _phantom: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an entity ID from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.id
    }

    /// Convert to a different entity ID type (use with caution)
    pub fn cast<U>(self) -> EntityId<U> {
        EntityId::from_uuid(self.id)
    }
}

// Manual impls so marker types need not implement these traits themselves.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityId").field(&self.id).finish()
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Default for EntityId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromStr for EntityId<T> {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s.trim())?))
    }
}

impl<T> From<Uuid> for EntityId<T> {
    fn from(id: Uuid) -> Self {
        Self::from_uuid(id)
    }
}

impl<T> From<EntityId<T>> for Uuid {
    fn from(id: EntityId<T>) -> Self {
        id.id
    }
}

/// Trait for domain entities with identity
pub trait DomainEntity: Sized + Send + Sync {
    /// The marker type for this entity
    type IdType;

    /// Get the entity's ID
    fn id(&self) -> EntityId<Self::IdType>;
}
