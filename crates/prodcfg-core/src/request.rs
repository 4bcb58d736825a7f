//! Mutation request payloads.
//!
//! Create and update are distinct immutable types rather than one reused
//! mutable payload. Both wrap a row spec; the spec is produced by a pure
//! projection from form state, so conditional field clearing happens in
//! one place before a request is ever built.

use serde::Serialize;

use crate::EntityId;

/// Request to create a new configuration row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CreateRequest<T> {
    /// The row fields to store.
    pub spec: T,
}

impl<T> CreateRequest<T> {
    /// Wrap a projected spec.
    #[must_use]
    pub const fn new(spec: T) -> Self {
        Self { spec }
    }
}

/// Request to replace an existing configuration row.
///
/// The id addresses the row (it travels in the URL, not the body); the
/// spec fully replaces the stored fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRequest<T> {
    /// Row being replaced.
    #[serde(skip)]
    pub id: EntityId,
    /// Replacement fields.
    #[serde(flatten)]
    pub spec: T,
}

impl<T> UpdateRequest<T> {
    /// Wrap a projected spec addressed at `id`.
    #[must_use]
    pub const fn new(id: EntityId, spec: T) -> Self {
        Self { id, spec }
    }
}
