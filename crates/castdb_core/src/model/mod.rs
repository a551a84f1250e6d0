//! Domain model for the cast database.
//!
//! # Responsibility
//! - Define the records exchanged between callers and the repository layer.
//! - Keep list filtering input as a plain, request-scoped value.
//!
//! # Invariants
//! - An id of `0` means "not yet persisted"; the store assigns real ids.
//! - Actors are read-only from the core's perspective.

pub mod character;
