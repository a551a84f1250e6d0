//! Repository layer for the cast database.
//!
//! # Responsibility
//! - Define the character data access contract.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Reads report absence as `None`; writes report absence as `NotFound`.
//! - List filtering goes through `query_plan`, never ad-hoc SQL strings.

pub mod character_repo;
pub mod query_plan;
