//! SQLite connection bootstrap and fixture loading.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the cast database.
//! - Install the fixed `actors` / `characters` / `scene_characters` schema.
//! - Load the bundled cast fixture on request.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Schema installation is idempotent; there is no versioned migration.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod fixture;
mod open;

pub use fixture::populate;
pub use open::{open_db, open_db_in_memory};

/// Fixed schema consumed by the repository layer.
pub const SCHEMA_SQL: &str = include_str!("schema.sql");

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
