//! Core data access for the cast database.
//! Characters, the actors who play them, and the scenes they appear in.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, populate, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::character::{Actor, ActorId, Character, CharacterFilter, CharacterId};
pub use repo::character_repo::{
    CharacterRepository, RepoError, RepoOperation, RepoResult, SqliteCharacterRepository,
};
pub use repo::query_plan::{CharacterListPlan, Join, Predicate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
