//! Character repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/store/delete/list over the `characters` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Exactly one statement round-trip per operation; no internal retry.
//! - Statements and cursors are released before each call returns.
//! - A missing row on read is `Ok(None)`; on update/delete it is
//!   `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::character::{Actor, ActorId, Character, CharacterFilter, CharacterId};
use crate::repo::query_plan::CharacterListPlan;
use log::{debug, warn};
use rusqlite::{params, params_from_iter, Connection, InterruptHandle, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_TABLES: [&str; 3] = ["actors", "characters", "scene_characters"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository operation, attached to store failures as context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoOperation {
    GetCharacter,
    InsertCharacter,
    UpdateCharacter,
    DeleteCharacter,
    ListCharacters,
    GetActor,
    CheckSchema,
}

impl Display for RepoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::GetCharacter => "get character",
            Self::InsertCharacter => "insert character",
            Self::UpdateCharacter => "update character",
            Self::DeleteCharacter => "delete character",
            Self::ListCharacters => "list characters",
            Self::GetActor => "get actor",
            Self::CheckSchema => "check schema",
        };
        f.write_str(label)
    }
}

/// Repository error for character persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Update or delete matched no row.
    NotFound(CharacterId),
    /// The backing store failed; passed through with operation context.
    Store {
        operation: RepoOperation,
        source: DbError,
    },
    MissingRequiredTable(&'static str),
}

impl RepoError {
    fn store(operation: RepoOperation) -> impl FnOnce(rusqlite::Error) -> Self {
        move |err| {
            warn!(
                "event=store_failure module=repo status=error operation={operation} error={err}"
            );
            Self::Store {
                operation,
                source: DbError::Sqlite(err),
            }
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "character not found: {id}"),
            Self::Store { operation, source } => write!(f, "{operation}: {source}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Store { source, .. } => Some(source),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

/// Repository interface for character CRUD and filtered listing.
pub trait CharacterRepository {
    /// Loads one character by id. Absence is `Ok(None)`.
    fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>>;
    /// Inserts when `character.id == 0` (writing the new id back), otherwise
    /// updates the row with that id. Returns the character's id.
    fn store_character(&self, character: &mut Character) -> RepoResult<CharacterId>;
    /// Deletes one character. Deleting a missing id is `NotFound`.
    fn delete_character(&self, id: CharacterId) -> RepoResult<()>;
    /// Lists characters matching `filter`; `None` lists everything.
    fn list_characters(&self, filter: Option<&CharacterFilter>) -> RepoResult<Vec<Character>>;
    /// Loads one actor by id. Absence is `Ok(None)`.
    fn get_actor(&self, id: ActorId) -> RepoResult<Option<Actor>>;
}

/// SQLite-backed character repository.
pub struct SqliteCharacterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCharacterRepository<'conn> {
    /// Wraps a ready connection without checking its schema.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking the cast tables exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    /// Handle that aborts the statement currently running on this
    /// connection. An interrupted call fails with `RepoError::Store`.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.conn.get_interrupt_handle()
    }

    fn insert(&self, character: &mut Character) -> RepoResult<CharacterId> {
        let id = self
            .conn
            .query_row(
                "INSERT INTO characters (actor_id, name) VALUES (?1, ?2) RETURNING id;",
                params![character.actor_id, character.name.as_str()],
                |row| row.get::<_, CharacterId>(0),
            )
            .map_err(RepoError::store(RepoOperation::InsertCharacter))?;

        character.id = id;
        Ok(id)
    }

    fn update(&self, character: &Character) -> RepoResult<CharacterId> {
        let changed = self
            .conn
            .execute(
                "UPDATE characters SET actor_id = ?1, name = ?2 WHERE id = ?3;",
                params![character.actor_id, character.name.as_str(), character.id],
            )
            .map_err(RepoError::store(RepoOperation::UpdateCharacter))?;

        if changed == 0 {
            return Err(RepoError::NotFound(character.id));
        }

        Ok(character.id)
    }
}

impl CharacterRepository for SqliteCharacterRepository<'_> {
    fn get_character(&self, id: CharacterId) -> RepoResult<Option<Character>> {
        self.conn
            .query_row(
                "SELECT id, actor_id, name FROM characters WHERE id = ?1;",
                [id],
                parse_character_row,
            )
            .optional()
            .map_err(RepoError::store(RepoOperation::GetCharacter))
    }

    fn store_character(&self, character: &mut Character) -> RepoResult<CharacterId> {
        if character.is_persisted() {
            self.update(character)
        } else {
            self.insert(character)
        }
    }

    fn delete_character(&self, id: CharacterId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM characters WHERE id = ?1;", [id])
            .map_err(RepoError::store(RepoOperation::DeleteCharacter))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_characters(&self, filter: Option<&CharacterFilter>) -> RepoResult<Vec<Character>> {
        let plan = CharacterListPlan::from_filter(filter);
        let (sql, bind_values) = plan.to_sql();
        let on_error = || RepoError::store(RepoOperation::ListCharacters);

        let mut stmt = self.conn.prepare(&sql).map_err(on_error())?;
        let characters = stmt
            .query_map(params_from_iter(bind_values), parse_character_row)
            .map_err(on_error())?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(on_error())?;

        debug!(
            "event=character_list module=repo status=ok joins={} predicates={} rows={}",
            plan.joins().len(),
            plan.predicates().len(),
            characters.len()
        );
        Ok(characters)
    }

    fn get_actor(&self, id: ActorId) -> RepoResult<Option<Actor>> {
        self.conn
            .query_row("SELECT id, name FROM actors WHERE id = ?1;", [id], |row| {
                Ok(Actor {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })
            .optional()
            .map_err(RepoError::store(RepoOperation::GetActor))
    }
}

fn parse_character_row(row: &Row<'_>) -> rusqlite::Result<Character> {
    Ok(Character {
        id: row.get(0)?,
        actor_id: row.get(1)?,
        name: row.get(2)?,
    })
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )
        .map_err(RepoError::store(RepoOperation::CheckSchema))?;
    Ok(exists == 1)
}
