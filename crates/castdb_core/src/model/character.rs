//! Character, actor and list-filter models.
//!
//! # Responsibility
//! - Define the `characters` row shape and its owning `actors` row shape.
//! - Carry optional list criteria from callers into the repository.
//!
//! # Invariants
//! - A persisted `Character` has a non-zero `id` and references an existing
//!   actor row.
//! - A `CharacterFilter` with every field at its default matches all rows.

use serde::{Deserialize, Serialize};

/// Surrogate key of a `characters` row.
pub type CharacterId = i64;

/// Surrogate key of an `actors` row.
pub type ActorId = i64;

/// One character played by an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Assigned by the store on insert. `0` until persisted.
    pub id: CharacterId,
    /// Foreign key into `actors`.
    pub actor_id: ActorId,
    pub name: String,
}

impl Character {
    /// Creates an unsaved character. Storing it performs an insert.
    pub fn new(actor_id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            actor_id,
            name: name.into(),
        }
    }

    /// Returns whether this value carries a store-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// Actor row. Never mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
}

/// Optional criteria narrowing a character listing.
///
/// Zero and empty values mean "not set". When both `actor_id` and
/// `actor_name` are set, only `actor_id` is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFilter {
    /// Exact match on `characters.actor_id`.
    pub actor_id: ActorId,
    /// Case-insensitive substring match on the actor's name.
    pub actor_name: String,
    /// Case-insensitive substring match on the character's name.
    pub name: String,
    /// Restricts to characters appearing in this scene.
    pub scene_number: i64,
}

impl CharacterFilter {
    pub fn with_actor_id(mut self, actor_id: ActorId) -> Self {
        self.actor_id = actor_id;
        self
    }

    pub fn with_actor_name(mut self, actor_name: impl Into<String>) -> Self {
        self.actor_name = actor_name.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_scene_number(mut self, scene_number: i64) -> Self {
        self.scene_number = scene_number;
        self
    }

    /// Returns whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.actor_id == 0
            && self.actor_name.is_empty()
            && self.name.is_empty()
            && self.scene_number == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Character, CharacterFilter};

    #[test]
    fn new_character_is_not_persisted() {
        let character = Character::new(1, "Tim the Enchanter");
        assert_eq!(character.id, 0);
        assert!(!character.is_persisted());
    }

    #[test]
    fn default_filter_is_empty_and_any_field_makes_it_active() {
        assert!(CharacterFilter::default().is_empty());
        assert!(!CharacterFilter::default().with_actor_id(3).is_empty());
        assert!(!CharacterFilter::default().with_actor_name("x").is_empty());
        assert!(!CharacterFilter::default().with_name("x").is_empty());
        assert!(!CharacterFilter::default().with_scene_number(1).is_empty());
    }
}
