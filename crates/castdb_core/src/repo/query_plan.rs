//! Query plan for filtered character listings.
//!
//! # Responsibility
//! - Translate an optional `CharacterFilter` into ordered joins and
//!   predicates.
//! - Render the plan into parameterized SQL plus bind values.
//!
//! # Invariants
//! - `actor_id` wins over `actor_name`; at most one actor predicate is
//!   planned.
//! - A join is attached only when a predicate needs it, and at most once.
//! - Filter text only ever reaches SQLite as a bound value.
//! - No ordering clause is emitted; rows come back in storage order.

use crate::model::character::{ActorId, CharacterFilter};
use rusqlite::types::Value;

const CHARACTER_LIST_SQL: &str = "SELECT c.id, c.actor_id, c.name FROM characters c";
const LIKE_ESCAPE: char = '\\';

/// Table joined onto `characters c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    Actors,
    SceneCharacters,
}

impl Join {
    fn sql(self) -> &'static str {
        match self {
            Self::Actors => "INNER JOIN actors a ON a.id = c.actor_id",
            Self::SceneCharacters => "INNER JOIN scene_characters sc ON sc.character_id = c.id",
        }
    }
}

/// One AND-ed restriction of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    ActorId(ActorId),
    /// ASCII-lowercased needle, matched as a literal substring of the actor
    /// name.
    ActorNameContains(String),
    /// ASCII-lowercased needle, matched as a literal substring of the
    /// character name.
    NameContains(String),
    Scene(i64),
}

impl Predicate {
    fn required_join(&self) -> Option<Join> {
        match self {
            Self::ActorNameContains(_) => Some(Join::Actors),
            Self::Scene(_) => Some(Join::SceneCharacters),
            Self::ActorId(_) | Self::NameContains(_) => None,
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            Self::ActorId(_) => "c.actor_id = ?",
            Self::ActorNameContains(_) => "LOWER(a.name) LIKE ? ESCAPE '\\'",
            Self::NameContains(_) => "LOWER(c.name) LIKE ? ESCAPE '\\'",
            Self::Scene(_) => "sc.scene_id = ?",
        }
    }

    fn bind_value(&self) -> Value {
        match self {
            Self::ActorId(id) => Value::Integer(*id),
            Self::ActorNameContains(needle) | Self::NameContains(needle) => {
                Value::Text(contains_pattern(needle))
            }
            Self::Scene(scene) => Value::Integer(*scene),
        }
    }
}

/// Ordered join/predicate accumulation for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterListPlan {
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
}

impl CharacterListPlan {
    /// Builds the plan for `filter`. `None` and an empty filter both yield
    /// the unrestricted plan.
    pub fn from_filter(filter: Option<&CharacterFilter>) -> Self {
        let mut plan = Self::default();
        let Some(filter) = filter.filter(|filter| !filter.is_empty()) else {
            return plan;
        };

        if filter.actor_id != 0 {
            plan.push(Predicate::ActorId(filter.actor_id));
        } else if !filter.actor_name.is_empty() {
            plan.push(Predicate::ActorNameContains(filter.actor_name.to_ascii_lowercase()));
        }

        if !filter.name.is_empty() {
            plan.push(Predicate::NameContains(filter.name.to_ascii_lowercase()));
        }

        if filter.scene_number != 0 {
            plan.push(Predicate::Scene(filter.scene_number));
        }

        plan
    }

    /// Appends a predicate and attaches the join it depends on, if any.
    pub fn push(&mut self, predicate: Predicate) {
        if let Some(join) = predicate.required_join() {
            if !self.joins.contains(&join) {
                self.joins.push(join);
            }
        }
        self.predicates.push(predicate);
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Renders the plan as SQL with positional `?` placeholders, returning
    /// the bind values in placeholder order.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::from(CHARACTER_LIST_SQL);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join.sql());
        }

        for (index, predicate) in self.predicates.iter().enumerate() {
            sql.push_str(if index == 0 { " WHERE " } else { " AND " });
            sql.push_str(predicate.sql());
        }

        let bind_values = self.predicates.iter().map(Predicate::bind_value).collect();
        (sql, bind_values)
    }
}

/// Wraps `needle` in `%...%` after escaping LIKE metacharacters.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
