use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::core::error::{Error, ErrorKind};

/// Inclusive bounds of the review difficulty scale (the client slider runs 0..=100)
pub const MIN_DIFFICULTY: f64 = 0.0;
pub const MAX_DIFFICULTY: f64 = 100.0;

pub const MAX_DUNGEON_NAME_LEN: usize = 50;

pub fn validate_difficulty(difficulty: f64) -> Result<(), Error> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!(
                "Difficulty {} outside {}..={}",
                difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY
            ),
        ));
    }
    Ok(())
}

macro_rules! entity_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map($name).map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidInput,
                        format!("Malformed {} id '{}': {}", $label, s, e),
                    )
                })
            }
        }
    };
}

entity_id!(MonsterId, "monster");
entity_id!(ReviewId, "review");
entity_id!(UserId, "user");

/// A user-submitted difficulty rating, embedded in exactly one monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user: UserId,
    pub difficulty: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub index: String,
    pub name: String,
    pub monster_type: String,
    pub alignment: String,
    pub size: String,
    pub hit_points: i32,
    pub image: Option<String>,
    pub reviews: Vec<Review>,
    /// Bumped by the store on every successful replace
    pub revision: u64,
}

impl Monster {
    pub fn new(name: &str, monster_type: &str, hit_points: i32) -> Self {
        Monster {
            id: MonsterId::new(),
            index: slug(name),
            name: name.to_string(),
            monster_type: monster_type.to_string(),
            alignment: String::new(),
            size: String::new(),
            hit_points,
            image: None,
            reviews: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_alignment(mut self, alignment: &str) -> Self {
        self.alignment = alignment.to_string();
        self
    }

    pub fn with_size(mut self, size: &str) -> Self {
        self.size = size.to_string();
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    pub fn reviews_count(&self) -> usize {
        self.reviews.len()
    }

    /// Mean review difficulty, `None` when the monster has no reviews
    pub fn average_difficulty(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: f64 = self.reviews.iter().map(|r| r.difficulty).sum();
        Some(sum / self.reviews.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub dungeon_name: String,
    /// Monster ids in the order they were favorited, no duplicates
    pub favorited_monsters: Vec<MonsterId>,
    pub revision: u64,
}

impl User {
    pub fn new(user_name: &str) -> Self {
        User {
            id: UserId::new(),
            user_name: user_name.to_string(),
            dungeon_name: default_dungeon_name(user_name),
            favorited_monsters: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_favorite(mut self, monster: MonsterId) -> Self {
        if !self.has_favorite(monster) {
            self.favorited_monsters.push(monster);
        }
        self
    }

    pub fn has_favorite(&self, monster: MonsterId) -> bool {
        self.favorited_monsters.contains(&monster)
    }
}

pub fn default_dungeon_name(user_name: &str) -> String {
    format!("{}'s Dungeon", user_name)
}

/// Trimmed dungeon name, rejected when empty or longer than [`MAX_DUNGEON_NAME_LEN`] chars
pub fn validate_dungeon_name(name: &str) -> Result<String, Error> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_DUNGEON_NAME_LEN {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Dungeon name must be 1..={} characters, got {}", MAX_DUNGEON_NAME_LEN, len),
        ));
    }
    Ok(trimmed.to_string())
}

/// Lowercase, hyphen-separated form of a name ("Goblin Boss" -> "goblin-boss")
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
