//! JSON seed file for the monster and user collections.
//!
//! Stands in for the bulk import job: the file is read once at startup.
//! Ids, slugs, review ids, timestamps and dungeon names may be omitted and
//! are generated. Review difficulties, review authors and favorited monsters
//! are checked before anything is inserted.
//!
//! ```json
//! {
//!   "users": [{ "id": "…", "user_name": "ada", "dungeon_name": "The Pit", "favorited_monsters": [] }],
//!   "monsters": [{ "name": "Goblin", "type": "humanoid", "hit_points": 7 }]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{
    default_dungeon_name, validate_difficulty, validate_dungeon_name, Monster, MonsterId, Review,
    ReviewId, User, UserId,
};
use crate::store::collection::Collection;

#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub monsters: Vec<MonsterRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub id: Option<UserId>,
    pub user_name: String,
    pub dungeon_name: Option<String>,
    #[serde(default)]
    pub favorited_monsters: Vec<MonsterId>,
}

#[derive(Debug, Deserialize)]
pub struct MonsterRecord {
    pub id: Option<MonsterId>,
    pub index: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub monster_type: String,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub size: String,
    pub hit_points: i32,
    pub image: Option<String>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRecord {
    pub id: Option<ReviewId>,
    pub user: UserId,
    pub difficulty: f64,
    #[serde(default)]
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Review {
            id: record.id.unwrap_or_default(),
            user: record.user,
            difficulty: record.difficulty,
            description: record.description,
            created_at: record.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<MonsterRecord> for Monster {
    fn from(record: MonsterRecord) -> Self {
        let mut monster = Monster::new(&record.name, &record.monster_type, record.hit_points)
            .with_alignment(&record.alignment)
            .with_size(&record.size);

        if let Some(image) = &record.image {
            monster = monster.with_image(image);
        }
        if let Some(id) = record.id {
            monster.id = id;
        }
        if let Some(index) = record.index {
            monster.index = index;
        }

        record
            .reviews
            .into_iter()
            .fold(monster, |m, r| m.with_review(r.into()))
    }
}

impl UserRecord {
    fn into_user(self) -> Result<User> {
        let dungeon_name = match &self.dungeon_name {
            Some(name) => validate_dungeon_name(name).map_err(|e| invalid(&self.user_name, e))?,
            None => default_dungeon_name(&self.user_name),
        };

        let mut user = User::new(&self.user_name);
        if let Some(id) = self.id {
            user.id = id;
        }
        user.dungeon_name = dungeon_name;
        Ok(self
            .favorited_monsters
            .into_iter()
            .fold(user, |u, monster| u.with_favorite(monster)))
    }
}

impl SeedFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let seed: SeedFile = serde_json::from_str(&raw)?;
        debug!(
            "Parsed seed {}: {} users, {} monsters",
            path.display(),
            seed.users.len(),
            seed.monsters.len()
        );
        Ok(seed)
    }

    /// Validate every record, then insert them; nothing is inserted when a
    /// record is invalid. Stops at the first duplicate id.
    pub fn apply(self, monsters: &Collection<Monster>, users: &Collection<User>) -> Result<()> {
        let seeded_users = self
            .users
            .into_iter()
            .map(UserRecord::into_user)
            .collect::<Result<Vec<User>>>()?;
        let seeded_monsters: Vec<Monster> = self.monsters.into_iter().map(Monster::from).collect();

        let user_ids: HashSet<UserId> = seeded_users.iter().map(|u| u.id).collect();
        for monster in &seeded_monsters {
            check_reviews(monster, |id| user_ids.contains(&id) || users.get(id).is_some())?;
        }

        let monster_ids: HashSet<MonsterId> = seeded_monsters.iter().map(|m| m.id).collect();
        for user in &seeded_users {
            if let Some(missing) = user
                .favorited_monsters
                .iter()
                .find(|id| !monster_ids.contains(*id) && monsters.get(**id).is_none())
            {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("Seed user '{}' favorites unknown monster {}", user.user_name, missing),
                ));
            }
        }

        let (user_count, monster_count) = (seeded_users.len(), seeded_monsters.len());
        for user in seeded_users {
            users.insert(user)?;
        }
        for monster in seeded_monsters {
            monsters.insert(monster)?;
        }

        info!("Seeded {user_count} users and {monster_count} monsters");
        Ok(())
    }
}

fn check_reviews<F>(monster: &Monster, user_exists: F) -> Result<()>
where
    F: Fn(UserId) -> bool,
{
    for review in &monster.reviews {
        validate_difficulty(review.difficulty).map_err(|e| invalid(&monster.name, e))?;
        if !user_exists(review.user) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Seed monster '{}' has a review by unknown user {}", monster.name, review.user),
            ));
        }
    }
    Ok(())
}

fn invalid(record: &str, err: Error) -> Error {
    Error::new(ErrorKind::InvalidInput, format!("Seed record '{}': {}", record, err.context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ADA: &str = "6f1c2a52-4d0e-4b8e-9a59-2d8c1f3c7e01";
    const BOSS: &str = "0b6d3f5e-8c2a-4f0e-9d1b-7a3c5e9f1d20";

    fn seed_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn apply(json: &str) -> (Result<()>, Collection<Monster>, Collection<User>) {
        let file = seed_file(json);
        let monsters = Collection::new();
        let users = Collection::new();
        let result = SeedFile::load(file.path()).unwrap().apply(&monsters, &users);
        (result, monsters, users)
    }

    #[test]
    fn load_and_apply_populates_collections() {
        let seed = format!(
            r#"{{
            "users": [{{ "id": "{ADA}", "user_name": "ada", "dungeon_name": " Ada's Lair ",
                        "favorited_monsters": ["{BOSS}"] }}],
            "monsters": [
                {{ "id": "{BOSS}", "name": "Goblin Boss", "type": "humanoid", "hit_points": 21,
                  "alignment": "neutral evil", "image": "/images/goblin-boss.png",
                  "reviews": [{{ "user": "{ADA}", "difficulty": 40 }}] }},
                {{ "name": "Ogre", "type": "giant", "size": "Large", "hit_points": 59 }}
            ]
        }}"#
        );
        let (result, monsters, users) = apply(&seed);
        result.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(monsters.len(), 2);

        let boss = monsters.scan(|m: &Monster| m.name == "Goblin Boss").remove(0);
        assert_eq!(boss.index, "goblin-boss");
        assert_eq!(boss.alignment, "neutral evil");
        assert_eq!(boss.image.as_deref(), Some("/images/goblin-boss.png"));
        assert_eq!(boss.reviews.len(), 1);
        assert_eq!(boss.reviews[0].difficulty, 40.0);

        let ada = users.scan(|u: &User| u.user_name == "ada").remove(0);
        assert_eq!(ada.dungeon_name, "Ada's Lair");
        assert_eq!(ada.favorited_monsters, vec![boss.id]);
    }

    #[test]
    fn missing_dungeon_name_gets_default() {
        let (result, _, users) = apply(r#"{ "users": [{ "user_name": "tasha" }] }"#);
        result.unwrap();
        assert_eq!(users.scan(|_| true)[0].dungeon_name, "tasha's Dungeon");
    }

    #[test]
    fn out_of_range_review_difficulty_fails_and_inserts_nothing() {
        let seed = format!(
            r#"{{
            "users": [{{ "id": "{ADA}", "user_name": "ada" }}],
            "monsters": [{{ "name": "Ogre", "type": "giant", "hit_points": 59,
                           "reviews": [{{ "user": "{ADA}", "difficulty": 500 }}] }}]
        }}"#
        );
        let (result, monsters, users) = apply(&seed);

        assert_eq!(result.unwrap_err().kind, ErrorKind::InvalidInput);
        assert!(monsters.is_empty());
        assert!(users.is_empty());
    }

    #[test]
    fn review_by_unknown_user_fails() {
        let (result, monsters, _) = apply(
            r#"{ "monsters": [{ "name": "Ogre", "type": "giant", "hit_points": 59,
                 "reviews": [{ "user": "00000000-0000-4000-8000-000000000000", "difficulty": 50 }] }] }"#,
        );

        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(err.context.contains("unknown user"), "{}", err.context);
        assert!(monsters.is_empty());
    }

    #[test]
    fn favorite_of_unknown_monster_fails() {
        let seed = format!(r#"{{ "users": [{{ "user_name": "ada", "favorited_monsters": ["{BOSS}"] }}] }}"#);
        let (result, _, users) = apply(&seed);

        assert_eq!(result.unwrap_err().kind, ErrorKind::InvalidInput);
        assert!(users.is_empty());
    }

    #[test]
    fn blank_dungeon_name_fails() {
        let (result, _, _) = apply(r#"{ "users": [{ "user_name": "ada", "dungeon_name": "  " }] }"#);
        assert_eq!(result.unwrap_err().kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn malformed_seed_is_a_parse_error() {
        let file = seed_file(r#"{ "monsters": [ { "name": 3 } ] }"#);
        let err = SeedFile::load(file.path()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn missing_seed_is_an_io_error() {
        let err = SeedFile::load(Path::new("/nonexistent/seed.json")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }
}
