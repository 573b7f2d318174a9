//! User lookups and the per-user dungeon of favorited monsters.
//!
//! Dungeon edits follow the same read, modify, revision-checked replace
//! cycle as review mutations, keyed on the user's revision.

use tracing::info;
use crate::core::database::Database;
use crate::core::error::{Error, Result};
use crate::core::types::{validate_dungeon_name, Monster, MonsterId, User, UserId};

pub struct UserService<'a> {
    db: &'a Database,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a Database) -> Self {
        UserService { db }
    }

    pub fn get(&self, id: UserId) -> Result<User> {
        self.db
            .users()
            .get(id)
            .ok_or_else(|| Error::not_found("User", id))
    }

    /// Whether a user with exactly this name (ignoring surrounding spaces) exists
    pub fn username_taken(&self, user_name: &str) -> bool {
        let wanted = user_name.trim();
        self.db.users().count(|u| u.user_name == wanted) > 0
    }

    /// Favorited monsters in favorite order; ids of since-removed monsters are skipped
    pub fn favorites(&self, ids: &[MonsterId]) -> Vec<Monster> {
        ids.iter()
            .filter_map(|id| self.db.monsters().get(*id))
            .collect()
    }

    pub fn rename_dungeon(&self, user_id: UserId, dungeon_name: &str) -> Result<User> {
        let name = validate_dungeon_name(dungeon_name)?;
        let user = self.get(user_id)?;

        let stored = self.commit(user, |u| {
            u.dungeon_name = name;
            Ok(())
        })?;
        info!("Renamed dungeon of user {} to '{}'", user_id, stored.dungeon_name);
        Ok(stored)
    }

    /// Adding a monster that is already a favorite changes nothing
    pub fn add_favorite(&self, user_id: UserId, monster_id: MonsterId) -> Result<User> {
        let user = self.get(user_id)?;
        if self.db.monsters().get(monster_id).is_none() {
            return Err(Error::not_found("Monster", monster_id));
        }
        if user.has_favorite(monster_id) {
            return Ok(user);
        }

        let stored = self.commit(user, |u| {
            u.favorited_monsters.push(monster_id);
            Ok(())
        })?;
        info!("User {} favorited monster {}", user_id, monster_id);
        Ok(stored)
    }

    /// Removing a monster that is not a favorite changes nothing
    pub fn remove_favorite(&self, user_id: UserId, monster_id: MonsterId) -> Result<User> {
        let user = self.get(user_id)?;
        if !user.has_favorite(monster_id) {
            return Ok(user);
        }

        let stored = self.commit(user, |u| {
            u.favorited_monsters.retain(|id| *id != monster_id);
            Ok(())
        })?;
        info!("User {} unfavorited monster {}", user_id, monster_id);
        Ok(stored)
    }

    fn commit<F>(&self, mut snapshot: User, edit: F) -> Result<User>
    where
        F: FnOnce(&mut User) -> Result<()>,
    {
        let expected = snapshot.revision;
        edit(&mut snapshot)?;
        self.db.users().replace(snapshot, expected)
    }
}
