//! Review mutations.
//!
//! Every mutation is a read-modify-write of the parent monster. The write is
//! conditional on the revision read at the start, so a concurrent change to
//! the same monster fails with `Conflict` rather than being overwritten.

use chrono::Utc;
use tracing::{error, info};
use crate::core::database::Database;
use crate::core::error::{Error, Result};
use crate::core::types::{validate_difficulty, Monster, MonsterId, Review, ReviewId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user: UserId,
    pub difficulty: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub difficulty: f64,
    pub description: String,
}

pub struct ReviewService<'a> {
    db: &'a Database,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a Database) -> Self {
        ReviewService { db }
    }

    /// Append a review stamped with the current time; returns the monster
    pub fn add(&self, monster_id: MonsterId, review: NewReview) -> Result<Monster> {
        validate_difficulty(review.difficulty)?;

        let monster = self.monster(monster_id)?;
        if self.db.users().get(review.user).is_none() {
            return Err(Error::not_found("User", review.user));
        }

        let review = Review {
            id: ReviewId::new(),
            user: review.user,
            difficulty: review.difficulty,
            description: review.description,
            created_at: Utc::now(),
        };
        let review_id = review.id;

        let (stored, ()) = self.commit(monster, |m| {
            m.reviews.push(review);
            Ok(())
        })?;
        info!("Added review {} to monster {}", review_id, monster_id);
        Ok(stored)
    }

    /// Overwrite difficulty and description; the creation time is kept
    pub fn update(&self, monster_id: MonsterId, review_id: ReviewId, update: ReviewUpdate) -> Result<Review> {
        validate_difficulty(update.difficulty)?;

        let monster = self.monster(monster_id)?;
        let (_, updated) = self.commit(monster, |m| {
            let review = m
                .reviews
                .iter_mut()
                .find(|r| r.id == review_id)
                .ok_or_else(|| Error::not_found("Review", review_id))?;

            review.difficulty = update.difficulty;
            review.description = update.description;
            Ok(review.clone())
        })?;
        info!("Updated review {} on monster {}", review_id, monster_id);
        Ok(updated)
    }

    /// Remove one review by position; returns the monster
    pub fn delete(&self, monster_id: MonsterId, review_id: ReviewId) -> Result<Monster> {
        self.try_delete(monster_id, review_id).inspect_err(|e| {
            error!("Deleting review {} from monster {} failed: {}", review_id, monster_id, e);
        })
    }

    fn try_delete(&self, monster_id: MonsterId, review_id: ReviewId) -> Result<Monster> {
        let monster = self.monster(monster_id)?;
        let (stored, ()) = self.commit(monster, |m| {
            let position = m
                .reviews
                .iter()
                .position(|r| r.id == review_id)
                .ok_or_else(|| Error::not_found("Review", review_id))?;
            m.reviews.remove(position);
            Ok(())
        })?;
        info!("Deleted review {} from monster {}", review_id, monster_id);
        Ok(stored)
    }

    /// Apply `edit` to a snapshot and write it back, conditional on the
    /// snapshot's revision still being current
    fn commit<R, F>(&self, mut snapshot: Monster, edit: F) -> Result<(Monster, R)>
    where
        F: FnOnce(&mut Monster) -> Result<R>,
    {
        let expected = snapshot.revision;
        let out = edit(&mut snapshot)?;
        let stored = self.db.monsters().replace(snapshot, expected)?;
        Ok((stored, out))
    }

    fn monster(&self, id: MonsterId) -> Result<Monster> {
        self.db
            .monsters()
            .get(id)
            .ok_or_else(|| Error::not_found("Monster", id))
    }
}
