use std::sync::Arc;
use async_graphql::{Context, EmptySubscription, Object, Result, Schema, ID};
use crate::core::database::Database;
use crate::core::error::Error;
use crate::core::types::{MonsterId, ReviewId, UserId};
use crate::graphql::objects::{
    HpRangeObject, MonsterObject, MonsterSearch, ReviewInput, ReviewObject, ReviewUpdateInput,
    TypeCountObject, UserObject,
};
use crate::query::planner::QueryNormalizer;
use crate::query::types::MonsterQuery;
use crate::reviews::{NewReview, ReviewService, ReviewUpdate};
use crate::search::executor::MonsterSearch as MonsterSearchExecutor;
use crate::search::facets;
use crate::users::UserService;

pub type DungeonSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The database handle is injected as schema data, not reached through a global
pub fn build_schema(db: Arc<Database>) -> DungeonSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

pub(crate) fn database<'c>(ctx: &Context<'c>) -> Result<&'c Arc<Database>> {
    ctx.data::<Arc<Database>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Search, filter, sort and page monsters. With `suggestionsOnly` the
    /// result is a bare list of `{id, name}` prefix matches.
    async fn monsters(
        &self,
        ctx: &Context<'_>,
        search_term: Option<String>,
        offset: Option<i32>,
        limit: Option<i32>,
        types: Option<Vec<String>>,
        min_hp: Option<i32>,
        max_hp: Option<i32>,
        sort_option: Option<String>,
        suggestions_only: Option<bool>,
    ) -> Result<MonsterSearch> {
        let db = database(ctx)?;

        let query = MonsterQuery {
            search_term,
            offset: offset.map(i64::from),
            limit: limit.map(i64::from),
            types: types.unwrap_or_default(),
            min_hp,
            max_hp,
            sort_option,
            suggestions_only: suggestions_only.unwrap_or(false),
        };
        let plan = QueryNormalizer::new(db.config().default_limit).plan(&query);
        let results = MonsterSearchExecutor::new(db.monsters()).execute(&plan)?;

        Ok(MonsterSearch::resolve(results, db.users()))
    }

    async fn monster(&self, ctx: &Context<'_>, id: ID) -> Result<MonsterObject> {
        let db = database(ctx)?;
        let id: MonsterId = id.parse()?;
        let monster = db
            .monsters()
            .get(id)
            .ok_or_else(|| Error::not_found("Monster", id))?;

        Ok(MonsterObject::resolve(monster, db.users()))
    }

    async fn monster_type_counts(
        &self,
        ctx: &Context<'_>,
        min_hp: Option<i32>,
        max_hp: Option<i32>,
    ) -> Result<Vec<TypeCountObject>> {
        let db = database(ctx)?;
        let counts = facets::type_counts(db.monsters(), min_hp, max_hp)?;
        Ok(counts.into_iter().map(TypeCountObject::from).collect())
    }

    async fn monster_hp_range(&self, ctx: &Context<'_>) -> Result<HpRangeObject> {
        let db = database(ctx)?;
        Ok(facets::hp_range(db.monsters()).into())
    }

    /// A user with their dungeon name and favorited monsters
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<UserObject> {
        let db = database(ctx)?;
        let user = UserService::new(db).get(id.parse::<UserId>()?)?;
        Ok(user.into())
    }

    /// True when the user name is already taken
    async fn check_username(&self, ctx: &Context<'_>, user_name: String) -> Result<bool> {
        let db = database(ctx)?;
        Ok(UserService::new(db).username_taken(&user_name))
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_review(
        &self,
        ctx: &Context<'_>,
        monster_id: ID,
        review: ReviewInput,
    ) -> Result<MonsterObject> {
        let db = database(ctx)?;
        let new_review = NewReview {
            user: review.user.parse::<UserId>()?,
            difficulty: review.difficulty,
            description: review.description,
        };

        let monster = ReviewService::new(db).add(monster_id.parse::<MonsterId>()?, new_review)?;
        Ok(MonsterObject::resolve(monster, db.users()))
    }

    async fn update_review(
        &self,
        ctx: &Context<'_>,
        monster_id: ID,
        review_id: ID,
        review: ReviewUpdateInput,
    ) -> Result<ReviewObject> {
        let db = database(ctx)?;
        let update = ReviewUpdate {
            difficulty: review.difficulty,
            description: review.description,
        };

        let updated = ReviewService::new(db).update(
            monster_id.parse::<MonsterId>()?,
            review_id.parse::<ReviewId>()?,
            update,
        )?;
        Ok(ReviewObject::resolve(updated, db.users()))
    }

    async fn delete_review(
        &self,
        ctx: &Context<'_>,
        monster_id: ID,
        review_id: ID,
    ) -> Result<MonsterObject> {
        let db = database(ctx)?;
        let monster = ReviewService::new(db).delete(
            monster_id.parse::<MonsterId>()?,
            review_id.parse::<ReviewId>()?,
        )?;
        Ok(MonsterObject::resolve(monster, db.users()))
    }

    async fn update_dungeon_name(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        dungeon_name: String,
    ) -> Result<UserObject> {
        let db = database(ctx)?;
        let user = UserService::new(db).rename_dungeon(user_id.parse::<UserId>()?, &dungeon_name)?;
        Ok(user.into())
    }

    async fn add_favorited_monster(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        monster_id: ID,
    ) -> Result<UserObject> {
        let db = database(ctx)?;
        let user = UserService::new(db)
            .add_favorite(user_id.parse::<UserId>()?, monster_id.parse::<MonsterId>()?)?;
        Ok(user.into())
    }

    async fn remove_favorited_monster(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        monster_id: ID,
    ) -> Result<UserObject> {
        let db = database(ctx)?;
        let user = UserService::new(db)
            .remove_favorite(user_id.parse::<UserId>()?, monster_id.parse::<MonsterId>()?)?;
        Ok(user.into())
    }
}
