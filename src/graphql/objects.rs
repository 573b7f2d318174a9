use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject, Union, ID};
use crate::core::types::{Monster, MonsterId, Review, User};
use crate::search::facets::TypeCount;
use crate::search::range::HpBounds;
use crate::search::results::{MonsterPage, SearchResults, Suggestion};
use crate::store::collection::Collection;
use crate::graphql::schema::database;
use crate::users::UserService;

#[derive(SimpleObject)]
#[graphql(name = "User", complex)]
pub struct UserObject {
    pub id: ID,
    pub user_name: String,
    pub dungeon_name: String,
    #[graphql(skip)]
    pub favorites: Vec<MonsterId>,
}

#[ComplexObject]
impl UserObject {
    /// Resolved on demand; monsters removed since favoriting are skipped
    async fn favorited_monsters(&self, ctx: &Context<'_>) -> Result<Vec<MonsterObject>> {
        let db = database(ctx)?;
        Ok(UserService::new(db)
            .favorites(&self.favorites)
            .into_iter()
            .map(|m| MonsterObject::resolve(m, db.users()))
            .collect())
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Review")]
pub struct ReviewObject {
    pub id: ID,
    /// Null when the author no longer exists
    pub user: Option<UserObject>,
    pub difficulty: f64,
    pub description: String,
    /// RFC 3339
    pub created_at: String,
}

#[derive(SimpleObject)]
#[graphql(name = "Monster")]
pub struct MonsterObject {
    pub id: ID,
    pub index: String,
    pub name: String,
    #[graphql(name = "type")]
    pub monster_type: String,
    pub alignment: String,
    pub size: String,
    #[graphql(name = "hit_points")]
    pub hit_points: i32,
    pub image: Option<String>,
    pub reviews: Vec<ReviewObject>,
    pub average_difficulty: Option<f64>,
    pub reviews_count: i32,
}

#[derive(SimpleObject)]
#[graphql(name = "MonsterPage")]
pub struct MonsterPageObject {
    pub monsters: Vec<MonsterObject>,
    pub total_monsters: i32,
    pub min_hp: i32,
    pub max_hp: i32,
}

#[derive(SimpleObject)]
pub struct MonsterSuggestion {
    pub id: ID,
    pub name: String,
}

#[derive(SimpleObject)]
pub struct MonsterSuggestions {
    pub suggestions: Vec<MonsterSuggestion>,
}

/// Either a page with totals and bounds, or bare autocomplete entries
#[derive(Union)]
pub enum MonsterSearch {
    Page(MonsterPageObject),
    Suggestions(MonsterSuggestions),
}

#[derive(SimpleObject)]
#[graphql(name = "TypeCount")]
pub struct TypeCountObject {
    #[graphql(name = "type")]
    pub monster_type: String,
    pub count: i32,
}

#[derive(SimpleObject)]
#[graphql(name = "HpRange")]
pub struct HpRangeObject {
    pub min_hp: i32,
    pub max_hp: i32,
}

#[derive(InputObject)]
pub struct ReviewInput {
    pub user: ID,
    pub difficulty: f64,
    pub description: String,
}

#[derive(InputObject)]
pub struct ReviewUpdateInput {
    pub difficulty: f64,
    pub description: String,
}

fn int(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        UserObject {
            id: ID(user.id.to_string()),
            user_name: user.user_name,
            dungeon_name: user.dungeon_name,
            favorites: user.favorited_monsters,
        }
    }
}

impl ReviewObject {
    pub fn resolve(review: Review, users: &Collection<User>) -> Self {
        ReviewObject {
            id: ID(review.id.to_string()),
            user: users.get(review.user).map(UserObject::from),
            difficulty: review.difficulty,
            description: review.description,
            created_at: review.created_at.to_rfc3339(),
        }
    }
}

impl MonsterObject {
    /// Build the wire form, resolving review authors to id + display name
    pub fn resolve(monster: Monster, users: &Collection<User>) -> Self {
        let average_difficulty = monster.average_difficulty();
        let reviews_count = int(monster.reviews_count());

        MonsterObject {
            id: ID(monster.id.to_string()),
            index: monster.index,
            name: monster.name,
            monster_type: monster.monster_type,
            alignment: monster.alignment,
            size: monster.size,
            hit_points: monster.hit_points,
            image: monster.image,
            reviews: monster
                .reviews
                .into_iter()
                .map(|r| ReviewObject::resolve(r, users))
                .collect(),
            average_difficulty,
            reviews_count,
        }
    }
}

impl From<Suggestion> for MonsterSuggestion {
    fn from(suggestion: Suggestion) -> Self {
        MonsterSuggestion {
            id: ID(suggestion.id.to_string()),
            name: suggestion.name,
        }
    }
}

impl MonsterSearch {
    pub fn resolve(results: SearchResults, users: &Collection<User>) -> Self {
        match results {
            SearchResults::Page(MonsterPage { monsters, total_monsters, min_hp, max_hp }) => {
                MonsterSearch::Page(MonsterPageObject {
                    monsters: monsters
                        .into_iter()
                        .map(|m| MonsterObject::resolve(m, users))
                        .collect(),
                    total_monsters: int(total_monsters),
                    min_hp,
                    max_hp,
                })
            }
            SearchResults::Suggestions(items) => MonsterSearch::Suggestions(MonsterSuggestions {
                suggestions: items.into_iter().map(MonsterSuggestion::from).collect(),
            }),
        }
    }
}

impl From<TypeCount> for TypeCountObject {
    fn from(tc: TypeCount) -> Self {
        TypeCountObject {
            monster_type: tc.monster_type,
            count: int(tc.count),
        }
    }
}

impl From<HpBounds> for HpRangeObject {
    fn from(bounds: HpBounds) -> Self {
        HpRangeObject {
            min_hp: bounds.min,
            max_hp: bounds.max,
        }
    }
}
