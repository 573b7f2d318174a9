use serde::{Deserialize, Serialize};
use crate::core::types::{Monster, MonsterId};
use crate::search::range::HpBounds;

/// Full response: one page of monsters plus figures describing the whole
/// filtered set. `total_monsters` and the bounds ignore offset/limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterPage {
    pub monsters: Vec<Monster>,
    pub total_monsters: usize,
    pub min_hp: i32,
    pub max_hp: i32,
}

/// Autocomplete entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: MonsterId,
    pub name: String,
}

impl From<&Monster> for Suggestion {
    fn from(monster: &Monster) -> Self {
        Suggestion {
            id: monster.id,
            name: monster.name.clone(),
        }
    }
}

/// Exactly one of the two response shapes of a monster search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchResults {
    Page(MonsterPage),
    Suggestions(Vec<Suggestion>),
}

impl SearchResults {
    pub fn compose(monsters: Vec<Monster>, total_monsters: usize, bounds: HpBounds) -> Self {
        SearchResults::Page(MonsterPage {
            monsters,
            total_monsters,
            min_hp: bounds.min,
            max_hp: bounds.max,
        })
    }

    pub fn suggestions(monsters: &[Monster]) -> Self {
        SearchResults::Suggestions(monsters.iter().map(Suggestion::from).collect())
    }

    pub fn into_page(self) -> Option<MonsterPage> {
        match self {
            SearchResults::Page(page) => Some(page),
            SearchResults::Suggestions(_) => None,
        }
    }

    pub fn into_suggestions(self) -> Option<Vec<Suggestion>> {
        match self {
            SearchResults::Suggestions(items) => Some(items),
            SearchResults::Page(_) => None,
        }
    }
}
