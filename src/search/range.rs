use serde::{Deserialize, Serialize};
use crate::core::types::Monster;
use crate::query::matcher::FilterMatcher;
use crate::store::collection::Collection;

/// Bounds reported when nothing matches, so a range slider still has a span
pub const DEFAULT_MIN_HP: i32 = 1;
pub const DEFAULT_MAX_HP: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for HpBounds {
    fn default() -> Self {
        HpBounds {
            min: DEFAULT_MIN_HP,
            max: DEFAULT_MAX_HP,
        }
    }
}

/// Min/max hit points over everything a filter matches, independent of paging.
/// Each bound is its own lookup against the collection.
pub struct RangeResolver<'a> {
    monsters: &'a Collection<Monster>,
}

impl<'a> RangeResolver<'a> {
    pub fn new(monsters: &'a Collection<Monster>) -> Self {
        RangeResolver { monsters }
    }

    pub fn resolve(&self, matcher: &FilterMatcher) -> HpBounds {
        let ascending = |a: &Monster, b: &Monster| a.hit_points.cmp(&b.hit_points);
        let descending = |a: &Monster, b: &Monster| b.hit_points.cmp(&a.hit_points);

        let min = self
            .monsters
            .find_one_sorted(|m| matcher.matches(m), &ascending)
            .map_or(DEFAULT_MIN_HP, |m| m.hit_points);
        let max = self
            .monsters
            .find_one_sorted(|m| matcher.matches(m), &descending)
            .map_or(DEFAULT_MAX_HP, |m| m.hit_points);

        HpBounds { min, max }
    }

    pub fn resolve_all(&self) -> HpBounds {
        self.resolve(&FilterMatcher::match_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ast::{Clause, Filter};

    fn monsters() -> Collection<Monster> {
        let monsters = Collection::new();
        monsters.insert(Monster::new("Goblin", "humanoid", 7)).unwrap();
        monsters.insert(Monster::new("Ogre", "giant", 59)).unwrap();
        monsters.insert(Monster::new("Hill Giant", "giant", 105)).unwrap();
        monsters
    }

    #[test]
    fn resolves_over_matching_documents() {
        let monsters = monsters();
        let giants = FilterMatcher::compile(&Filter::new().with_must(Clause::type_in(["giant"]))).unwrap();
        assert_eq!(RangeResolver::new(&monsters).resolve(&giants), HpBounds { min: 59, max: 105 });
    }

    #[test]
    fn empty_match_uses_defaults() {
        let monsters = monsters();
        let none = FilterMatcher::compile(&Filter::new().with_must(Clause::type_in(["dragon"]))).unwrap();
        assert_eq!(RangeResolver::new(&monsters).resolve(&none), HpBounds { min: 1, max: 1000 });

        let empty = Collection::new();
        assert_eq!(RangeResolver::new(&empty).resolve_all(), HpBounds::default());
    }
}
