use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::core::types::Monster;
use crate::query::ast::{Clause, Filter};
use crate::query::matcher::FilterMatcher;
use crate::search::range::{HpBounds, RangeResolver};
use crate::store::collection::Collection;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub monster_type: String,
    pub count: usize,
}

/// Number of monsters per type, ordered by type name. The hit point window
/// applies only when both bounds are given.
pub fn type_counts(
    monsters: &Collection<Monster>,
    min_hp: Option<i32>,
    max_hp: Option<i32>,
) -> Result<Vec<TypeCount>> {
    let mut filter = Filter::new();
    if let (Some(min), Some(max)) = (min_hp, max_hp) {
        filter = filter.with_must(Clause::hit_points(min, max));
    }
    let matcher = FilterMatcher::compile(&filter)?;

    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for monster in monsters.scan(|m| matcher.matches(m)) {
        *groups.entry(monster.monster_type).or_insert(0) += 1;
    }

    Ok(groups
        .into_iter()
        .map(|(monster_type, count)| TypeCount { monster_type, count })
        .collect())
}

/// Hit point bounds over the whole collection
pub fn hp_range(monsters: &Collection<Monster>) -> HpBounds {
    RangeResolver::new(monsters).resolve_all()
}
