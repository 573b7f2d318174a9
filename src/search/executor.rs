use std::cmp::Ordering;
use tracing::debug;
use crate::core::error::Result;
use crate::core::types::Monster;
use crate::query::ast::Clause;
use crate::query::matcher::FilterMatcher;
use crate::query::planner::QueryPlan;
use crate::query::types::{SortOption, SortOrder};
use crate::search::aggregate::{AggregationSorter, ReviewSort};
use crate::search::range::RangeResolver;
use crate::search::results::SearchResults;
use crate::store::collection::{Collection, FindOptions};

/// Executes a [`QueryPlan`] against the monster collection
///
/// Branches, in order of precedence:
/// 1. suggestions: `{id, name}` of prefix matches, nothing else
/// 2. review aggregate sort (difficulty / review count)
/// 3. two-phase text match when a search term is present
/// 4. plain filtered fetch
///
/// Branches 2-4 then count the full match set and resolve hit point bounds.
pub struct MonsterSearch<'a> {
    monsters: &'a Collection<Monster>,
}

impl<'a> MonsterSearch<'a> {
    pub fn new(monsters: &'a Collection<Monster>) -> Self {
        MonsterSearch { monsters }
    }

    pub fn execute(&self, plan: &QueryPlan) -> Result<SearchResults> {
        if plan.suggestions_only {
            return self.suggestions(plan);
        }

        let matcher = FilterMatcher::compile(&plan.match_filter())?;

        let monsters = match (ReviewSort::from_option(plan.sort), &plan.search_term) {
            (Some(sort), _) => {
                debug!("Aggregation sort {} at {:?}", plan.sort, plan.page);
                AggregationSorter::new(self.monsters)
                    .run(&matcher, sort, plan.page)
                    .into_iter()
                    .map(|row| row.monster)
                    .collect()
            }
            (None, Some(term)) => {
                debug!("Two-phase name search for '{}' at {:?}", term, plan.page);
                self.two_phase(plan, term)?
            }
            (None, None) => {
                let cmp = name_comparator(plan.sort);
                self.monsters.find(
                    |m| matcher.matches(m),
                    &FindOptions::new()
                        .sort(&cmp)
                        .skip(plan.page.offset)
                        .limit(plan.page.limit),
                )
            }
        };

        let total = self.monsters.count(|m| matcher.matches(m));

        // Bounds describe the type/hit point universe, not the name search
        let structural = FilterMatcher::compile(&plan.base_filter)?;
        let bounds = RangeResolver::new(self.monsters).resolve(&structural);

        Ok(SearchResults::compose(monsters, total, bounds))
    }

    fn suggestions(&self, plan: &QueryPlan) -> Result<SearchResults> {
        let matcher = FilterMatcher::compile(&plan.prefix_filter())?;
        let found = self.monsters.find(
            |m| matcher.matches(m),
            &FindOptions::new().limit(plan.page.limit),
        );
        Ok(SearchResults::suggestions(&found))
    }

    /// The ordered result is every prefix match followed by every
    /// substring-only match; the page is a window over that sequence.
    /// Phase 2 excludes prefix matches, so no monster appears twice.
    fn two_phase(&self, plan: &QueryPlan, term: &str) -> Result<Vec<Monster>> {
        let cmp = name_comparator(plan.sort);
        let page = plan.page;

        let prefix = FilterMatcher::compile(&plan.prefix_filter())?;
        let mut monsters = self.monsters.find(
            |m| prefix.matches(m),
            &FindOptions::new().sort(&cmp).skip(page.offset).limit(page.limit),
        );

        if monsters.len() < page.limit {
            let prefix_total = self.monsters.count(|m| prefix.matches(m));
            let backfill = FilterMatcher::compile(
                &plan.match_filter().with_must_not(Clause::name_prefix(term)),
            )?;

            let remaining = page.limit - monsters.len();
            monsters.extend(self.monsters.find(
                |m| backfill.matches(m),
                &FindOptions::new()
                    .sort(&cmp)
                    .skip(page.offset.saturating_sub(prefix_total))
                    .limit(remaining),
            ));
        }

        Ok(monsters)
    }
}

fn name_comparator(sort: SortOption) -> impl Fn(&Monster, &Monster) -> Ordering {
    let descending = matches!(sort, SortOption::Name(SortOrder::Desc));
    move |a: &Monster, b: &Monster| {
        let ord = a.name.cmp(&b.name);
        if descending { ord.reverse() } else { ord }
    }
}
