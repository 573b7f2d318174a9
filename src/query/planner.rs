use serde::{Deserialize, Serialize};
use crate::query::ast::{Clause, Filter};
use crate::query::types::{MonsterQuery, Page, SortOption, DEFAULT_LIMIT};

/// Structured form of a `monsters(...)` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Type and hit point clauses; never contains name clauses
    pub base_filter: Filter,
    /// Non-empty search term, if any
    pub search_term: Option<String>,
    pub sort: SortOption,
    pub page: Page,
    pub suggestions_only: bool,
}

impl QueryPlan {
    /// Base filter narrowed to names containing the search term
    pub fn match_filter(&self) -> Filter {
        match &self.search_term {
            Some(term) => self.base_filter.clone().with_must(Clause::name_substring(term)),
            None => self.base_filter.clone(),
        }
    }

    /// Base filter narrowed to names starting with the search term
    pub fn prefix_filter(&self) -> Filter {
        match &self.search_term {
            Some(term) => self.base_filter.clone().with_must(Clause::name_prefix(term)),
            None => self.base_filter.clone(),
        }
    }
}

/// Turns loosely-typed request arguments into a [`QueryPlan`]
pub struct QueryNormalizer {
    default_limit: usize,
}

impl QueryNormalizer {
    pub fn new(default_limit: usize) -> Self {
        QueryNormalizer { default_limit }
    }

    pub fn plan(&self, query: &MonsterQuery) -> QueryPlan {
        let mut base_filter = Filter::new();

        if !query.types.is_empty() {
            base_filter = base_filter.with_must(Clause::type_in(query.types.iter().cloned()));
        }

        // A one-sided range is ignored
        if let (Some(min), Some(max)) = (query.min_hp, query.max_hp) {
            base_filter = base_filter.with_must(Clause::hit_points(min, max));
        }

        let search_term = query
            .search_term
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        QueryPlan {
            base_filter,
            search_term,
            sort: query
                .sort_option
                .as_deref()
                .map(SortOption::parse)
                .unwrap_or_default(),
            page: Page {
                offset: clamp(query.offset, 0),
                limit: clamp(query.limit, self.default_limit),
            },
            suggestions_only: query.suggestions_only,
        }
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

fn clamp(value: Option<i64>, default: usize) -> usize {
    value.map_or(default, |v| usize::try_from(v).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::SortOrder;

    #[test]
    fn defaults_apply_to_empty_request() {
        let plan = QueryNormalizer::default().plan(&MonsterQuery::new());

        assert!(plan.base_filter.is_empty());
        assert_eq!(plan.search_term, None);
        assert_eq!(plan.sort, SortOption::Name(SortOrder::Asc));
        assert_eq!(plan.page, Page { offset: 0, limit: 8 });
        assert!(!plan.suggestions_only);
    }

    #[test]
    fn range_needs_both_bounds() {
        let mut query = MonsterQuery::new();
        query.min_hp = Some(10);
        let plan = QueryNormalizer::default().plan(&query);
        assert!(plan.base_filter.is_empty());

        let plan = QueryNormalizer::default().plan(&MonsterQuery::new().hit_points(10, 50));
        assert_eq!(plan.base_filter.must, vec![Clause::hit_points(10, 50)]);
    }

    #[test]
    fn types_and_search_term_shape_the_filters() {
        let plan = QueryNormalizer::default()
            .plan(&MonsterQuery::new().types(["dragon", "giant"]).search("red"));

        assert_eq!(plan.base_filter.must, vec![Clause::type_in(["dragon", "giant"])]);
        assert_eq!(plan.match_filter().must.last(), Some(&Clause::name_substring("red")));
        assert_eq!(plan.prefix_filter().must.last(), Some(&Clause::name_prefix("red")));
    }

    #[test]
    fn empty_search_term_is_dropped() {
        let plan = QueryNormalizer::default().plan(&MonsterQuery::new().search(""));
        assert_eq!(plan.search_term, None);
        assert_eq!(plan.match_filter(), plan.base_filter);
    }

    #[test]
    fn negative_paging_is_clamped() {
        let plan = QueryNormalizer::new(12).plan(&MonsterQuery::new().page(-3, -1));
        assert_eq!(plan.page, Page { offset: 0, limit: 0 });

        let plan = QueryNormalizer::new(12).plan(&MonsterQuery::new());
        assert_eq!(plan.page.limit, 12);
    }
}
