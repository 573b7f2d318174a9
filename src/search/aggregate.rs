use std::cmp::Ordering;
use crate::core::types::Monster;
use crate::query::matcher::FilterMatcher;
use crate::query::types::{Page, SortOption, SortOrder};
use crate::store::collection::Collection;

/// A monster together with the values derived from its reviews
#[derive(Debug, Clone)]
pub struct ReviewedMonster {
    pub monster: Monster,
    pub average_difficulty: Option<f64>,
    pub reviews_count: usize,
}

impl From<Monster> for ReviewedMonster {
    fn from(monster: Monster) -> Self {
        ReviewedMonster {
            average_difficulty: monster.average_difficulty(),
            reviews_count: monster.reviews_count(),
            monster,
        }
    }
}

/// Orderings that need review aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSort {
    Difficulty(SortOrder),
    CountDesc,
}

impl ReviewSort {
    pub fn from_option(option: SortOption) -> Option<Self> {
        match option {
            SortOption::Difficulty(order) => Some(ReviewSort::Difficulty(order)),
            SortOption::ReviewsDesc => Some(ReviewSort::CountDesc),
            SortOption::Name(_) => None,
        }
    }

    /// Unreviewed monsters (no average) come last in both difficulty directions
    pub fn compare(&self, a: &ReviewedMonster, b: &ReviewedMonster) -> Ordering {
        match self {
            ReviewSort::CountDesc => b.reviews_count.cmp(&a.reviews_count),
            ReviewSort::Difficulty(order) => match (a.average_difficulty, b.average_difficulty) {
                (Some(x), Some(y)) => match order {
                    SortOrder::Asc => x.total_cmp(&y),
                    SortOrder::Desc => y.total_cmp(&x),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// match → add review fields → sort → skip → limit
///
/// The window is cut only after sorting; ties keep insertion order.
pub struct AggregationSorter<'a> {
    monsters: &'a Collection<Monster>,
}

impl<'a> AggregationSorter<'a> {
    pub fn new(monsters: &'a Collection<Monster>) -> Self {
        AggregationSorter { monsters }
    }

    pub fn run(&self, matcher: &FilterMatcher, sort: ReviewSort, page: Page) -> Vec<ReviewedMonster> {
        let mut rows: Vec<ReviewedMonster> = self
            .monsters
            .scan(|m| matcher.matches(m))
            .into_iter()
            .map(ReviewedMonster::from)
            .collect();

        rows.sort_by(|a, b| sort.compare(a, b));

        rows.into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::core::types::{Review, ReviewId, UserId};

    fn rated(name: &str, difficulties: &[f64]) -> Monster {
        difficulties.iter().fold(Monster::new(name, "beast", 10), |m, d| {
            m.with_review(Review {
                id: ReviewId::new(),
                user: UserId::new(),
                difficulty: *d,
                description: String::new(),
                created_at: Utc::now(),
            })
        })
    }

    fn collection() -> Collection<Monster> {
        let monsters = Collection::new();
        monsters.insert(rated("Unrated", &[])).unwrap();
        monsters.insert(rated("Easy", &[10.0, 20.0])).unwrap();
        monsters.insert(rated("Hard", &[90.0])).unwrap();
        monsters.insert(rated("Medium", &[40.0, 60.0, 50.0])).unwrap();
        monsters.insert(rated("Also Unrated", &[])).unwrap();
        monsters
    }

    fn names(rows: &[ReviewedMonster]) -> Vec<&str> {
        rows.iter().map(|r| r.monster.name.as_str()).collect()
    }

    fn run(sort: ReviewSort, offset: usize, limit: usize) -> Vec<String> {
        let monsters = collection();
        let rows = AggregationSorter::new(&monsters).run(
            &FilterMatcher::match_all(),
            sort,
            Page { offset, limit },
        );
        names(&rows).into_iter().map(str::to_string).collect()
    }

    #[test]
    fn difficulty_desc_puts_unrated_last() {
        assert_eq!(
            run(ReviewSort::Difficulty(SortOrder::Desc), 0, 10),
            ["Hard", "Medium", "Easy", "Unrated", "Also Unrated"]
        );
    }

    #[test]
    fn difficulty_asc_puts_unrated_last() {
        assert_eq!(
            run(ReviewSort::Difficulty(SortOrder::Asc), 0, 10),
            ["Easy", "Medium", "Hard", "Unrated", "Also Unrated"]
        );
    }

    #[test]
    fn count_desc_orders_by_review_count() {
        assert_eq!(
            run(ReviewSort::CountDesc, 0, 10),
            ["Medium", "Easy", "Hard", "Unrated", "Also Unrated"]
        );
    }

    #[test]
    fn paging_applies_after_sort() {
        assert_eq!(run(ReviewSort::Difficulty(SortOrder::Desc), 1, 2), ["Medium", "Easy"]);
    }

    #[test]
    fn derived_fields_are_attached() {
        let row = ReviewedMonster::from(rated("Medium", &[40.0, 60.0]));
        assert_eq!(row.average_difficulty, Some(50.0));
        assert_eq!(row.reviews_count, 2);
    }
}
