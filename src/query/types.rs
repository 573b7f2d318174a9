use std::fmt;
use serde::{Deserialize, Serialize};

/// Sort order for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,   // Ascending: 0 → 9, A → Z
    Desc,  // Descending: 9 → 0, Z → A
}

/// Client-selectable ordering of a monster listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    Name(SortOrder),
    Difficulty(SortOrder),
    ReviewsDesc,
}

impl SortOption {
    /// Parse the wire form ("name-asc", "difficulty-desc", "reviews-desc", ...).
    /// Anything unrecognised sorts by name ascending.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name-desc" => SortOption::Name(SortOrder::Desc),
            "difficulty-asc" => SortOption::Difficulty(SortOrder::Asc),
            "difficulty-desc" => SortOption::Difficulty(SortOrder::Desc),
            "reviews-desc" => SortOption::ReviewsDesc,
            _ => SortOption::Name(SortOrder::Asc),
        }
    }
}

impl Default for SortOption {
    fn default() -> Self {
        SortOption::Name(SortOrder::Asc)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SortOption::Name(SortOrder::Asc) => "name-asc",
            SortOption::Name(SortOrder::Desc) => "name-desc",
            SortOption::Difficulty(SortOrder::Asc) => "difficulty-asc",
            SortOption::Difficulty(SortOrder::Desc) => "difficulty-desc",
            SortOption::ReviewsDesc => "reviews-desc",
        };
        f.write_str(s)
    }
}

/// Offset/limit window over an ordered result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

pub const DEFAULT_LIMIT: usize = 8;

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Raw `monsters(...)` arguments as they arrive from the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterQuery {
    pub search_term: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub types: Vec<String>,
    pub min_hp: Option<i32>,
    pub max_hp: Option<i32>,
    pub sort_option: Option<String>,
    pub suggestions_only: bool,
}

impl MonsterQuery {
    pub fn new() -> Self {
        MonsterQuery::default()
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search_term = Some(term.to_string());
        self
    }

    pub fn page(mut self, offset: i64, limit: i64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn hit_points(mut self, min: i32, max: i32) -> Self {
        self.min_hp = Some(min);
        self.max_hp = Some(max);
        self
    }

    pub fn sort(mut self, option: &str) -> Self {
        self.sort_option = Some(option.to_string());
        self
    }

    pub fn suggestions(mut self) -> Self {
        self.suggestions_only = true;
        self
    }
}
