use serde::{Serialize, Deserialize};

/// A single predicate over a monster document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    TypeIn(TypeInClause),           // type is one of a set
    HitPointsRange(RangeClause),    // inclusive hit point window
    NamePrefix(NameClause),         // name starts with term (case-insensitive)
    NameSubstring(NameClause),      // name contains term (case-insensitive)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInClause {
    pub types: Vec<String>,
}

/// Both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeClause {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameClause {
    pub term: String,
}

impl Clause {
    pub fn type_in<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Clause::TypeIn(TypeInClause {
            types: types.into_iter().map(Into::into).collect(),
        })
    }

    pub fn hit_points(min: i32, max: i32) -> Self {
        Clause::HitPointsRange(RangeClause { min, max })
    }

    pub fn name_prefix(term: &str) -> Self {
        Clause::NamePrefix(NameClause { term: term.to_string() })
    }

    pub fn name_substring(term: &str) -> Self {
        Clause::NameSubstring(NameClause { term: term.to_string() })
    }
}

/// Conjunction of clauses: every `must` matches and no `must_not` matches.
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub must: Vec<Clause>,
    pub must_not: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Filter::default()
    }

    pub fn with_must(mut self, clause: Clause) -> Self {
        self.must.push(clause);
        self
    }

    pub fn with_must_not(mut self, clause: Clause) -> Self {
        self.must_not.push(clause);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.must_not.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_clauses() {
        let filter = Filter::new()
            .with_must(Clause::type_in(["dragon"]))
            .with_must(Clause::name_substring("red"))
            .with_must_not(Clause::name_prefix("red"));

        assert_eq!(filter.must.len(), 2);
        assert_eq!(filter.must_not.len(), 1);
        assert!(!filter.is_empty());
    }
}
