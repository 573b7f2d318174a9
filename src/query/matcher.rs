use regex::{Regex, RegexBuilder};
use crate::core::error::Result;
use crate::core::types::Monster;
use crate::query::ast::{Clause, Filter, RangeClause};

/// A clause with its name pattern compiled
enum CompiledClause {
    TypeIn(Vec<String>),
    HitPoints(RangeClause),
    Name(Regex),
}

/// Evaluates a [`Filter`] against monster documents
pub struct FilterMatcher {
    must: Vec<CompiledClause>,
    must_not: Vec<CompiledClause>,
}

impl FilterMatcher {
    pub fn compile(filter: &Filter) -> Result<Self> {
        if filter.is_empty() {
            return Ok(Self::match_all());
        }
        Ok(FilterMatcher {
            must: compile_all(&filter.must)?,
            must_not: compile_all(&filter.must_not)?,
        })
    }

    pub fn match_all() -> Self {
        FilterMatcher {
            must: Vec::new(),
            must_not: Vec::new(),
        }
    }

    pub fn matches(&self, monster: &Monster) -> bool {
        self.must.iter().all(|c| c.matches(monster))
            && !self.must_not.iter().any(|c| c.matches(monster))
    }
}

fn compile_all(clauses: &[Clause]) -> Result<Vec<CompiledClause>> {
    clauses.iter().map(CompiledClause::compile).collect()
}

impl CompiledClause {
    fn compile(clause: &Clause) -> Result<Self> {
        Ok(match clause {
            Clause::TypeIn(c) => CompiledClause::TypeIn(c.types.clone()),
            Clause::HitPointsRange(c) => CompiledClause::HitPoints(*c),
            // Search terms are literal text, not patterns
            Clause::NamePrefix(c) => CompiledClause::Name(name_pattern(&format!("^{}", regex::escape(&c.term)))?),
            Clause::NameSubstring(c) => CompiledClause::Name(name_pattern(&regex::escape(&c.term))?),
        })
    }

    fn matches(&self, monster: &Monster) -> bool {
        match self {
            CompiledClause::TypeIn(types) => types.iter().any(|t| *t == monster.monster_type),
            CompiledClause::HitPoints(range) => {
                monster.hit_points >= range.min && monster.hit_points <= range.max
            }
            CompiledClause::Name(pattern) => pattern.is_match(&monster.name),
        }
    }
}

fn name_pattern(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}
