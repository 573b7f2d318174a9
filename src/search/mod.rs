pub mod executor;
pub mod aggregate;
pub mod range;
pub mod results;
pub mod facets;
