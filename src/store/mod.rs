pub mod collection;
pub mod seed;
