pub mod ast;
pub mod planner;
pub mod types;
pub mod matcher;
