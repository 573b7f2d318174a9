pub mod objects;
pub mod schema;
pub mod server;
