pub mod connection;
pub mod schema;
pub mod users;
pub mod projects;
pub mod analyses;

pub use connection::Database;
