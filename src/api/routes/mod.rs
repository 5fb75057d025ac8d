pub mod health;
pub mod projects;
pub mod analyses;
pub mod exports;
