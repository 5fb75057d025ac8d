pub mod project;
pub mod analysis;
pub mod user;

pub use project::*;
pub use analysis::*;
pub use user::User;
