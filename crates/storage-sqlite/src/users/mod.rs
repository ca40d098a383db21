//! SQLite storage implementation for wallet owners.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
