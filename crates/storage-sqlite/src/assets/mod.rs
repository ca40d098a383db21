//! SQLite storage implementation for wallet holdings.

mod model;
mod repository;

pub use model::AssetDB;
pub use repository::AssetRepository;
