//! Throwaway databases for repository tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::assets::AssetRepository;
use crate::db::{self, DbPool, WriteHandle};
use crate::users::UserRepository;

pub(crate) struct TestDb {
    // Held so the directory outlives the pool.
    _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

impl TestDb {
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.db");
        let path = db::init(path.to_str().unwrap()).unwrap();
        let pool = db::create_pool(&path).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::spawn_writer((*pool).clone());
        Self {
            _dir: dir,
            pool,
            writer,
        }
    }

    pub fn user_repository(&self) -> UserRepository {
        UserRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn asset_repository(&self) -> AssetRepository {
        AssetRepository::new(self.pool.clone(), self.writer.clone())
    }
}
