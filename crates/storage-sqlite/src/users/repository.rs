use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use cryptowallet_core::errors::{Error, Result};
use cryptowallet_core::values::{EmailAddress, WalletId};
use cryptowallet_core::wallets::UserRepositoryTrait;
use cryptowallet_core::User;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::users;
use crate::schema::users::dsl::*;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }

    fn into_domain(rows: Vec<UserDB>) -> Result<Vec<User>> {
        rows.into_iter()
            .map(|row| User::try_from(row).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_email(&self, lookup: &EmailAddress) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users
            .find(lookup.as_str())
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::try_from).transpose()?)
    }

    fn find_by_wallet_id(&self, lookup: &WalletId) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users
            .filter(wallet_id.eq(lookup.to_string()))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::try_from).transpose()?)
    }

    fn exists_by_email(&self, lookup: &EmailAddress) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(diesel::dsl::exists(users.find(lookup.as_str())))
            .get_result::<bool>(&mut conn)
            .into_core()
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users
            .select(UserDB::as_select())
            .order((created_at.desc(), email.asc()))
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::into_domain(rows)
    }

    async fn save_user(&self, user: User) -> Result<User> {
        let row = UserDB::from(&user);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                match diesel::insert_into(users::table).values(&row).execute(conn) {
                    Ok(_) => {
                        debug!("Stored user {} with wallet {}", user.email, user.wallet_id);
                        Ok(user)
                    }
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        Err(Error::EmailAlreadyRegistered(user.email.to_string()))
                    }
                    Err(e) => Err(StorageError::from(e).into()),
                }
            })
            .await
    }
}
