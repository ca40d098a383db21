//! Database model for users.

use diesel::prelude::*;

use cryptowallet_core::User;

use crate::errors::StorageError;
use crate::utils::{format_timestamp, parse_column, parse_timestamp};

/// Database model for users
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub email: String,
    pub wallet_id: String,
    pub created_at: String,
}

impl From<&User> for UserDB {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.to_string(),
            wallet_id: user.wallet_id.to_string(),
            created_at: format_timestamp(user.created_at),
        }
    }
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(User {
            email: parse_column("email", &db.email)?,
            wallet_id: parse_column("wallet_id", &db.wallet_id)?,
            created_at: parse_timestamp("created_at", &db.created_at)?,
        })
    }
}
