//! Database model for assets.

use diesel::prelude::*;

use cryptowallet_core::errors::Error;
use cryptowallet_core::Asset;

use crate::errors::StorageError;
use crate::utils::{format_timestamp, parse_column, parse_timestamp};

/// Database model for assets. Decimal columns hold their string form.
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub wallet_id: String,
    pub symbol: String,
    pub quantity: String,
    pub price: String,
    pub updated_at: String,
}

impl From<&Asset> for AssetDB {
    fn from(asset: &Asset) -> Self {
        Self {
            wallet_id: asset.wallet_id().to_string(),
            symbol: asset.symbol().to_string(),
            quantity: asset.quantity().to_string(),
            price: asset.price().to_string(),
            updated_at: format_timestamp(asset.updated_at()),
        }
    }
}

impl TryFrom<AssetDB> for Asset {
    type Error = StorageError;

    fn try_from(db: AssetDB) -> Result<Self, Self::Error> {
        Asset::new(
            parse_column("wallet_id", &db.wallet_id)?,
            parse_column("symbol", &db.symbol)?,
            parse_column("quantity", &db.quantity)?,
            parse_column("price", &db.price)?,
            parse_timestamp("updated_at", &db.updated_at)?,
        )
        .map_err(|e: Error| {
            StorageError::CorruptRecord(format!("asset {}/{}: {}", db.wallet_id, db.symbol, e))
        })
    }
}
