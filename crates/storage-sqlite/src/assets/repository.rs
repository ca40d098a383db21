use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::upsert::excluded;
use diesel::SqliteConnection;
use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use cryptowallet_core::errors::{Error, Result};
use cryptowallet_core::values::{Money, Symbol, WalletId};
use cryptowallet_core::wallets::AssetRepositoryTrait;
use cryptowallet_core::Asset;

use super::model::AssetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::assets;
use crate::schema::assets::dsl::*;
use crate::utils::{format_timestamp, parse_column};

pub struct AssetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        AssetRepository { pool, writer }
    }
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    fn find_by_wallet_id(&self, owner: &WalletId) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = assets
            .filter(wallet_id.eq(owner.to_string()))
            .select(AssetDB::as_select())
            .order(symbol.asc())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Asset::try_from(row).map_err(Error::from))
            .collect()
    }

    fn find_by_wallet_and_symbol(
        &self,
        owner: &WalletId,
        held: &Symbol,
    ) -> Result<Option<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let row = assets
            .find((owner.to_string(), held.as_str()))
            .select(AssetDB::as_select())
            .first::<AssetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Asset::try_from).transpose()?)
    }

    fn list_distinct_symbols(&self) -> Result<BTreeSet<Symbol>> {
        let mut conn = get_connection(&self.pool)?;
        let raw = assets
            .select(symbol)
            .distinct()
            .load::<String>(&mut conn)
            .into_core()?;
        let mut symbols = BTreeSet::new();
        for value in raw {
            symbols.insert(parse_column::<Symbol>("symbol", &value)?);
        }
        Ok(symbols)
    }

    async fn upsert_asset(&self, asset: Asset) -> Result<Asset> {
        let row = AssetDB::from(&asset);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                diesel::insert_into(assets::table)
                    .values(&row)
                    .on_conflict((wallet_id, symbol))
                    .do_update()
                    .set((
                        quantity.eq(excluded(quantity)),
                        price.eq(excluded(price)),
                        updated_at.eq(excluded(updated_at)),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(asset)
            })
            .await
    }

    async fn bulk_update_prices(&self, prices: HashMap<Symbol, Money>) -> Result<usize> {
        if prices.is_empty() {
            return Ok(0);
        }
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let stamp = format_timestamp(Utc::now());
                let mut touched = 0;
                for (held, new_price) in &prices {
                    let updated = diesel::update(assets.filter(symbol.eq(held.as_str())))
                        .set((price.eq(new_price.to_string()), updated_at.eq(&stamp)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    debug!("Repriced {} holding(s) of {} at {}", updated, held, new_price);
                    touched += updated;
                }
                Ok(touched)
            })
            .await
    }
}
