use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};

use super::wallets_model::{Asset, User, Wallet};
use super::wallets_traits::{AssetRepositoryTrait, UserRepositoryTrait, WalletServiceTrait};
use crate::constants::MAX_DISTINCT_SYMBOLS;
use crate::errors::{Error, Result};
use crate::portfolio::calculator;
use crate::quotes::PriceAggregator;
use crate::values::{EmailAddress, Money, Quantity, Symbol, WalletId};

/// Wallet creation, purchases and wallet reads.
pub struct WalletService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    price_aggregator: Arc<PriceAggregator>,
    max_distinct_symbols: usize,
}

impl WalletService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        price_aggregator: Arc<PriceAggregator>,
    ) -> Self {
        Self {
            user_repository,
            asset_repository,
            price_aggregator,
            max_distinct_symbols: MAX_DISTINCT_SYMBOLS,
        }
    }

    pub fn with_max_distinct_symbols(mut self, max_distinct_symbols: usize) -> Self {
        self.max_distinct_symbols = max_distinct_symbols;
        self
    }

    fn owner_of(&self, wallet_id: &WalletId) -> Result<User> {
        self.user_repository
            .find_by_wallet_id(wallet_id)?
            .ok_or_else(|| Error::WalletNotFound(wallet_id.to_string()))
    }

    fn load_wallet(&self, owner: &User) -> Result<Wallet> {
        let assets = self.asset_repository.find_by_wallet_id(&owner.wallet_id)?;
        Wallet::new(owner.wallet_id, assets, owner.created_at)
    }
}

#[async_trait]
impl WalletServiceTrait for WalletService {
    async fn create_wallet(&self, email: EmailAddress) -> Result<User> {
        if self.user_repository.exists_by_email(&email)? {
            return Err(Error::EmailAlreadyRegistered(email.to_string()));
        }
        let user = self.user_repository.save_user(User::create(email)).await?;
        info!("Created wallet {} for {}", user.wallet_id, user.email);
        Ok(user)
    }

    /// Validate the symbol against the quote source, fill in the market price
    /// when `price` is zero, then add the purchase to the wallet.
    async fn add_asset(
        &self,
        wallet_id: WalletId,
        symbol: Symbol,
        quantity: Quantity,
        price: Money,
    ) -> Result<Wallet> {
        if !self.price_aggregator.is_valid_symbol(&symbol).await {
            return Err(Error::UnsupportedSymbol(symbol.to_string()));
        }

        let price = if price.is_zero() {
            let market_price = self
                .price_aggregator
                .fetch_one(&symbol)
                .await
                .ok_or_else(|| Error::PriceUnavailable(symbol.to_string()))?;
            debug!("Using market price {} for {}", market_price, symbol);
            market_price
        } else {
            price
        };

        self.add_asset_to_wallet(wallet_id, symbol, quantity, price)
            .await
    }

    async fn add_asset_to_wallet(
        &self,
        wallet_id: WalletId,
        symbol: Symbol,
        quantity: Quantity,
        price: Money,
    ) -> Result<Wallet> {
        let owner = self.owner_of(&wallet_id)?;
        let wallet = self.load_wallet(&owner)?;

        if !wallet.can_accept_new_asset_with_limit(
            &symbol,
            quantity,
            price,
            self.max_distinct_symbols,
        ) {
            return Err(Error::AssetRejected(format!(
                "cannot add {} {} at {} to wallet {}",
                quantity, symbol, price, wallet_id
            )));
        }

        let asset = match self
            .asset_repository
            .find_by_wallet_and_symbol(&wallet_id, &symbol)?
        {
            Some(existing) => calculator::merge_cost_basis(&existing, quantity, price)?,
            None => Asset::create(wallet_id, symbol, quantity, price)?,
        };
        let asset = self.asset_repository.upsert_asset(asset).await?;
        debug!(
            "Wallet {} now holds {} {} at {}",
            wallet_id,
            asset.quantity(),
            asset.symbol(),
            asset.price()
        );

        let updated = self.load_wallet(&owner)?;
        if !updated.is_structurally_valid() {
            error!("Wallet {} failed validation after update", wallet_id);
            return Err(Error::InvariantViolation(format!(
                "wallet {} holds a non-positive quantity",
                wallet_id
            )));
        }
        Ok(updated)
    }

    fn get_wallet(&self, wallet_id: &WalletId) -> Result<Wallet> {
        let owner = self.owner_of(wallet_id)?;
        self.load_wallet(&owner)
    }

    fn list_wallets(&self) -> Result<Vec<Wallet>> {
        self.user_repository
            .list_users()?
            .iter()
            .map(|user| self.load_wallet(user))
            .collect()
    }

    fn find_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        self.user_repository
            .find_by_email(email)?
            .ok_or_else(|| Error::UserNotFound(email.to_string()))
    }

    fn email_exists(&self, email: &EmailAddress) -> Result<bool> {
        self.user_repository.exists_by_email(email)
    }

    async fn current_price(&self, symbol: &Symbol) -> Result<Money> {
        self.price_aggregator
            .fetch_one(symbol)
            .await
            .ok_or_else(|| Error::PriceUnavailable(symbol.to_string()))
    }
}
