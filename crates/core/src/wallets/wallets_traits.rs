use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

use crate::errors::Result;
use crate::values::{EmailAddress, Money, Quantity, Symbol, WalletId};
use crate::wallets::wallets_model::{Asset, User, Wallet};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>>;
    fn find_by_wallet_id(&self, wallet_id: &WalletId) -> Result<Option<User>>;
    fn exists_by_email(&self, email: &EmailAddress) -> Result<bool>;
    /// All users, newest first.
    fn list_users(&self) -> Result<Vec<User>>;
    /// Fails with `EmailAlreadyRegistered` when the email is taken.
    async fn save_user(&self, user: User) -> Result<User>;
}

/// Trait for asset repository operations
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    fn find_by_wallet_id(&self, wallet_id: &WalletId) -> Result<Vec<Asset>>;
    fn find_by_wallet_and_symbol(
        &self,
        wallet_id: &WalletId,
        symbol: &Symbol,
    ) -> Result<Option<Asset>>;
    fn list_distinct_symbols(&self) -> Result<BTreeSet<Symbol>>;
    /// Insert or replace the row keyed by `(wallet_id, symbol)`.
    async fn upsert_asset(&self, asset: Asset) -> Result<Asset>;
    /// Overwrite the price of every asset holding one of the given symbols.
    /// Returns the number of rows touched.
    async fn bulk_update_prices(&self, prices: HashMap<Symbol, Money>) -> Result<usize>;
}

/// Trait for wallet service operations
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    async fn create_wallet(&self, email: EmailAddress) -> Result<User>;
    async fn add_asset(
        &self,
        wallet_id: WalletId,
        symbol: Symbol,
        quantity: Quantity,
        price: Money,
    ) -> Result<Wallet>;
    async fn add_asset_to_wallet(
        &self,
        wallet_id: WalletId,
        symbol: Symbol,
        quantity: Quantity,
        price: Money,
    ) -> Result<Wallet>;
    fn get_wallet(&self, wallet_id: &WalletId) -> Result<Wallet>;
    fn list_wallets(&self) -> Result<Vec<Wallet>>;
    fn find_user_by_email(&self, email: &EmailAddress) -> Result<User>;
    fn email_exists(&self, email: &EmailAddress) -> Result<bool>;
    async fn current_price(&self, symbol: &Symbol) -> Result<Money>;
}
