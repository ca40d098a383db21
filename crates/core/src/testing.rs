//! In-memory doubles for the quote source and repositories, shared by the
//! service tests.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use cryptowallet_market_data::{MarketDataError, Quote, QuoteSource};
use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::values::{EmailAddress, Money, Symbol, WalletId};
use crate::wallets::{Asset, AssetRepositoryTrait, User, UserRepositoryTrait};

// =========================================================================
// Mock QuoteSource
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteEvent {
    Start(String),
    End(String),
}

#[derive(Clone, Default)]
pub struct MockQuoteSource {
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    rate_limited: Arc<Mutex<HashSet<String>>>,
    events: Arc<Mutex<Vec<QuoteEvent>>>,
}

impl MockQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
        self
    }

    /// The symbol answers with a provider error instead of a price.
    pub fn with_failure(self, symbol: &str) -> Self {
        self.failing.lock().unwrap().insert(symbol.to_string());
        self
    }

    /// The symbol answers as if the provider were throttling requests.
    pub fn with_rate_limit(self, symbol: &str) -> Self {
        self.rate_limited.lock().unwrap().insert(symbol.to_string());
        self
    }

    pub fn events(&self) -> Vec<QuoteEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, QuoteEvent::Start(_)))
            .count()
    }

    /// Groups requests into the rounds in which they overlapped.
    pub fn rounds(&self) -> Vec<Vec<String>> {
        let mut rounds = Vec::new();
        let mut current = Vec::new();
        let mut in_flight = 0usize;
        for event in self.events() {
            match event {
                QuoteEvent::Start(symbol) => {
                    in_flight += 1;
                    current.push(symbol);
                }
                QuoteEvent::End(_) => {
                    in_flight -= 1;
                    if in_flight == 0 {
                        rounds.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        rounds
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
        self.events
            .lock()
            .unwrap()
            .push(QuoteEvent::Start(symbol.to_string()));
        tokio::task::yield_now().await;
        self.events
            .lock()
            .unwrap()
            .push(QuoteEvent::End(symbol.to_string()));

        if self.failing.lock().unwrap().contains(symbol) {
            return Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message: "Intentional failure".to_string(),
            });
        }
        if self.rate_limited.lock().unwrap().contains(symbol) {
            return Err(MarketDataError::RateLimited {
                provider: "MOCK".to_string(),
            });
        }
        let price = self.prices.lock().unwrap().get(symbol).copied();
        price
            .map(|p| Quote::new(symbol.to_string(), p, Utc::now(), "MOCK".to_string()))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

// =========================================================================
// Mock UserRepository
// =========================================================================

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepositoryTrait for MockUserRepository {
    fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    fn find_by_wallet_id(&self, wallet_id: &WalletId) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.wallet_id == wallet_id)
            .cloned())
    }

    fn exists_by_email(&self, email: &EmailAddress) -> Result<bool> {
        Ok(self.find_by_email(email)?.is_some())
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut users = self.all();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn save_user(&self, user: User) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::EmailAlreadyRegistered(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }
}

// =========================================================================
// Mock AssetRepository
// =========================================================================

#[derive(Clone, Default)]
pub struct MockAssetRepository {
    assets: Arc<Mutex<Vec<Asset>>>,
    misfiled: Arc<Mutex<Vec<(WalletId, Asset)>>>,
}

impl MockAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(self, asset: Asset) -> Self {
        self.assets.lock().unwrap().push(asset);
        self
    }

    /// Lists `asset` under `wallet_id` even though it belongs to another wallet.
    pub fn with_misfiled_asset(self, wallet_id: WalletId, asset: Asset) -> Self {
        self.misfiled.lock().unwrap().push((wallet_id, asset));
        self
    }

    pub fn all(&self) -> Vec<Asset> {
        self.assets.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetRepositoryTrait for MockAssetRepository {
    fn find_by_wallet_id(&self, wallet_id: &WalletId) -> Result<Vec<Asset>> {
        let mut assets: Vec<Asset> = self
            .all()
            .into_iter()
            .filter(|a| &a.wallet_id() == wallet_id)
            .collect();
        assets.extend(
            self.misfiled
                .lock()
                .unwrap()
                .iter()
                .filter(|(listed_under, _)| listed_under == wallet_id)
                .map(|(_, asset)| asset.clone()),
        );
        assets.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        Ok(assets)
    }

    fn find_by_wallet_and_symbol(
        &self,
        wallet_id: &WalletId,
        symbol: &Symbol,
    ) -> Result<Option<Asset>> {
        Ok(self
            .all()
            .into_iter()
            .find(|a| &a.wallet_id() == wallet_id && a.symbol() == symbol))
    }

    fn list_distinct_symbols(&self) -> Result<BTreeSet<Symbol>> {
        Ok(self.all().iter().map(|a| a.symbol().clone()).collect())
    }

    async fn upsert_asset(&self, asset: Asset) -> Result<Asset> {
        let mut assets = self.assets.lock().unwrap();
        assets.retain(|a| !(a.wallet_id() == asset.wallet_id() && a.symbol() == asset.symbol()));
        assets.push(asset.clone());
        Ok(asset)
    }

    async fn bulk_update_prices(&self, prices: HashMap<Symbol, Money>) -> Result<usize> {
        let mut assets = self.assets.lock().unwrap();
        let mut touched = 0;
        for asset in assets.iter_mut() {
            if let Some(price) = prices.get(asset.symbol()) {
                *asset = asset.with_price(*price);
                touched += 1;
            }
        }
        Ok(touched)
    }
}
