//! Wallet domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::MAX_DISTINCT_SYMBOLS;
use crate::errors::{Error, Result, ValidationError};
use crate::values::{EmailAddress, Money, Quantity, Symbol, WalletId};

/// A holding of one symbol inside one wallet.
///
/// `price` is the cost basis per unit. The quantity is always strictly
/// positive; symbol and wallet id never change after creation.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    wallet_id: WalletId,
    symbol: Symbol,
    quantity: Quantity,
    price: Money,
    updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(
        wallet_id: WalletId,
        symbol: Symbol,
        quantity: Quantity,
        price: Money,
        updated_at: DateTime<Utc>,
    ) -> Result<Self> {
        if quantity.is_zero() {
            return Err(ValidationError::InvalidQuantity(format!(
                "asset {} must have a positive quantity",
                symbol
            ))
            .into());
        }
        Ok(Self {
            wallet_id,
            symbol,
            quantity,
            price,
            updated_at,
        })
    }

    /// First purchase of a symbol, stamped now.
    pub fn create(
        wallet_id: WalletId,
        symbol: Symbol,
        quantity: Quantity,
        price: Money,
    ) -> Result<Self> {
        Self::new(wallet_id, symbol, quantity, price, Utc::now())
    }

    pub fn with_quantity(&self, quantity: Quantity) -> Result<Self> {
        Self::new(
            self.wallet_id,
            self.symbol.clone(),
            quantity,
            self.price,
            Utc::now(),
        )
    }

    pub fn with_price(&self, price: Money) -> Self {
        Self {
            price,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn wallet_id(&self) -> WalletId {
        self.wallet_id
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// `quantity × price`.
    pub fn value(&self) -> Result<Money> {
        Ok(self.price.multiply(self.quantity)?)
    }
}

/// Snapshot of a wallet and everything it holds, ordered by symbol.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    id: WalletId,
    assets: Vec<Asset>,
    created_at: DateTime<Utc>,
}

impl Wallet {
    /// The only way to build a wallet. Every asset must belong to `id`.
    pub fn new(id: WalletId, mut assets: Vec<Asset>, created_at: DateTime<Utc>) -> Result<Self> {
        if let Some(stray) = assets.iter().find(|a| a.wallet_id != id) {
            return Err(Error::InvariantViolation(format!(
                "asset {} belongs to wallet {}, not {}",
                stray.symbol, stray.wallet_id, id
            )));
        }
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(Self {
            id,
            assets,
            created_at,
        })
    }

    pub fn id(&self) -> WalletId {
        self.id
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn asset(&self, symbol: &Symbol) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.symbol == symbol)
    }

    pub fn has_asset(&self, symbol: &Symbol) -> bool {
        self.asset(symbol).is_some()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Sum of `quantity × price` over all holdings.
    pub fn total_value(&self) -> Result<Money> {
        self.assets
            .iter()
            .try_fold(Money::ZERO, |total, asset| Ok(total.add(asset.value()?)?))
    }

    /// Whether a purchase of `quantity` units of `symbol` at `price` may be added.
    pub fn can_accept_new_asset(&self, symbol: &Symbol, quantity: Quantity, price: Money) -> bool {
        self.can_accept_new_asset_with_limit(symbol, quantity, price, MAX_DISTINCT_SYMBOLS)
    }

    pub fn can_accept_new_asset_with_limit(
        &self,
        symbol: &Symbol,
        quantity: Quantity,
        price: Money,
        max_distinct_symbols: usize,
    ) -> bool {
        if quantity < Quantity::min_tradable() || !price.is_positive() {
            return false;
        }
        self.asset_count() < max_distinct_symbols || self.has_asset(symbol)
    }

    /// Re-check after a write: every holding has a positive quantity.
    ///
    /// Ownership is already enforced by [`Wallet::new`], and [`Asset::new`]
    /// refuses zero quantities, so this holds for any wallet built through
    /// the public constructors.
    pub fn is_structurally_valid(&self) -> bool {
        self.assets.iter().all(|a| a.quantity.is_positive())
    }
}

/// Owner of exactly one wallet.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: EmailAddress,
    pub wallet_id: WalletId,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New user with a freshly generated wallet id.
    pub fn create(email: EmailAddress) -> Self {
        Self {
            email,
            wallet_id: WalletId::generate(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn symbol(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn asset(
        wallet_id: WalletId,
        s: &str,
        qty: rust_decimal::Decimal,
        price: rust_decimal::Decimal,
    ) -> Asset {
        Asset::create(
            wallet_id,
            symbol(s),
            Quantity::new(qty).unwrap(),
            Money::new(price).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_asset_rejects_zero_quantity() {
        let result = Asset::create(
            WalletId::generate(),
            symbol("BTC"),
            Quantity::ZERO,
            Money::new(dec!(1)).unwrap(),
        );
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_asset_value() {
        let a = asset(WalletId::generate(), "BTC", dec!(0.5), dec!(70000));
        assert_eq!(a.value().unwrap().to_string(), "35000.000000");
    }

    #[test]
    fn test_wallet_sorts_assets_by_symbol() {
        let id = WalletId::generate();
        let wallet = Wallet::new(
            id,
            vec![
                asset(id, "SOL", dec!(1), dec!(150)),
                asset(id, "BTC", dec!(1), dec!(1)),
                asset(id, "ETH", dec!(1), dec!(1)),
            ],
            Utc::now(),
        )
        .unwrap();
        let symbols: Vec<&str> = wallet.assets().iter().map(|a| a.symbol().as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
    }

    #[test]
    fn test_wallet_rejects_foreign_asset() {
        let id = WalletId::generate();
        let other = WalletId::generate();
        let result = Wallet::new(id, vec![asset(other, "BTC", dec!(1), dec!(1))], Utc::now());
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_total_value() {
        let id = WalletId::generate();
        let wallet = Wallet::new(
            id,
            vec![
                asset(id, "BTC", dec!(0.5), dec!(70000)),
                asset(id, "ETH", dec!(4.25), dec!(3600)),
            ],
            Utc::now(),
        )
        .unwrap();
        assert_eq!(wallet.total_value().unwrap().to_string(), "50300.000000");

        let empty = Wallet::new(id, vec![], Utc::now()).unwrap();
        assert_eq!(empty.total_value().unwrap(), Money::ZERO);
    }

    #[test]
    fn test_can_accept_rules() {
        let id = WalletId::generate();
        let wallet = Wallet::new(id, vec![asset(id, "BTC", dec!(1), dec!(1))], Utc::now()).unwrap();
        let price = Money::new(dec!(10)).unwrap();

        assert!(wallet.can_accept_new_asset(&symbol("ETH"), Quantity::min_tradable(), price));
        assert!(!wallet.can_accept_new_asset(&symbol("ETH"), Quantity::ZERO, price));
        assert!(!wallet.can_accept_new_asset(
            &symbol("ETH"),
            Quantity::new(dec!(1)).unwrap(),
            Money::ZERO
        ));
    }

    #[test]
    fn test_cap_only_applies_to_new_symbols() {
        let id = WalletId::generate();
        let wallet = Wallet::new(
            id,
            vec![asset(id, "BTC", dec!(1), dec!(1)), asset(id, "ETH", dec!(1), dec!(1))],
            Utc::now(),
        )
        .unwrap();
        let qty = Quantity::new(dec!(1)).unwrap();
        let price = Money::new(dec!(1)).unwrap();

        assert!(!wallet.can_accept_new_asset_with_limit(&symbol("SOL"), qty, price, 2));
        assert!(wallet.can_accept_new_asset_with_limit(&symbol("BTC"), qty, price, 2));
    }

    #[test]
    fn test_user_create_generates_wallet() {
        let email = EmailAddress::new("alice@example.com").unwrap();
        let a = User::create(email.clone());
        let b = User::create(email);
        assert_ne!(a.wallet_id, b.wallet_id);
    }
}
