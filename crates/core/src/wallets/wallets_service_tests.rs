//! Tests for WalletService: wallet creation, purchases, cost-basis merging
//! and the wallet read operations.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::errors::Error;
    use crate::quotes::PriceAggregator;
    use crate::testing::{MockAssetRepository, MockQuoteSource, MockUserRepository};
    use crate::values::{EmailAddress, Money, Quantity, Symbol, WalletId};
    use crate::wallets::{Asset, User, WalletService, WalletServiceTrait};

    struct Fixture {
        users: MockUserRepository,
        assets: MockAssetRepository,
        source: MockQuoteSource,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                users: MockUserRepository::new(),
                assets: MockAssetRepository::new(),
                source: MockQuoteSource::new()
                    .with_price("BTC", dec!(71000))
                    .with_price("ETH", dec!(3650))
                    .with_price("SOL", dec!(150)),
            }
        }

        fn service(&self) -> WalletService {
            WalletService::new(
                Arc::new(self.users.clone()),
                Arc::new(self.assets.clone()),
                Arc::new(PriceAggregator::new(Arc::new(self.source.clone()))),
            )
        }
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s).unwrap()
    }

    fn symbol(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn qty(d: Decimal) -> Quantity {
        Quantity::new(d).unwrap()
    }

    fn money(d: Decimal) -> Money {
        Money::new(d).unwrap()
    }

    // =========================================================================
    // create_wallet
    // =========================================================================

    #[tokio::test]
    async fn create_wallet_persists_user() {
        let fx = Fixture::new();
        let user = fx
            .service()
            .create_wallet(email("Alice@Example.com"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "alice@example.com");
        assert_eq!(fx.users.all(), vec![user]);
    }

    #[tokio::test]
    async fn create_wallet_rejects_duplicate_email() {
        let fx = Fixture::new();
        let service = fx.service();
        service.create_wallet(email("bob@example.com")).await.unwrap();

        let err = service
            .create_wallet(email("BOB@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmailAlreadyRegistered(_)));
        assert_eq!(fx.users.all().len(), 1);
    }

    // =========================================================================
    // add_asset
    // =========================================================================

    #[tokio::test]
    async fn add_two_assets_to_new_wallet() {
        let fx = Fixture::new();
        let service = fx.service();
        let user = service.create_wallet(email("alice@example.com")).await.unwrap();

        let wallet = service
            .add_asset(user.wallet_id, symbol("BTC"), qty(dec!(0.5)), money(dec!(70000)))
            .await
            .unwrap();
        assert_eq!(wallet.total_value().unwrap().to_string(), "35000.000000");

        let wallet = service
            .add_asset(user.wallet_id, symbol("ETH"), qty(dec!(4.25)), money(dec!(3600)))
            .await
            .unwrap();
        assert_eq!(wallet.asset_count(), 2);
        assert_eq!(wallet.total_value().unwrap().to_string(), "50300.000000");
        assert_eq!(wallet.created_at(), user.created_at);
    }

    #[tokio::test]
    async fn repeated_purchase_merges_cost_basis() {
        let fx = Fixture::new();
        let service = fx.service();
        let user = service.create_wallet(email("carol@example.com")).await.unwrap();

        service
            .add_asset(user.wallet_id, symbol("BTC"), qty(dec!(0.5)), money(dec!(50000)))
            .await
            .unwrap();
        let wallet = service
            .add_asset(user.wallet_id, symbol("BTC"), qty(dec!(0.5)), money(dec!(70000)))
            .await
            .unwrap();

        let btc = wallet.asset(&symbol("BTC")).unwrap();
        assert_eq!(wallet.asset_count(), 1);
        assert_eq!(btc.quantity().value(), dec!(1.0));
        assert_eq!(btc.price().to_string(), "60000.000000");
    }

    #[tokio::test]
    async fn zero_price_uses_market_price() {
        let fx = Fixture::new();
        let service = fx.service();
        let user = service.create_wallet(email("dave@example.com")).await.unwrap();

        let wallet = service
            .add_asset(user.wallet_id, symbol("SOL"), qty(dec!(2)), Money::ZERO)
            .await
            .unwrap();

        assert_eq!(
            wallet.asset(&symbol("SOL")).unwrap().price().to_string(),
            "150.000000"
        );
    }

    #[tokio::test]
    async fn unsupported_symbol_is_rejected_before_storage() {
        let fx = Fixture::new();
        let service = fx.service();
        let user = service.create_wallet(email("erin@example.com")).await.unwrap();

        let err = service
            .add_asset(user.wallet_id, symbol("NOPE"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedSymbol(s) if s == "NOPE"));
        assert!(fx.assets.all().is_empty());
    }

    #[tokio::test]
    async fn unknown_wallet_is_not_found() {
        let fx = Fixture::new();
        let err = fx
            .service()
            .add_asset(WalletId::generate(), symbol("BTC"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::WalletNotFound(_)));
    }

    #[tokio::test]
    async fn dust_quantity_is_rejected() {
        let fx = Fixture::new();
        let service = fx.service();
        let user = service.create_wallet(email("frank@example.com")).await.unwrap();

        let err = service
            .add_asset(user.wallet_id, symbol("BTC"), Quantity::ZERO, money(dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AssetRejected(_)));
    }

    #[tokio::test]
    async fn foreign_asset_in_wallet_is_fatal() {
        let fx = Fixture::new();
        let user = User::create(email("heidi@example.com"));
        let foreign = Asset::create(
            WalletId::generate(),
            symbol("ETH"),
            qty(dec!(1)),
            money(dec!(1)),
        )
        .unwrap();
        let fx = Fixture {
            users: fx.users.with_user(user.clone()),
            assets: fx.assets.with_misfiled_asset(user.wallet_id, foreign),
            source: fx.source,
        };

        let err = fx
            .service()
            .add_asset(user.wallet_id, symbol("BTC"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert!(err.is_fatal());
        assert!(fx.assets.all().is_empty());
    }

    #[tokio::test]
    async fn symbol_cap_applies_to_new_symbols_only() {
        let fx = Fixture::new();
        let user = User::create(email("grace@example.com"));
        let fx = Fixture {
            users: fx.users.with_user(user.clone()),
            assets: fx.assets,
            source: fx.source,
        };
        let service = fx.service().with_max_distinct_symbols(2);

        service
            .add_asset_to_wallet(user.wallet_id, symbol("BTC"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap();
        service
            .add_asset_to_wallet(user.wallet_id, symbol("ETH"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap();

        let err = service
            .add_asset_to_wallet(user.wallet_id, symbol("SOL"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AssetRejected(_)));

        let wallet = service
            .add_asset_to_wallet(user.wallet_id, symbol("BTC"), qty(dec!(1)), money(dec!(3)))
            .await
            .unwrap();
        assert_eq!(wallet.asset(&symbol("BTC")).unwrap().price().to_string(), "2.000000");
    }

    #[tokio::test]
    async fn hundred_and_first_symbol_is_rejected() {
        let user = User::create(email("heidi@example.com"));
        let assets = (0..100).fold(MockAssetRepository::new(), |repo, i| {
            repo.with_asset(
                Asset::create(
                    user.wallet_id,
                    symbol(&format!("C{}", i)),
                    qty(dec!(1)),
                    money(dec!(1)),
                )
                .unwrap(),
            )
        });
        let fx = Fixture {
            users: MockUserRepository::new().with_user(user.clone()),
            assets,
            source: MockQuoteSource::new().with_price("BTC", dec!(1)).with_price("C7", dec!(1)),
        };
        let service = fx.service();

        let err = service
            .add_asset(user.wallet_id, symbol("BTC"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AssetRejected(_)));

        let wallet = service
            .add_asset(user.wallet_id, symbol("C7"), qty(dec!(1)), money(dec!(1)))
            .await
            .unwrap();
        assert_eq!(wallet.asset_count(), 100);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[tokio::test]
    async fn list_wallets_newest_first() {
        let mut older = User::create(email("old@example.com"));
        older.created_at = Utc::now() - Duration::days(1);
        let newer = User::create(email("new@example.com"));
        let fx = Fixture {
            users: MockUserRepository::new()
                .with_user(older.clone())
                .with_user(newer.clone()),
            ..Fixture::new()
        };

        let wallets = fx.service().list_wallets().unwrap();
        let ids: Vec<WalletId> = wallets.iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec![newer.wallet_id, older.wallet_id]);
    }

    #[tokio::test]
    async fn get_wallet_and_lookups() {
        let fx = Fixture::new();
        let service = fx.service();
        let user = service.create_wallet(email("ivan@example.com")).await.unwrap();

        let wallet = service.get_wallet(&user.wallet_id).unwrap();
        assert_eq!(wallet.asset_count(), 0);
        assert!(matches!(
            service.get_wallet(&WalletId::generate()),
            Err(Error::WalletNotFound(_))
        ));

        assert_eq!(service.find_user_by_email(&user.email).unwrap(), user);
        assert!(matches!(
            service.find_user_by_email(&email("nobody@example.com")),
            Err(Error::UserNotFound(_))
        ));
        assert!(service.email_exists(&user.email).unwrap());
    }

    #[tokio::test]
    async fn current_price() {
        let fx = Fixture::new();
        let service = fx.service();
        assert_eq!(
            service.current_price(&symbol("ETH")).await.unwrap().to_string(),
            "3650.000000"
        );
        assert!(matches!(
            service.current_price(&symbol("XRP")).await,
            Err(Error::PriceUnavailable(_))
        ));
    }
}
