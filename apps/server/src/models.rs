use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cryptowallet_core::errors::Error as CoreError;
use cryptowallet_core::simulation::{ProfitSimulationResult, SimulatedPosition};
use cryptowallet_core::{Asset, Money, Quantity, Symbol, User, Wallet};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub email: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub email: String,
    pub wallet_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            email: user.email.to_string(),
            wallet_id: user.wallet_id.to_string(),
            created_at: user.created_at,
        }
    }
}

/// A purchase to add. An absent or zero price means "use the market price".
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddAssetRequest {
    pub symbol: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    pub symbol: Symbol,
    pub quantity: Quantity,
    pub price: Money,
    pub value: Money,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Asset> for AssetView {
    type Error = CoreError;

    fn try_from(asset: &Asset) -> Result<Self, Self::Error> {
        Ok(Self {
            symbol: asset.symbol().clone(),
            quantity: asset.quantity(),
            price: asset.price(),
            value: asset.value()?,
            updated_at: asset.updated_at(),
        })
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub id: String,
    pub total: Money,
    pub assets: Vec<AssetView>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Wallet> for WalletView {
    type Error = CoreError;

    fn try_from(wallet: &Wallet) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wallet.id().to_string(),
            total: wallet.total_value()?,
            assets: wallet
                .assets()
                .iter()
                .map(AssetView::try_from)
                .collect::<Result<_, _>>()?,
            created_at: wallet.created_at(),
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationAssetInput {
    pub symbol: String,
    pub quantity: Decimal,
    pub value: Decimal,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default)]
    pub assets: Vec<SimulationAssetInput>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub total: Money,
    pub best_asset: Option<Symbol>,
    pub best_performance: Decimal,
    pub worst_asset: Option<Symbol>,
    pub worst_performance: Decimal,
    pub positions: Vec<SimulatedPosition>,
}

impl From<ProfitSimulationResult> for SimulationResponse {
    fn from(result: ProfitSimulationResult) -> Self {
        Self {
            total: result.total_current_value,
            best_asset: result.best_asset,
            best_performance: result.best_performance,
            worst_asset: result.worst_asset,
            worst_performance: result.worst_performance,
            positions: result.positions,
        }
    }
}
