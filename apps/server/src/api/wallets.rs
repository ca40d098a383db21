use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use cryptowallet_core::errors::Error as CoreError;
use cryptowallet_core::{EmailAddress, Money, Quantity, Symbol, WalletId};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{AddAssetRequest, CreateWalletRequest, UserView, WalletView},
};

async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWalletRequest>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let email = EmailAddress::new(&body.email).map_err(CoreError::from)?;
    let user = state.wallet_service.create_wallet(email).await?;
    Ok((StatusCode::CREATED, Json(UserView::from(user))))
}

async fn list_wallets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<WalletView>>> {
    let wallets = state.wallet_service.list_wallets()?;
    let views = wallets
        .iter()
        .map(WalletView::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(views))
}

async fn get_wallet(
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<WalletView>> {
    let id = WalletId::parse(&wallet_id).map_err(CoreError::from)?;
    let wallet = state.wallet_service.get_wallet(&id)?;
    Ok(Json(WalletView::try_from(&wallet)?))
}

async fn add_asset(
    Path(wallet_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddAssetRequest>,
) -> ApiResult<Json<WalletView>> {
    let id = WalletId::parse(&wallet_id).map_err(CoreError::from)?;
    let symbol = Symbol::new(&body.symbol).map_err(CoreError::from)?;
    let quantity = Quantity::new(body.quantity).map_err(CoreError::from)?;
    let price = match body.price {
        Some(p) => Money::new(p).map_err(CoreError::from)?,
        None => Money::ZERO,
    };

    let wallet = state
        .wallet_service
        .add_asset(id, symbol, quantity, price)
        .await?;
    Ok(Json(WalletView::try_from(&wallet)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wallets", get(list_wallets).post(create_wallet))
        .route("/wallets/{wallet_id}", get(get_wallet))
        .route("/wallets/{wallet_id}/assets", post(add_asset))
}
