//! Immutable, self-validating scalar types.
//!
//! Every constructor validates and normalizes its input, so an instance that
//! exists is always valid. Serde goes through the same constructors.

mod email;
mod money;
mod quantity;
mod symbol;
mod wallet_id;

pub use email::EmailAddress;
pub use money::Money;
pub use quantity::Quantity;
pub use symbol::Symbol;
pub use wallet_id::WalletId;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half-up to `scale` digits and pin the scale, so `1.5` at scale 6
/// renders as `1.500000`. Negative zero collapses to zero.
pub(crate) fn round_to_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}
