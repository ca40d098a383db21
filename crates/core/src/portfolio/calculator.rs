//! Pure valuation arithmetic: cost-basis merging, current value, profit/loss
//! percentages and best/worst ranking. No I/O.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::{DISPLAY_DECIMAL_PRECISION, RATIO_SCALE};
use crate::errors::{Error, Result, ValidationError};
use crate::values::{Money, Quantity, Symbol};
use crate::wallets::Asset;

/// Combine an existing holding with a new purchase.
///
/// The new cost basis is the quantity-weighted average of both lots, rounded
/// half-up to money scale. The result is stamped now.
pub fn merge_cost_basis(
    existing: &Asset,
    added_quantity: Quantity,
    added_price: Money,
) -> Result<Asset> {
    let total_quantity = existing.quantity().add(added_quantity)?;
    let existing_value = existing.price().multiply(existing.quantity())?;
    let added_value = added_price.multiply(added_quantity)?;
    let total_value = existing_value.add(added_value)?;

    if total_quantity.is_zero() {
        return Err(Error::InvariantViolation(format!(
            "merged quantity of {} is zero",
            existing.symbol()
        )));
    }
    let average_price = total_value.divide(total_quantity)?;

    Ok(existing
        .with_quantity(total_quantity)?
        .with_price(average_price))
}

/// `quantity × price`.
pub fn current_value(quantity: Quantity, price: Money) -> Result<Money> {
    Ok(price.multiply(quantity)?)
}

/// Unit price implied by a lot's total value.
pub fn price_per_unit(total_value: Money, quantity: Quantity) -> Result<Money> {
    Ok(total_value.divide(quantity)?)
}

/// Percentage change from `original` to `current`, two decimals.
///
/// The ratio is rounded half-up to four digits before scaling by 100, then
/// the percentage is rounded half-up to two digits. An original of zero
/// yields exactly zero. A change too large for a decimal fails with
/// `InvalidValue` rather than saturating.
pub fn profit_loss_percent(original: Money, current: Money) -> Result<Decimal> {
    if original.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let overflowed = || {
        ValidationError::InvalidMoney(format!(
            "change from {} to {} is out of range",
            original, current
        ))
    };
    let difference = current
        .amount()
        .checked_sub(original.amount())
        .ok_or_else(overflowed)?;
    let ratio = difference
        .checked_div(original.amount())
        .ok_or_else(overflowed)?
        .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let mut percent = ratio
        .checked_mul(dec!(100))
        .ok_or_else(overflowed)?
        .round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        );
    percent.rescale(DISPLAY_DECIMAL_PRECISION);
    if percent.is_zero() {
        percent.set_sign_positive(true);
    }
    Ok(percent)
}

pub fn total_portfolio_value<I>(values: I) -> Result<Money>
where
    I: IntoIterator<Item = Money>,
{
    values
        .into_iter()
        .try_fold(Money::ZERO, |total, value| Ok(total.add(value)?))
}

/// Symbol with the highest percentage. Ties go to the smallest symbol.
pub fn best_performing(performance: &BTreeMap<Symbol, Decimal>) -> Option<(Symbol, Decimal)> {
    pick_extreme(performance, |candidate, current| candidate > current)
}

/// Symbol with the lowest percentage. Ties go to the smallest symbol.
pub fn worst_performing(performance: &BTreeMap<Symbol, Decimal>) -> Option<(Symbol, Decimal)> {
    pick_extreme(performance, |candidate, current| candidate < current)
}

fn pick_extreme<F>(performance: &BTreeMap<Symbol, Decimal>, beats: F) -> Option<(Symbol, Decimal)>
where
    F: Fn(Decimal, Decimal) -> bool,
{
    let mut chosen: Option<(&Symbol, Decimal)> = None;
    for (symbol, percent) in performance {
        match chosen {
            Some((_, current)) if !beats(*percent, current) => {}
            _ => chosen = Some((symbol, *percent)),
        }
    }
    chosen.map(|(symbol, percent)| (symbol.clone(), percent))
}

/// Both the quantity and the original value must be strictly positive.
pub fn is_valid_simulation_input(quantity: Quantity, original_value: Money) -> bool {
    quantity.is_positive() && original_value.is_positive()
}
