use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fractional digits kept on every money amount
pub const MONEY_SCALE: u32 = 6;

/// Fractional digits kept on every quantity
pub const QUANTITY_SCALE: u32 = 8;

/// Fractional digits of the intermediate profit/loss ratio
pub const RATIO_SCALE: u32 = 4;

/// Decimal precision for display (percentages)
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Smallest quantity that may be bought or added to a wallet
pub const MIN_TRADABLE_QUANTITY: Decimal = dec!(0.00000001);

/// Maximum number of distinct symbols a wallet may hold
pub const MAX_DISTINCT_SYMBOLS: usize = 100;

/// Number of quotes fetched concurrently per round
pub const PRICE_FETCH_BATCH_SIZE: usize = 3;

/// Maximum symbol length, after trimming
pub const MAX_SYMBOL_LENGTH: usize = 10;
