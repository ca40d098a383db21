//! Price lookups and price refresh.
//!
//! [`PriceAggregator`] is the only component that talks to a quote source.
//! Valuation, simulation and the refresh job all go through it.

mod aggregator;
mod refresh_service;


pub use aggregator::PriceAggregator;
pub use refresh_service::{PriceRefreshService, PriceRefreshServiceTrait};
