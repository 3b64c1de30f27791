//! Public market data from a cryptocurrency exchange.
//!
//! Symbols use the unified `BASE/QUOTE` form (`BTC/USDT`); each adapter maps
//! them to its own market id.

pub mod binance;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub use binance::Binance;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("invalid symbol {0:?}, expected BASE/QUOTE")]
    BadSymbol(String),
    #[error("exchange request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("exchange returned {status} (code {code}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },
    #[error("invalid {field} in ticker: {value:?}")]
    BadNumber { field: &'static str, value: String },
}

/// 24h rolling ticker in exchange-independent form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    pub timestamp: i64,
    pub datetime: DateTime<Utc>,
    pub high: f64,
    pub low: f64,
    pub bid: f64,
    pub bid_volume: f64,
    pub ask: f64,
    pub ask_volume: f64,
    pub vwap: f64,
    pub open: f64,
    pub close: f64,
    pub last: f64,
    pub previous_close: f64,
    pub change: f64,
    pub percentage: f64,
    pub average: f64,
    pub base_volume: f64,
    pub quote_volume: f64,
}

/// Split a unified symbol into base and quote currencies.
///
/// # Errors
///
/// Returns [`ExchangeError::BadSymbol`] unless the symbol is `BASE/QUOTE`
/// with both parts non-empty.
pub fn split_symbol(symbol: &str) -> Result<(&str, &str), ExchangeError> {
    match symbol.split_once('/') {
        Some((base, quote)) if !base.is_empty() && !quote.is_empty() && !quote.contains('/') => {
            Ok((base, quote))
        }
        _ => Err(ExchangeError::BadSymbol(symbol.to_string())),
    }
}
