//! Binance-compatible public REST adapter (works against binance.us too).

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{split_symbol, ExchangeError, Ticker};

/// `GET /ticker/24hr` response. Decimals arrive as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    price_change: String,
    price_change_percent: String,
    weighted_avg_price: String,
    prev_close_price: String,
    last_price: String,
    bid_price: String,
    bid_qty: String,
    ask_price: String,
    ask_qty: String,
    open_price: String,
    high_price: String,
    low_price: String,
    volume: String,
    quote_volume: String,
    close_time: i64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

pub struct Binance {
    client: Client,
    public_url: String,
}

impl Binance {
    /// Adapter rooted at a public REST base such as `https://api.binance.us/api/v3`.
    #[must_use]
    pub fn new(client: Client, public_url: &str) -> Self {
        Self {
            client,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Binance market id for a unified symbol: `BTC/USDT` → `BTCUSDT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is not `BASE/QUOTE`.
    pub fn market_id(symbol: &str) -> Result<String, ExchangeError> {
        let (base, quote) = split_symbol(symbol)?;
        Ok(format!("{base}{quote}").to_uppercase())
    }

    /// Fetch the 24h rolling ticker for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is malformed, the request fails, or the
    /// exchange answers with an error body.
    pub async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        let market_id = Self::market_id(symbol)?;
        let url = format!("{}/ticker/24hr", self.public_url);
        debug!(%url, %market_id, "Fetching ticker");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", market_id.as_str())])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = serde_json::from_str::<ApiError>(&body)
                .map_or_else(|_| (-1, body.clone()), |e| (e.code, e.msg));
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let raw: Ticker24h = response.json().await?;
        let ticker = unify(symbol, &raw)?;
        info!(symbol, last = ticker.last, "Fetched ticker");
        Ok(ticker)
    }
}

fn unify(symbol: &str, raw: &Ticker24h) -> Result<Ticker, ExchangeError> {
    let bid = number("bidPrice", &raw.bid_price)?;
    let ask = number("askPrice", &raw.ask_price)?;
    let last = number("lastPrice", &raw.last_price)?;
    let open = number("openPrice", &raw.open_price)?;

    Ok(Ticker {
        symbol: symbol.to_string(),
        timestamp: raw.close_time,
        datetime: DateTime::<Utc>::from_timestamp_millis(raw.close_time).unwrap_or_default(),
        high: number("highPrice", &raw.high_price)?,
        low: number("lowPrice", &raw.low_price)?,
        bid,
        bid_volume: number("bidQty", &raw.bid_qty)?,
        ask,
        ask_volume: number("askQty", &raw.ask_qty)?,
        vwap: number("weightedAvgPrice", &raw.weighted_avg_price)?,
        open,
        close: last,
        last,
        previous_close: number("prevClosePrice", &raw.prev_close_price)?,
        change: number("priceChange", &raw.price_change)?,
        percentage: number("priceChangePercent", &raw.price_change_percent)?,
        average: (open + last) / 2.0,
        base_volume: number("volume", &raw.volume)?,
        quote_volume: number("quoteVolume", &raw.quote_volume)?,
    })
}

fn number(field: &'static str, value: &str) -> Result<f64, ExchangeError> {
    value.parse().map_err(|_| ExchangeError::BadNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_id() {
        assert_eq!(Binance::market_id("BTC/USDT").unwrap(), "BTCUSDT");
        assert_eq!(Binance::market_id("eth/btc").unwrap(), "ETHBTC");
        assert!(Binance::market_id("BTCUSDT").is_err());
    }

    #[test]
    fn test_number_rejects_garbage() {
        assert!((number("lastPrice", "64000.10").unwrap() - 64000.10).abs() < f64::EPSILON);
        assert!(matches!(
            number("lastPrice", "n/a"),
            Err(ExchangeError::BadNumber { field: "lastPrice", .. })
        ));
    }
}
