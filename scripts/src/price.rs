//! Native coin to USD quotes, fetched from the public CoinGecko API

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use json::JsonValue;
use reqwest::Client;
use tracing::{debug, error};

use crate::{constants::QUOTE_CURRENCY, errors::ScriptError};

/// Currencies we need a USD quote for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    /// Ether
    Ether,
    /// BNB
    BinanceCoin,
}

impl Currency {
    /// Identifier of the coin on the price API
    pub fn coin_id(&self) -> &'static str {
        match self {
            Currency::Ether => "ethereum",
            Currency::BinanceCoin => "binancecoin",
        }
    }

    /// Ticker symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Ether => "ETH",
            Currency::BinanceCoin => "BNB",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A source of USD quotes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current USD price of `currency`
    async fn usd_price(&self, currency: Currency) -> Result<f64, ScriptError>;
}

/// Fetch the USD quote of `currency`, logging and swallowing any failure
pub async fn fetch_usd_quote<P: PriceSource + ?Sized>(
    source: &P,
    currency: Currency,
) -> Option<f64> {
    match source.usd_price(currency).await {
        Ok(price) if price > 0.0 => Some(price),
        Ok(price) => {
            error!("Error fetching {currency} to USD rate: non positive price {price}");
            None
        }
        Err(e) => {
            error!("Error fetching {currency} to USD rate: {e}");
            None
        }
    }
}

/// Client of the CoinGecko `simple/price` endpoint
pub struct CoinGeckoClient {
    /// HTTP client
    client: Client,
    /// Base URL of the API, without trailing slash
    base_url: String,
}

impl CoinGeckoClient {
    /// Build a client against the given API base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the quote request for a coin
    fn quote_url(&self, coin_id: &str) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, coin_id, QUOTE_CURRENCY
        )
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn usd_price(&self, currency: Currency) -> Result<f64, ScriptError> {
        let url = self.quote_url(currency.coin_id());
        debug!("Fetching {} price from {}", currency, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScriptError::PriceFetching(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScriptError::PriceFetching(format!(
                "API returned error status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScriptError::PriceFetching(e.to_string()))?;

        parse_usd_quote(&body, currency.coin_id())
    }
}

/// Extract `<coin_id>.usd` from a `simple/price` response body
pub fn parse_usd_quote(body: &str, coin_id: &str) -> Result<f64, ScriptError> {
    let parsed: JsonValue =
        json::parse(body).map_err(|e| ScriptError::PriceFetching(e.to_string()))?;

    parsed[coin_id][QUOTE_CURRENCY].as_f64().ok_or_else(|| {
        ScriptError::PriceFetching(format!("missing {}.{} in response", coin_id, QUOTE_CURRENCY))
    })
}
