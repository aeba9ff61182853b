use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One perpetual contract from `GET /openApi/swap/v2/quote/contracts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub symbol: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub asset: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price_precision: Option<u32>,
    #[serde(default)]
    pub quantity_precision: Option<u32>,
    #[serde(default)]
    pub max_long_leverage: Option<u32>,
    #[serde(default)]
    pub max_short_leverage: Option<u32>,
    #[serde(default, rename = "tradeMinUSDT")]
    pub trade_min_usdt: Option<Decimal>,
    #[serde(default)]
    pub status: Option<i32>,
}

/// 24h ticker from `GET /openApi/swap/v2/quote/ticker`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    #[serde(default)]
    pub last_price: Option<Decimal>,
    #[serde(default)]
    pub mark_price: Option<Decimal>,
    #[serde(default)]
    pub price_change_percent: Option<Decimal>,
    #[serde(default)]
    pub high_price: Option<Decimal>,
    #[serde(default)]
    pub low_price: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<Decimal>,
}
