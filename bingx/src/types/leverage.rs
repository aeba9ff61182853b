use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position side a leverage setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Long => "LONG",
            PositionSide::Short => "SHORT",
        }
    }
}

/// Payload of `POST /openApi/swap/v2/trade/leverage`.
///
/// `maxPositionLongVal` is the notional cap enforced at the leverage just set,
/// which is the only place the tier schedule becomes observable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLeverageData {
    #[serde(default)]
    pub leverage: Option<u32>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub max_position_long_val: Option<Decimal>,
    #[serde(default)]
    pub max_position_short_val: Option<Decimal>,
    #[serde(default)]
    pub available_long_val: Option<Decimal>,
    #[serde(default)]
    pub available_short_val: Option<Decimal>,
}

/// Payload of `GET /openApi/swap/v2/trade/leverage`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageInfo {
    #[serde(default)]
    pub long_leverage: Option<u32>,
    #[serde(default)]
    pub short_leverage: Option<u32>,
    #[serde(default)]
    pub max_long_leverage: Option<u32>,
    #[serde(default)]
    pub max_short_leverage: Option<u32>,
}
