use crate::error::Result;
use crate::rest::BingxHttpClient;
use crate::types::*;

impl BingxHttpClient {
    // --- Market data (public) ---

    /// GET /openApi/swap/v2/quote/contracts - All perpetual contracts.
    pub async fn get_contracts(&self) -> Result<Vec<ContractInfo>> {
        self.get("/openApi/swap/v2/quote/contracts", &[])
            .await?
            .into_data("contracts")
    }

    /// GET /openApi/swap/v2/quote/ticker - 24h ticker for one symbol.
    pub async fn get_ticker(&self, symbol: &str) -> Result<Ticker> {
        self.get("/openApi/swap/v2/quote/ticker", &[("symbol", symbol)])
            .await?
            .into_data("ticker")
    }

    // --- Leverage (signed) ---

    /// GET /openApi/swap/v2/trade/leverage - Current long/short leverage.
    pub async fn get_leverage(&self, symbol: &str) -> Result<LeverageInfo> {
        self.get_signed(
            "/openApi/swap/v2/trade/leverage",
            &[("symbol", symbol.to_string())],
        )
        .await?
        .into_data("leverage")
    }

    /// POST /openApi/swap/v2/trade/leverage - Set leverage for one side.
    pub async fn set_leverage(
        &self,
        symbol: &str,
        side: PositionSide,
        leverage: u32,
    ) -> Result<SetLeverageData> {
        self.post_signed(
            "/openApi/swap/v2/trade/leverage",
            &[
                ("leverage", leverage.to_string()),
                ("side", side.as_str().to_string()),
                ("symbol", symbol.to_string()),
            ],
        )
        .await?
        .into_data("set leverage")
    }
}
