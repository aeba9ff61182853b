use async_trait::async_trait;
use tracing::debug;

use crate::config::BingxConfig;
use crate::error::Result;
use crate::gateway::LeverageGateway;
use crate::rest::BingxHttpClient;
use crate::types::*;

/// Main BingX client.
#[derive(Debug, Clone)]
pub struct BingxClient {
    /// HTTP client.
    pub http_client: BingxHttpClient,
}

impl BingxClient {
    /// Create a client from configuration. No requests are issued.
    pub fn new(config: &BingxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http_client: BingxHttpClient::new(config)?,
        })
    }

    /// Build from environment variables (see [`BingxConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(&BingxConfig::from_env()?)
    }

    /// Get all perpetual contracts.
    pub async fn get_contracts(&self) -> Result<Vec<ContractInfo>> {
        self.http_client.get_contracts().await
    }

    /// Find one contract by symbol (e.g. `BTC-USDT`).
    pub async fn get_contract_details(&self, symbol: &str) -> Result<Option<ContractInfo>> {
        let contracts = self.get_contracts().await?;
        debug!(count = contracts.len(), "contracts fetched");
        Ok(contracts.into_iter().find(|c| c.symbol == symbol))
    }

    /// Get the 24h ticker for a symbol.
    pub async fn get_ticker(&self, symbol: &str) -> Result<Ticker> {
        self.http_client.get_ticker(symbol).await
    }
}

#[async_trait]
impl LeverageGateway for BingxClient {
    fn has_credentials(&self) -> bool {
        self.http_client.has_credentials()
    }

    async fn set_leverage(
        &self,
        symbol: &str,
        side: PositionSide,
        leverage: u32,
    ) -> Result<SetLeverageData> {
        self.http_client.set_leverage(symbol, side, leverage).await
    }

    async fn get_leverage(&self, symbol: &str) -> Result<LeverageInfo> {
        self.http_client.get_leverage(symbol).await
    }
}
