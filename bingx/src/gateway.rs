//! The account-mutating capability tier discovery runs against.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LeverageInfo, PositionSide, SetLeverageData};

/// Leverage-setting gateway.
///
/// `set_leverage` changes server-side, account-scoped state: callers must not
/// drive two scans against the same symbol concurrently.
#[async_trait]
pub trait LeverageGateway: Send + Sync {
    /// Whether authenticated calls can be attempted at all.
    fn has_credentials(&self) -> bool;

    /// Set leverage for `symbol` on `side`. A non-success response is an
    /// error.
    async fn set_leverage(
        &self,
        symbol: &str,
        side: PositionSide,
        leverage: u32,
    ) -> Result<SetLeverageData>;

    /// Read the current leverage for `symbol`.
    async fn get_leverage(&self, symbol: &str) -> Result<LeverageInfo>;
}
