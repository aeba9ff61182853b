//! Leverage tier discovery by set-and-observe probing.
//!
//! BingX publishes no leverage bracket endpoint, but setting leverage returns
//! the maximum long notional allowed at that leverage. Walking leverage from
//! high to low and watching where that cap changes recovers the tier
//! boundaries. Resolution is bounded by the probe set: two real boundaries
//! with no probed value between them show up as one coarser tier.

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::gateway::LeverageGateway;
use crate::types::{DiscoveredTier, PositionSide};

/// Probe sequence used when the caller supplies none.
pub const DEFAULT_PROBE_LEVERAGES: [u32; 30] = [
    250, 200, 150, 125, 100, 75, 50, 40, 34, 30, 25, 20, 19, 17, 16, 15, 14, 13, 12, 11, 10, 9,
    8, 7, 6, 5, 4, 3, 2, 1,
];

/// Leverage assumed for restore when the current setting cannot be read.
pub const DEFAULT_RESTORE_LEVERAGE: u32 = 10;

/// One reading taken right after setting leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeObservation {
    pub probed_leverage: u32,
    pub observed_max_position_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanState {
    #[default]
    Idle,
    /// A tier is open: `leverage` is the lowest probed value so far that
    /// still produced `cap`.
    Tracking { leverage: u32, cap: Decimal },
}

/// What a single observation did to the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    /// First observation of the run; a tier is now open.
    Opened,
    /// Same cap as before; the open tier extends down to the probed leverage.
    Extended,
    /// Cap changed; the returned tier was closed and a new one opened.
    BoundaryCrossed(DiscoveredTier),
}

/// Run-length scan over observations in descending leverage order.
#[derive(Debug, Default)]
pub struct BoundaryScanner {
    state: ScanState,
    closed: Vec<DiscoveredTier>,
}

impl BoundaryScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, obs: ProbeObservation) -> ScanStep {
        let next = ScanState::Tracking {
            leverage: obs.probed_leverage,
            cap: obs.observed_max_position_value,
        };
        match self.state {
            ScanState::Idle => {
                self.state = next;
                ScanStep::Opened
            }
            ScanState::Tracking { cap, .. } if cap == obs.observed_max_position_value => {
                self.state = next;
                ScanStep::Extended
            }
            ScanState::Tracking { leverage, cap } => {
                let tier = DiscoveredTier {
                    leverage,
                    max_position_value: cap,
                };
                self.closed.push(tier.clone());
                self.state = next;
                ScanStep::BoundaryCrossed(tier)
            }
        }
    }

    /// Tiers closed so far (the open one excluded).
    pub fn closed(&self) -> &[DiscoveredTier] {
        &self.closed
    }

    /// Flush the open tier, if any, and return every discovered tier.
    pub fn finish(mut self) -> Vec<DiscoveredTier> {
        if let ScanState::Tracking { leverage, cap } = self.state {
            self.closed.push(DiscoveredTier {
                leverage,
                max_position_value: cap,
            });
        }
        self.closed
    }
}

/// Resolve the leverage values to probe: the default sequence, or the
/// caller's values de-duplicated, zero-free and sorted descending.
pub fn probe_sequence(probe_values: Option<&[u32]>) -> Vec<u32> {
    match probe_values {
        None => DEFAULT_PROBE_LEVERAGES.to_vec(),
        Some(values) => {
            let mut seq: Vec<u32> = values.iter().copied().filter(|&v| v > 0).collect();
            seq.sort_unstable_by(|a, b| b.cmp(a));
            seq.dedup();
            seq
        }
    }
}

/// Tunables for a discovery run.
#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    /// Pause between successive probes. Zero disables it.
    pub probe_delay: Duration,
}

/// Discovers tier boundaries through a [`LeverageGateway`].
///
/// A run owns the symbol's long leverage setting until it returns and always
/// attempts to put back the caller's `restore_leverage` afterwards.
pub struct TierProber<'a, G: LeverageGateway + ?Sized> {
    gateway: &'a G,
    config: ProbeConfig,
}

impl<'a, G: LeverageGateway + ?Sized> TierProber<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self::with_config(gateway, ProbeConfig::default())
    }

    pub fn with_config(gateway: &'a G, config: ProbeConfig) -> Self {
        Self { gateway, config }
    }

    /// Discover tiers for `symbol`, ordered by descending leverage.
    ///
    /// Returns an empty list without touching the gateway when credentials
    /// are missing, and an empty list when every probe failed. Individual
    /// probe failures are skipped.
    pub async fn discover(
        &self,
        symbol: &str,
        restore_leverage: u32,
        probe_values: Option<&[u32]>,
    ) -> Vec<DiscoveredTier> {
        if !self.gateway.has_credentials() {
            warn!(symbol, "no API credentials, skipping tier discovery");
            return Vec::new();
        }

        let candidates = probe_sequence(probe_values);
        info!(symbol, probes = candidates.len(), "discovering leverage tiers");

        let tiers = self.scan(symbol, &candidates).await;
        self.restore(symbol, restore_leverage).await;

        info!(symbol, tiers = tiers.len(), "discovery finished");
        tiers
    }

    /// Capture the current long leverage, then probe exactly
    /// `reference_leverages` and restore the captured value.
    pub async fn discover_with_reference(
        &self,
        symbol: &str,
        reference_leverages: &[u32],
    ) -> Vec<DiscoveredTier> {
        if !self.gateway.has_credentials() {
            warn!(symbol, "no API credentials, skipping tier discovery");
            return Vec::new();
        }
        let restore = self.current_long_leverage(symbol).await;
        self.discover(symbol, restore, Some(reference_leverages)).await
    }

    /// Current long leverage, or [`DEFAULT_RESTORE_LEVERAGE`] when it cannot
    /// be read.
    pub async fn current_long_leverage(&self, symbol: &str) -> u32 {
        match self.gateway.get_leverage(symbol).await {
            Ok(info) => info.long_leverage.unwrap_or(DEFAULT_RESTORE_LEVERAGE),
            Err(e) => {
                warn!(symbol, error = %e, "could not read current leverage, assuming default");
                DEFAULT_RESTORE_LEVERAGE
            }
        }
    }

    async fn scan(&self, symbol: &str, candidates: &[u32]) -> Vec<DiscoveredTier> {
        let mut scanner = BoundaryScanner::new();

        for (i, &leverage) in candidates.iter().enumerate() {
            if i > 0 && !self.config.probe_delay.is_zero() {
                tokio::time::sleep(self.config.probe_delay).await;
            }
            let Some(obs) = self.probe(symbol, leverage).await else {
                continue;
            };
            match scanner.observe(obs) {
                ScanStep::BoundaryCrossed(closed) => debug!(
                    symbol,
                    leverage = closed.leverage,
                    cap = %closed.max_position_value,
                    "tier boundary crossed"
                ),
                ScanStep::Opened | ScanStep::Extended => {}
            }
        }

        scanner.finish()
    }

    async fn probe(&self, symbol: &str, leverage: u32) -> Option<ProbeObservation> {
        match self
            .gateway
            .set_leverage(symbol, PositionSide::Long, leverage)
            .await
        {
            Ok(data) => match data.max_position_long_val {
                Some(cap) => {
                    debug!(symbol, leverage, cap = %cap, "probe");
                    Some(ProbeObservation {
                        probed_leverage: leverage,
                        observed_max_position_value: cap,
                    })
                }
                None => {
                    warn!(symbol, leverage, "probe response carried no maxPositionLongVal");
                    None
                }
            },
            Err(e) => {
                warn!(symbol, leverage, error = %e, "probe failed, skipping");
                None
            }
        }
    }

    async fn restore(&self, symbol: &str, leverage: u32) {
        match self
            .gateway
            .set_leverage(symbol, PositionSide::Long, leverage)
            .await
        {
            Ok(_) => debug!(symbol, leverage, "leverage restored"),
            Err(e) => warn!(symbol, leverage, error = %e, "failed to restore leverage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn obs(leverage: u32, cap: Decimal) -> ProbeObservation {
        ProbeObservation {
            probed_leverage: leverage,
            observed_max_position_value: cap,
        }
    }

    fn tier(leverage: u32, cap: Decimal) -> DiscoveredTier {
        DiscoveredTier {
            leverage,
            max_position_value: cap,
        }
    }

    #[test]
    fn test_scanner_empty_finishes_empty() {
        assert!(BoundaryScanner::new().finish().is_empty());
    }

    #[test]
    fn test_scanner_single_observation_is_flushed() {
        let mut s = BoundaryScanner::new();
        assert_eq!(s.observe(obs(150, dec!(300000))), ScanStep::Opened);
        assert!(s.closed().is_empty());
        assert_eq!(s.finish(), vec![tier(150, dec!(300000))]);
    }

    #[test]
    fn test_scanner_extension_moves_leverage_down() {
        let mut s = BoundaryScanner::new();
        s.observe(obs(150, dec!(300000)));
        assert_eq!(s.observe(obs(125, dec!(300000))), ScanStep::Extended);
        assert_eq!(s.finish(), vec![tier(125, dec!(300000))]);
    }

    #[test]
    fn test_scanner_boundary_closes_previous_tier() {
        let mut s = BoundaryScanner::new();
        s.observe(obs(150, dec!(300000)));
        s.observe(obs(125, dec!(300000)));
        assert_eq!(
            s.observe(obs(100, dec!(800000))),
            ScanStep::BoundaryCrossed(tier(125, dec!(300000)))
        );
        assert_eq!(s.observe(obs(75, dec!(800000))), ScanStep::Extended);
        assert_eq!(
            s.observe(obs(50, dec!(3000000))),
            ScanStep::BoundaryCrossed(tier(75, dec!(800000)))
        );
        assert_eq!(
            s.finish(),
            vec![
                tier(125, dec!(300000)),
                tier(75, dec!(800000)),
                tier(50, dec!(3000000)),
            ]
        );
    }

    #[test]
    fn test_scanner_cap_equality_ignores_scale() {
        let mut s = BoundaryScanner::new();
        s.observe(obs(20, dec!(500000)));
        assert_eq!(s.observe(obs(10, dec!(500000.00))), ScanStep::Extended);
    }

    #[test]
    fn test_probe_sequence_default() {
        let seq = probe_sequence(None);
        assert_eq!(seq.len(), DEFAULT_PROBE_LEVERAGES.len());
        assert_eq!(seq.first(), Some(&250));
        assert_eq!(seq.last(), Some(&1));
        assert!(seq.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_probe_sequence_dedups_and_sorts_descending() {
        let seq = probe_sequence(Some(&[50, 150, 100, 50, 0, 150]));
        assert_eq!(seq, vec![150, 100, 50]);
    }

    #[test]
    fn test_probe_sequence_empty_input() {
        assert!(probe_sequence(Some(&[])).is_empty());
    }
}
