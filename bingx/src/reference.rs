//! Reference tier data scraped from the BingX website.
//!
//! ```csv
//! Pair,Tier,Position (Notional Value),Max. Leverage
//! BTCUSDT,Tier 1,0 ~ 300000,150X
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::types::Tier;
use crate::utils::normalize_symbol;

/// Default location of the reference file, relative to the working directory.
pub const DEFAULT_REFERENCE_PATH: &str = "data/tiers_from_website.csv";

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("invalid {field} {value:?} at line {line}")]
    Field {
        line: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "Pair")]
    pair: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Position (Notional Value)")]
    position: String,
    #[serde(rename = "Max. Leverage")]
    max_leverage: String,
}

impl ReferenceRow {
    fn into_tier(self, line: usize) -> Result<(String, Tier), ReferenceError> {
        let field_err = |field: &'static str, value: &str| ReferenceError::Field {
            line,
            field,
            value: value.to_string(),
        };

        let tier_index = self
            .tier
            .trim()
            .strip_prefix("Tier")
            .unwrap_or(&self.tier)
            .trim()
            .parse::<u32>()
            .map_err(|_| field_err("tier", &self.tier))?;

        let (floor, cap) = self
            .position
            .split_once('~')
            .ok_or_else(|| field_err("position", &self.position))?;
        let floor = parse_amount(floor).ok_or_else(|| field_err("position", &self.position))?;
        let cap = parse_amount(cap).ok_or_else(|| field_err("position", &self.position))?;

        let leverage = self
            .max_leverage
            .trim()
            .trim_end_matches(['X', 'x'])
            .parse::<u32>()
            .map_err(|_| field_err("leverage", &self.max_leverage))?;

        Ok((
            normalize_symbol(&self.pair),
            Tier::new(tier_index, floor, cap, leverage),
        ))
    }
}

fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.trim().replace(',', "")).ok()
}

/// Reference tiers keyed by normalized symbol, each list sorted by tier index.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTiers {
    tiers: BTreeMap<String, Vec<Tier>>,
}

impl ReferenceTiers {
    /// Load from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ReferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let loaded = Self::from_reader(file)?;
        debug!(path = %path.display(), symbols = loaded.len(), "reference tiers loaded");
        Ok(loaded)
    }

    /// Parse CSV from any reader. The first row must be the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut tiers: BTreeMap<String, Vec<Tier>> = BTreeMap::new();
        for (i, row) in rdr.deserialize::<ReferenceRow>().enumerate() {
            // Line 1 is the header.
            let line = i + 2;
            let row = row.map_err(|source| ReferenceError::Csv { line, source })?;
            let (symbol, tier) = row.into_tier(line)?;
            tiers.entry(symbol).or_default().push(tier);
        }
        for list in tiers.values_mut() {
            list.sort_by_key(|t| t.tier_index);
        }
        Ok(Self { tiers })
    }

    pub fn get(&self, symbol: &str) -> Option<&[Tier]> {
        self.tiers.get(symbol).map(Vec::as_slice)
    }

    /// Symbols with reference data, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        self.tiers.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Tier])> {
        self.tiers.iter().map(|(s, t)| (s.as_str(), t.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Every leverage value across all symbols, unique and descending.
    pub fn all_leverage_values(&self) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .tiers
            .values()
            .flat_map(|list| list.iter().map(|t| t.leverage))
            .collect();
        set.into_iter().rev().collect()
    }

    /// Leverage values of one symbol in tier order (the natural probe set).
    pub fn leverages_for(&self, symbol: &str) -> Vec<u32> {
        self.get(symbol)
            .map(|list| list.iter().map(|t| t.leverage).collect())
            .unwrap_or_default()
    }
}

/// A place where `cap[i-1] != floor[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityGap {
    pub after_tier: u32,
    pub previous_cap: Decimal,
    pub next_floor: Decimal,
}

pub fn continuity_gaps(tiers: &[Tier]) -> Vec<ContinuityGap> {
    tiers
        .windows(2)
        .filter(|w| w[0].cap != w[1].floor)
        .map(|w| ContinuityGap {
            after_tier: w[0].tier_index,
            previous_cap: w[0].cap,
            next_floor: w[1].floor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
Pair,Tier,Position (Notional Value),Max. Leverage
BTCUSDT,Tier 2,300000 ~ 800000,100X
BTCUSDT,Tier 1,0 ~ 300000,150X
ETHUSDT,Tier 1,0 ~ 200000,100X
ETHUSDT,Tier 2,200000 ~ 1000000,75X
";

    #[test]
    fn test_parse_sample() {
        let refs = ReferenceTiers::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(refs.symbols(), vec!["BTC-USDT", "ETH-USDT"]);
        let btc = refs.get("BTC-USDT").unwrap();
        assert_eq!(
            btc,
            &[
                Tier::new(1, dec!(0), dec!(300000), 150),
                Tier::new(2, dec!(300000), dec!(800000), 100),
            ]
        );
        assert!(refs.get("SOL-USDT").is_none());
    }

    #[test]
    fn test_all_leverage_values_descending_unique() {
        let refs = ReferenceTiers::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(refs.all_leverage_values(), vec![150, 100, 75]);
        assert_eq!(refs.leverages_for("ETH-USDT"), vec![100, 75]);
        assert!(refs.leverages_for("XRP-USDT").is_empty());
    }

    #[test]
    fn test_padded_cells_are_trimmed() {
        let csv = "Pair,Tier,Position (Notional Value),Max. Leverage\n SOLUSDT , Tier 1 , 0 ~ 50000 , 50X \n";
        let refs = ReferenceTiers::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            refs.get("SOL-USDT").unwrap(),
            &[Tier::new(1, dec!(0), dec!(50000), 50)]
        );
    }

    #[test]
    fn test_bad_leverage_reports_line() {
        let csv = "Pair,Tier,Position (Notional Value),Max. Leverage\nBTCUSDT,Tier 1,0 ~ 300000,150X\nBTCUSDT,Tier 2,300000 ~ 800000,lots\n";
        let err = ReferenceTiers::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            ReferenceError::Field { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "leverage");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_range_separator() {
        let csv = "Pair,Tier,Position (Notional Value),Max. Leverage\nBTCUSDT,Tier 1,300000,150X\n";
        let err = ReferenceTiers::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("position"), "{err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ReferenceTiers::load("/nonexistent/tiers.csv").unwrap_err();
        assert!(matches!(err, ReferenceError::Io { .. }));
    }

    #[test]
    fn test_continuity_gaps() {
        let tiers = vec![
            Tier::new(1, dec!(0), dec!(300000), 150),
            Tier::new(2, dec!(300000), dec!(800000), 100),
            Tier::new(3, dec!(900000), dec!(3000000), 50),
        ];
        assert_eq!(
            continuity_gaps(&tiers),
            vec![ContinuityGap {
                after_tier: 2,
                previous_cap: dec!(800000),
                next_floor: dec!(900000),
            }]
        );
        assert!(continuity_gaps(&tiers[..2]).is_empty());
    }
}
