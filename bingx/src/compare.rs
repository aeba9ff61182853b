//! Reconciles a discovered tier list against reference tiers.
//!
//! Caps are the primary key since discovery measures them directly; leverage
//! is checked once a boundary is located. Leverage divergence is also
//! reported on its own through the missing/extra leverage lists.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::Tier;

/// Cap tolerance: `max(cap * relative, min_absolute)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tolerance {
    pub relative: Decimal,
    pub min_absolute: Decimal,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: dec!(0.05),
            min_absolute: dec!(1000),
        }
    }
}

impl Tolerance {
    pub fn for_cap(&self, cap: Decimal) -> Decimal {
        (cap * self.relative).max(self.min_absolute)
    }

    pub fn accepts(&self, expected_cap: Decimal, discovered_cap: Decimal) -> bool {
        (discovered_cap - expected_cap).abs() <= self.for_cap(expected_cap)
    }
}

/// An expected tier whose cap was located in the discovered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierMatch {
    pub tier: u32,
    pub leverage: u32,
    pub discovered_leverage: u32,
    pub expected: (Decimal, Decimal),
    pub discovered: (Decimal, Decimal),
    pub floor_diff: Decimal,
    pub cap_diff: Decimal,
    pub leverage_match: bool,
}

/// An expected tier with no boundary match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedTier {
    pub tier: u32,
    pub leverage: u32,
    pub expected: (Decimal, Decimal),
}

/// A discovered tier whose leverage never appears in the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraLeverage {
    pub leverage: u32,
    pub discovered: (Decimal, Decimal),
}

/// Outcome of comparing one symbol's tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub symbol: String,
    pub expected_count: usize,
    pub discovered_count: usize,
    /// Cap, floor and leverage all equal.
    pub exact_matches: Vec<TierMatch>,
    /// Cap equal or within tolerance, but not an exact match.
    pub close_matches: Vec<TierMatch>,
    /// Expected tiers with no boundary match.
    pub mismatches: Vec<UnmatchedTier>,
    /// Expected tiers whose leverage no discovered tier carries.
    pub missing_leverages: Vec<UnmatchedTier>,
    pub extra_leverages: Vec<ExtraLeverage>,
    pub total_boundaries: usize,
    pub boundary_matches: usize,
    /// Boundaries located by exact cap equality.
    pub boundary_exact: usize,
}

impl ComparisonResult {
    /// Percentage of expected boundaries matched exactly or within tolerance.
    pub fn boundary_match_rate(&self) -> f64 {
        percent(self.boundary_matches, self.total_boundaries)
    }

    /// Percentage of expected tiers that matched exactly.
    pub fn exact_match_rate(&self) -> f64 {
        percent(self.exact_matches.len(), self.expected_count)
    }

    pub fn matched_count(&self) -> usize {
        self.exact_matches.len() + self.close_matches.len()
    }
}

fn percent(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64 * 100.0
    }
}

/// Tier list comparator. Pure and total.
#[derive(Debug, Clone, Default)]
pub struct TierComparator {
    tolerance: Tolerance,
}

impl TierComparator {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Classify each expected tier as exact, close or unmatched.
    ///
    /// When several discovered caps fall within tolerance of one expected
    /// cap, the first in `discovered` order wins.
    pub fn compare(&self, expected: &[Tier], discovered: &[Tier], symbol: &str) -> ComparisonResult {
        let mut result = ComparisonResult {
            symbol: symbol.to_string(),
            expected_count: expected.len(),
            discovered_count: discovered.len(),
            exact_matches: Vec::new(),
            close_matches: Vec::new(),
            mismatches: Vec::new(),
            missing_leverages: Vec::new(),
            extra_leverages: Vec::new(),
            total_boundaries: 0,
            boundary_matches: 0,
            boundary_exact: 0,
        };

        // Decimal hashes by value, so 300000 and 300000.00 share a key.
        let by_cap: HashMap<Decimal, &Tier> = discovered.iter().map(|t| (t.cap, t)).collect();

        for exp in expected {
            result.total_boundaries += 1;

            if let Some(disc) = by_cap.get(&exp.cap) {
                result.boundary_matches += 1;
                result.boundary_exact += 1;
                let m = tier_match(exp, disc);
                if m.leverage_match && disc.floor == exp.floor {
                    result.exact_matches.push(m);
                } else {
                    result.close_matches.push(m);
                }
                continue;
            }

            match discovered
                .iter()
                .find(|d| self.tolerance.accepts(exp.cap, d.cap))
            {
                Some(disc) => {
                    result.boundary_matches += 1;
                    result.close_matches.push(tier_match(exp, disc));
                }
                None => result.mismatches.push(unmatched(exp)),
            }
        }

        let discovered_levs: HashSet<u32> = discovered.iter().map(|t| t.leverage).collect();
        let expected_levs: HashSet<u32> = expected.iter().map(|t| t.leverage).collect();

        result.missing_leverages = expected
            .iter()
            .filter(|t| !discovered_levs.contains(&t.leverage))
            .map(unmatched)
            .collect();
        result.extra_leverages = discovered
            .iter()
            .filter(|t| !expected_levs.contains(&t.leverage))
            .map(|t| ExtraLeverage {
                leverage: t.leverage,
                discovered: (t.floor, t.cap),
            })
            .collect();

        result
    }
}

fn tier_match(exp: &Tier, disc: &Tier) -> TierMatch {
    TierMatch {
        tier: exp.tier_index,
        leverage: exp.leverage,
        discovered_leverage: disc.leverage,
        expected: (exp.floor, exp.cap),
        discovered: (disc.floor, disc.cap),
        floor_diff: (disc.floor - exp.floor).abs(),
        cap_diff: (disc.cap - exp.cap).abs(),
        leverage_match: exp.leverage == disc.leverage,
    }
}

fn unmatched(exp: &Tier) -> UnmatchedTier {
    UnmatchedTier {
        tier: exp.tier_index,
        leverage: exp.leverage,
        expected: (exp.floor, exp.cap),
    }
}

/// Totals across several symbols.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub symbols_tested: usize,
    pub total_expected: usize,
    pub total_exact: usize,
    pub total_close: usize,
    pub total_mismatches: usize,
    pub total_missing_leverages: usize,
    pub boundary_matches: usize,
    pub total_boundaries: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        results.iter().fold(Self::default(), |mut s, r| {
            s.symbols_tested += 1;
            s.total_expected += r.expected_count;
            s.total_exact += r.exact_matches.len();
            s.total_close += r.close_matches.len();
            s.total_mismatches += r.mismatches.len();
            s.total_missing_leverages += r.missing_leverages.len();
            s.boundary_matches += r.boundary_matches;
            s.total_boundaries += r.total_boundaries;
            s
        })
    }

    pub fn exact_accuracy(&self) -> f64 {
        percent(self.total_exact, self.total_expected)
    }

    pub fn total_accuracy(&self) -> f64 {
        percent(self.total_exact + self.total_close, self.total_expected)
    }

    pub fn boundary_accuracy(&self) -> f64 {
        percent(self.boundary_matches, self.total_boundaries)
    }
}
