use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of notional position size with a single maximum leverage.
///
/// Well-formed schedules satisfy `floor[0] == 0`, `floor[i] == cap[i-1]` and
/// strictly decreasing leverage, but nothing here enforces it: discovered
/// lists can have gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub tier_index: u32,
    pub floor: Decimal,
    pub cap: Decimal,
    pub leverage: u32,
}

impl Tier {
    pub fn new(tier_index: u32, floor: Decimal, cap: Decimal, leverage: u32) -> Self {
        Self {
            tier_index,
            floor,
            cap,
            leverage,
        }
    }
}

/// Raw discovery output: the lowest probed leverage that still produced
/// `max_position_value` as the enforced long notional cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredTier {
    pub leverage: u32,
    pub max_position_value: Decimal,
}

/// Convert discovery output into the shared [`Tier`] shape.
///
/// Floors are chained from the previous cap; caps are truncated to whole
/// units to line up with reference data.
pub fn tiers_from_discovered(discovered: &[DiscoveredTier]) -> Vec<Tier> {
    let mut floor = Decimal::ZERO;
    discovered
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let cap = d.max_position_value.trunc();
            let tier = Tier::new(i as u32 + 1, floor, cap, d.leverage);
            floor = cap;
            tier
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tiers_from_discovered_chains_floors() {
        let discovered = vec![
            DiscoveredTier {
                leverage: 150,
                max_position_value: dec!(300000),
            },
            DiscoveredTier {
                leverage: 100,
                max_position_value: dec!(800000.75),
            },
            DiscoveredTier {
                leverage: 50,
                max_position_value: dec!(3000000),
            },
        ];
        let tiers = tiers_from_discovered(&discovered);
        assert_eq!(
            tiers,
            vec![
                Tier::new(1, dec!(0), dec!(300000), 150),
                Tier::new(2, dec!(300000), dec!(800000), 100),
                Tier::new(3, dec!(800000), dec!(3000000), 50),
            ]
        );
    }

    #[test]
    fn test_tiers_from_discovered_empty() {
        assert!(tiers_from_discovered(&[]).is_empty());
    }
}
