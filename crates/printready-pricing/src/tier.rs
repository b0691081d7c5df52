// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tier resolver — volume price breaks for binding and paper options.

use serde::{Deserialize, Serialize};

/// Which runtime quantity an option's tiers are compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierType {
    /// Number of copies ordered.
    #[default]
    Quantity,
    /// Number of pages in the document.
    PageCount,
}

/// One volume break: from `min_amount` upwards the unit price is `price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub min_amount: u32,
    pub price: f64,
}

/// A named price rule with optional volume breaks.
///
/// Tiers are kept in the order they were entered; resolution does not depend
/// on that order except to break ties between equal thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOption {
    pub name: String,
    pub base_price: f64,
    #[serde(default)]
    pub tiers: Vec<PriceTier>,
    #[serde(default)]
    pub tier_type: TierType,
}

impl PriceOption {
    pub fn new(name: impl Into<String>, base_price: f64) -> Self {
        Self {
            name: name.into(),
            base_price,
            tiers: Vec::new(),
            tier_type: TierType::Quantity,
        }
    }

    pub fn with_tier(mut self, min_amount: u32, price: f64) -> Self {
        self.tiers.push(PriceTier { min_amount, price });
        self
    }

    pub fn with_tier_type(mut self, tier_type: TierType) -> Self {
        self.tier_type = tier_type;
        self
    }

    /// The tier with the greatest threshold not above `quantity`.
    ///
    /// Among tiers sharing that threshold the earliest one wins.
    pub fn applicable_tier(&self, quantity: i64) -> Option<&PriceTier> {
        self.tiers
            .iter()
            .filter(|tier| i64::from(tier.min_amount) <= quantity)
            .fold(None, |best: Option<&PriceTier>, tier| match best {
                Some(current) if current.min_amount >= tier.min_amount => Some(current),
                _ => Some(tier),
            })
    }

    /// Pick copies or pages according to [`TierType`].
    pub fn tier_quantity(&self, copies: u32, total_pages: usize) -> i64 {
        match self.tier_type {
            TierType::Quantity => i64::from(copies),
            TierType::PageCount => i64::try_from(total_pages).unwrap_or(i64::MAX),
        }
    }
}

/// Unit price of `option` at `quantity`.
///
/// Never fails: zero, negative, or below-every-threshold quantities fall back
/// to the base price.
pub fn resolve_price(option: &PriceOption, quantity: i64) -> f64 {
    option
        .applicable_tier(quantity)
        .map_or(option.base_price, |tier| tier.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiral() -> PriceOption {
        PriceOption::new("spiral", 4.0)
            .with_tier(50, 2.5)
            .with_tier(10, 3.0)
            .with_tier(100, 2.0)
    }

    #[test]
    fn below_every_threshold_is_base_price() {
        assert_eq!(resolve_price(&spiral(), 9), 4.0);
    }

    #[test]
    fn exact_threshold_selects_that_tier() {
        assert_eq!(resolve_price(&spiral(), 10), 3.0);
        assert_eq!(resolve_price(&spiral(), 50), 2.5);
        assert_eq!(resolve_price(&spiral(), 100), 2.0);
    }

    #[test]
    fn storage_order_does_not_matter() {
        assert_eq!(resolve_price(&spiral(), 75), 2.5);
        assert_eq!(resolve_price(&spiral(), 10_000), 2.0);
    }

    #[test]
    fn degenerate_quantities_fall_back() {
        assert_eq!(resolve_price(&spiral(), 0), 4.0);
        assert_eq!(resolve_price(&spiral(), -5), 4.0);
        assert_eq!(resolve_price(&PriceOption::new("plain", 1.5), 500), 1.5);
    }

    #[test]
    fn zero_threshold_applies_from_zero() {
        let option = PriceOption::new("flat", 9.0).with_tier(0, 1.0);
        assert_eq!(resolve_price(&option, 0), 1.0);
        assert_eq!(resolve_price(&option, -1), 9.0);
    }

    #[test]
    fn ties_keep_the_first_tier() {
        let option = PriceOption::new("dup", 5.0)
            .with_tier(20, 1.25)
            .with_tier(20, 0.75);
        assert_eq!(resolve_price(&option, 20), 1.25);
        assert_eq!(resolve_price(&option, 21), 1.25);
    }

    #[test]
    fn tier_type_picks_the_quantity() {
        let by_pages = spiral().with_tier_type(TierType::PageCount);
        assert_eq!(by_pages.tier_quantity(3, 120), 120);
        assert_eq!(spiral().tier_quantity(3, 120), 3);
    }

    #[test]
    fn tier_type_defaults_to_quantity_in_json() {
        let option: PriceOption =
            serde_json::from_str(r#"{"name":"a","base_price":1.0,"tiers":[]}"#).unwrap();
        assert_eq!(option.tier_type, TierType::Quantity);
        let option: PriceOption = serde_json::from_str(
            r#"{"name":"b","base_price":1.0,"tier_type":"page_count"}"#,
        )
        .unwrap();
        assert_eq!(option.tier_type, TierType::PageCount);
        assert!(option.tiers.is_empty());
    }
}
