// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pricing configuration — the price list handed in by the host, with JSON
// import/export.

use std::collections::HashSet;
use std::path::Path;

use printready_core::error::{PrintreadyError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::tier::PriceOption;

/// A flat per-copy extra (cover sheet, lamination, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    pub price: f64,
}

/// Per-page print rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRates {
    pub color: f64,
    pub mono: f64,
}

/// The complete price list.
///
/// The engine only ever borrows this; loading, editing and persisting it is
/// the host's business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub binding: Vec<PriceOption>,
    pub paper: Vec<PriceOption>,
    pub addons: Vec<Addon>,
    pub rates: PageRates,
}

impl PricingConfig {
    /// Parse and validate an exported price list.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            binding = config.binding.len(),
            paper = config.paper.len(),
            addons = config.addons.len(),
            "pricing config parsed"
        );
        Ok(config)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string_pretty()?)?;
        info!(path = %path.as_ref().display(), "pricing config saved");
        Ok(())
    }

    /// Check that every price is a finite, non-negative amount and that
    /// option names are unique within their family.
    pub fn validate(&self) -> Result<()> {
        for (family, options) in [("binding", &self.binding), ("paper", &self.paper)] {
            let mut seen = HashSet::new();
            for option in options {
                if !seen.insert(option.name.as_str()) {
                    return Err(invalid(format!(
                        "duplicate {family} option \"{}\"",
                        option.name
                    )));
                }
                check_amount(&option.name, "base price", option.base_price)?;
                for tier in &option.tiers {
                    check_amount(&option.name, "tier price", tier.price)?;
                }
            }
        }
        let mut seen = HashSet::new();
        for addon in &self.addons {
            if !seen.insert(addon.name.as_str()) {
                return Err(invalid(format!("duplicate addon \"{}\"", addon.name)));
            }
            check_amount(&addon.name, "price", addon.price)?;
        }
        check_amount("rates", "colour rate", self.rates.color)?;
        check_amount("rates", "mono rate", self.rates.mono)?;
        Ok(())
    }

    pub fn binding(&self, name: &str) -> Option<&PriceOption> {
        self.binding.iter().find(|option| option.name == name)
    }

    pub fn paper(&self, name: &str) -> Option<&PriceOption> {
        self.paper.iter().find(|option| option.name == name)
    }

    pub fn addon(&self, name: &str) -> Option<&Addon> {
        self.addons.iter().find(|addon| addon.name == name)
    }
}

fn check_amount(owner: &str, what: &str, amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{owner}: {what} must be a non-negative amount, got {amount}")))
    }
}

fn invalid(detail: String) -> PrintreadyError {
    PrintreadyError::InvalidPricing(detail)
}
