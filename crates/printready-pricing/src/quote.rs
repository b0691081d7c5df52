// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quotes — composes page rates, paper, binding and add-ons into a total for
// an order of N copies.

use printready_core::PrintHandoff;
use printready_core::error::{PrintreadyError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::PricingConfig;
use crate::tier::resolve_price;

/// What the customer picked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub copies: u32,
    pub binding: Option<String>,
    pub paper: Option<String>,
    #[serde(default)]
    pub addons: Vec<String>,
}

/// A priced order, broken down per component.
///
/// Every `*_cost` / `*_price` field is per copy; only `total` covers all
/// copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub copies: u32,
    pub color_cost: f64,
    pub mono_cost: f64,
    /// Resolved per-page paper price.
    pub paper_price: f64,
    pub paper_cost: f64,
    pub binding_price: f64,
    pub addons_cost: f64,
    pub unit_price: f64,
    /// Whole currency units.
    pub total: i64,
}

/// Round to the nearest whole unit; halves go up.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Price `request` for a document described by `handoff`.
///
/// Unknown option or add-on names are rejected rather than priced at zero.
#[instrument(skip(config, handoff), fields(pages = handoff.total_pages))]
pub fn quote(
    config: &PricingConfig,
    handoff: &PrintHandoff,
    request: &QuoteRequest,
) -> Result<Quote> {
    let copies = request.copies;
    let color_cost = handoff.color_count as f64 * config.rates.color;
    let mono_cost = handoff.bw_count as f64 * config.rates.mono;

    let paper_price = match request.paper.as_deref() {
        Some(name) => {
            let option = config.paper(name).ok_or_else(|| unknown("paper", name))?;
            resolve_price(option, option.tier_quantity(copies, handoff.total_pages))
        }
        None => 0.0,
    };
    let paper_cost = handoff.total_pages as f64 * paper_price;

    let binding_price = match request.binding.as_deref() {
        Some(name) => {
            let option = config.binding(name).ok_or_else(|| unknown("binding", name))?;
            resolve_price(option, option.tier_quantity(copies, handoff.total_pages))
        }
        None => 0.0,
    };

    let mut addons_cost = 0.0;
    for name in &request.addons {
        let addon = config.addon(name).ok_or_else(|| unknown("addon", name))?;
        addons_cost += addon.price;
    }

    let unit_price = color_cost + mono_cost + paper_cost + binding_price + addons_cost;
    let total = round_half_up(unit_price * f64::from(copies));
    debug!(unit_price, total, copies, "quote computed");

    Ok(Quote {
        copies,
        color_cost,
        mono_cost,
        paper_price,
        paper_cost,
        binding_price,
        addons_cost,
        unit_price,
        total,
    })
}

fn unknown(family: &str, name: &str) -> PrintreadyError {
    PrintreadyError::InvalidPricing(format!("no {family} option named \"{name}\""))
}
