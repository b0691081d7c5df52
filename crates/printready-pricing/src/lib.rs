// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// printready-pricing — Volume tier resolution and print quotes.
//
// The price list is an explicit `PricingConfig` value passed in by the
// caller; nothing here reads or writes global state.

pub mod config;
pub mod quote;
pub mod tier;

pub use config::{Addon, PageRates, PricingConfig};
pub use quote::{Quote, QuoteRequest, quote, round_half_up};
pub use tier::{PriceOption, PriceTier, TierType, resolve_price};
