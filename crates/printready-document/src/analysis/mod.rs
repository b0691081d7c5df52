// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis module — per-page colour/resolution classification and
// document-level print-readiness statistics.

pub mod aggregate;
pub mod classify;

pub use aggregate::{aggregate, spine_estimate};
pub use classify::{PageClass, classify, has_color, is_low_res};
