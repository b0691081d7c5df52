// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `printready quote` — price an order from a document or from page counts.

use std::fmt::Write as _;
use std::path::PathBuf;

use printready_core::error::Result;
use printready_core::{PipelineConfig, PrintHandoff};
use printready_document::analysis::spine_estimate;
use printready_pricing::{PricingConfig, Quote, QuoteRequest, quote};

use super::analyze::analyze_file;

/// Where the page counts come from.
#[derive(Debug, Clone)]
pub enum PageCounts {
    Document(PathBuf),
    Manual { color: usize, mono: usize },
}

pub fn run(
    pricing_path: &std::path::Path,
    counts: PageCounts,
    request: &QuoteRequest,
    config: &PipelineConfig,
    json: bool,
) -> Result<()> {
    let pricing = PricingConfig::load(pricing_path)?;
    let handoff = match counts {
        PageCounts::Document(path) => analyze_file(&path, config)?.stats.handoff(),
        PageCounts::Manual { color, mono } => manual_handoff(color, mono),
    };
    let quote = quote(&pricing, &handoff, request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print!("{}", format_quote(&quote, &handoff));
    }
    Ok(())
}

pub fn manual_handoff(color: usize, mono: usize) -> PrintHandoff {
    let total_pages = color + mono;
    PrintHandoff {
        total_pages,
        color_count: color,
        bw_count: mono,
        spine: spine_estimate(total_pages),
    }
}

pub fn format_quote(quote: &Quote, handoff: &PrintHandoff) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pages:     {} ({} colour, {} black & white)",
        handoff.total_pages, handoff.color_count, handoff.bw_count
    );
    let _ = writeln!(out, "Colour:    {:.2}", quote.color_cost);
    let _ = writeln!(out, "Mono:      {:.2}", quote.mono_cost);
    let _ = writeln!(
        out,
        "Paper:     {:.2} ({:.3} per page)",
        quote.paper_cost, quote.paper_price
    );
    let _ = writeln!(out, "Binding:   {:.2}", quote.binding_price);
    let _ = writeln!(out, "Add-ons:   {:.2}", quote.addons_cost);
    let _ = writeln!(out, "Per copy:  {:.2}", quote.unit_price);
    let _ = writeln!(out, "Total:     {} for {} copies", quote.total, quote.copies);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_counts_include_spine() {
        let handoff = manual_handoff(4, 16);
        assert_eq!(handoff.total_pages, 20);
        assert!((handoff.spine - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quote_from_saved_price_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.json");
        std::fs::write(
            &path,
            r#"{"binding":[{"name":"staple","base_price":0.5}],"rates":{"color":0.2,"mono":0.05}}"#,
        )
        .unwrap();
        let pricing = PricingConfig::load(&path).unwrap();
        let request = QuoteRequest {
            copies: 10,
            binding: Some("staple".into()),
            ..Default::default()
        };
        let handoff = manual_handoff(2, 4);
        let quote = quote(&pricing, &handoff, &request).unwrap();
        // 2 * 0.2 + 4 * 0.05 + 0.5 = 1.1 per copy.
        assert_eq!(quote.total, 11);

        let text = format_quote(&quote, &handoff);
        assert!(text.contains("Pages:     6 (2 colour, 4 black & white)"));
        assert!(text.contains("Per copy:  1.10"));
        assert!(text.contains("Total:     11 for 10 copies"));
    }
}
