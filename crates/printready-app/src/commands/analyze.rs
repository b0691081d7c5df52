// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `printready analyze` — colour/mono split, bleed and resolution checks.

use std::fmt::Write as _;
use std::path::Path;

use printready_core::PipelineConfig;
use printready_core::error::Result;
use printready_document::{CancelToken, DocumentReport, Pipeline};

use super::{log_progress, page_list, yes_no};
use crate::services::source::with_page_source;

pub fn run(input: &Path, config: &PipelineConfig, json: bool) -> Result<()> {
    let report = analyze_file(input, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Open and analyse a document; shared with `quote --document`.
pub fn analyze_file(input: &Path, config: &PipelineConfig) -> Result<DocumentReport> {
    let pipeline = Pipeline::new(config.clone());
    with_page_source(input, |source| {
        pipeline.analyze(source, &CancelToken::new(), log_progress)
    })
}

pub fn format_report(report: &DocumentReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pages:        {} ({} colour, {} black & white)",
        stats.total, stats.color_count, stats.mono_count
    );
    let _ = writeln!(out, "Colour pages: {}", page_list(&stats.color_pages));
    let _ = writeln!(out, "Mono pages:   {}", page_list(&stats.mono_pages));
    let _ = writeln!(
        out,
        "Page size:    {}",
        stats.main_size.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Bleed:        {}", yes_no(stats.is_bleed));
    let _ = writeln!(out, "Low-res:      {}", yes_no(stats.has_low_res));
    let _ = writeln!(out, "Spine:        {:.2}", stats.spine);
    for skipped in &report.skipped_pages {
        let _ = writeln!(
            out,
            "Skipped:      page {} ({})",
            skipped.page_number, skipped.reason
        );
    }
    if report.cancelled {
        out.push_str("Cancelled before the last page.\n");
    }
    out
}
