// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `printready inspect` — page sizes and boxes, no rendering needed.

use std::fmt::Write as _;
use std::path::Path;

use printready_core::error::Result;
use printready_document::PdfReader;
use printready_document::pdf::PageInfo;
use serde::Serialize;

#[derive(Serialize)]
struct InspectOutput<'a> {
    page_count: usize,
    pages: &'a [PageInfo],
}

pub fn run(input: &Path, json: bool) -> Result<()> {
    let reader = PdfReader::open(input)?;
    let pages = reader.pages();
    if json {
        let output = InspectOutput {
            page_count: reader.page_count(),
            pages: &pages,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_pages(reader.page_count(), &pages));
    }
    Ok(())
}

pub fn format_pages(page_count: usize, pages: &[PageInfo]) -> String {
    let mut out = format!("Pages: {page_count}\n");
    for page in pages {
        let _ = write!(
            out,
            "  {:>4}  {}",
            page.page_number,
            page.geometry.size_label()
        );
        if page.rotation != 0 {
            let _ = write!(out, "  rotated {}", page.rotation);
        }
        if page.boxes.bleed.is_some() {
            out.push_str("  bleed box");
        }
        if page.boxes.trim.is_some() {
            out.push_str("  trim box");
        }
        out.push('\n');
    }
    out
}
