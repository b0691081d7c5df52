// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print-readiness aggregation — document-level statistics from per-page
// classifications.

use printready_core::{DocumentStats, PageAnalysis};

/// Paper-thickness units added to the spine per sheet (two pages).
///
/// A fixed placeholder; material-specific thickness is applied downstream.
pub const SPINE_PER_SHEET: f64 = 0.1;

/// Page-1 widths strictly inside this band (mm) read as A4 plus a bleed
/// margin.
pub const BLEED_WIDTH_BAND_MM: (f64, f64) = (210.0, 220.0);

/// Combine page analyses into document statistics.
///
/// Page-number lists keep the input order. `is_bleed` and `main_size` look at
/// the first analysis only; other pages may differ in size without affecting
/// either. An empty input yields zero counts and false flags.
pub fn aggregate(analyses: &[PageAnalysis]) -> DocumentStats {
    let (color, mono): (Vec<&PageAnalysis>, Vec<&PageAnalysis>) =
        analyses.iter().partition(|page| page.is_color);
    let color_pages: Vec<u32> = color.iter().map(|page| page.page_number).collect();
    let mono_pages: Vec<u32> = mono.iter().map(|page| page.page_number).collect();

    let first = analyses.first();
    let is_bleed = first.is_some_and(|page| {
        page.width_mm > BLEED_WIDTH_BAND_MM.0 && page.width_mm < BLEED_WIDTH_BAND_MM.1
    });
    let main_size = first.map(|page| format!("{:.1} x {:.1} mm", page.width_mm, page.height_mm));

    DocumentStats {
        total: analyses.len(),
        color_count: color_pages.len(),
        mono_count: mono_pages.len(),
        color_pages,
        mono_pages,
        spine: spine_estimate(analyses.len()),
        main_size,
        is_bleed,
        has_low_res: analyses.iter().any(|page| page.is_low_res),
    }
}

/// Spine thickness for `page_count` pages: one sheet per two pages.
pub fn spine_estimate(page_count: usize) -> f64 {
    page_count as f64 / 2.0 * SPINE_PER_SHEET
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_number: u32, is_color: bool, width_mm: f64) -> PageAnalysis {
        PageAnalysis {
            page_number,
            is_color,
            is_low_res: false,
            width_mm,
            height_mm: 297.0,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.color_count, 0);
        assert_eq!(stats.mono_count, 0);
        assert!(stats.color_pages.is_empty());
        assert_eq!(stats.spine, 0.0);
        assert_eq!(stats.main_size, None);
        assert!(!stats.is_bleed);
        assert!(!stats.has_low_res);
        assert_eq!(stats, DocumentStats::default());
    }

    #[test]
    fn partitions_keep_document_order() {
        let analyses = vec![
            page(1, false, 210.0),
            page(2, true, 210.0),
            page(3, false, 210.0),
            page(4, true, 210.0),
            page(5, true, 210.0),
        ];
        let stats = aggregate(&analyses);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.color_pages, vec![2, 4, 5]);
        assert_eq!(stats.mono_pages, vec![1, 3]);
        assert_eq!(stats.color_count, 3);
        assert_eq!(stats.mono_count, 2);
    }

    #[test]
    fn gaps_from_skipped_pages_are_preserved() {
        let analyses = vec![page(1, true, 210.0), page(3, false, 210.0)];
        let stats = aggregate(&analyses);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.color_pages, vec![1]);
        assert_eq!(stats.mono_pages, vec![3]);
    }

    #[test]
    fn spine_is_a_tenth_per_two_pages() {
        assert_eq!(spine_estimate(0), 0.0);
        assert!((spine_estimate(3) - 0.15).abs() < 1e-12);
        assert!((spine_estimate(100) - 5.0).abs() < 1e-12);
        let analyses: Vec<_> = (1..=4).map(|n| page(n, false, 210.0)).collect();
        assert!((aggregate(&analyses).spine - 0.2).abs() < 1e-12);
    }

    #[test]
    fn bleed_band_is_exclusive() {
        assert!(!aggregate(&[page(1, false, 210.0)]).is_bleed);
        assert!(aggregate(&[page(1, false, 210.1)]).is_bleed);
        assert!(aggregate(&[page(1, false, 216.0)]).is_bleed);
        assert!(aggregate(&[page(1, false, 219.9)]).is_bleed);
        assert!(!aggregate(&[page(1, false, 220.0)]).is_bleed);
        assert!(!aggregate(&[page(1, false, 148.0)]).is_bleed);
    }

    #[test]
    fn bleed_and_size_come_from_first_page_only() {
        let analyses = vec![page(1, false, 210.0), page(2, false, 216.0)];
        let stats = aggregate(&analyses);
        assert!(!stats.is_bleed);
        assert_eq!(stats.main_size.as_deref(), Some("210.0 x 297.0 mm"));
    }

    #[test]
    fn any_low_res_page_flags_the_document() {
        let mut analyses = vec![page(1, false, 210.0), page(2, false, 210.0)];
        assert!(!aggregate(&analyses).has_low_res);
        analyses[1].is_low_res = true;
        assert!(aggregate(&analyses).has_low_res);
    }
}
