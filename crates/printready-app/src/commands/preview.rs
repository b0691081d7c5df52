// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `printready preview` — PNG thumbnails for a page strip or proof sheet.

use std::path::Path;

use printready_core::PipelineConfig;
use printready_core::error::Result;
use printready_document::{CancelToken, PageEvent, PageSource, Pipeline, SkippedPage};
use tracing::warn;

use super::log_progress;
use crate::services::source::{output_stem, with_page_source};

pub fn preview_file_name(stem: &str, page_number: u32) -> String {
    format!("{stem}_preview_{page_number:03}.png")
}

/// Thumbnails written, in page order, and pages left out.
#[derive(Debug, Default)]
pub struct PreviewSummary {
    pub written: Vec<String>,
    pub skipped: Vec<SkippedPage>,
}

impl PreviewSummary {
    /// Write an encoded thumbnail, or note the page as skipped when it
    /// failed on its own.
    fn record(
        &mut self,
        page_number: u32,
        png: Result<Vec<u8>>,
        stem: &str,
        out_dir: &Path,
    ) -> Result<()> {
        match png {
            Ok(bytes) => {
                let name = preview_file_name(stem, page_number);
                std::fs::write(out_dir.join(&name), bytes)?;
                self.written.push(name);
            }
            Err(error) if error.is_page_local() => {
                warn!(page_number, %error, "Skipping page");
                self.skipped.push(SkippedPage {
                    page_number,
                    reason: error.to_string(),
                });
            }
            Err(error) => return Err(error),
        }
        Ok(())
    }
}

pub fn run(
    input: &Path,
    out_dir: &Path,
    config: &PipelineConfig,
    width_px: Option<u32>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(width) = width_px {
        config.preview_width_px = width;
    }
    let pipeline = Pipeline::new(config);
    let stem = output_stem(input);
    std::fs::create_dir_all(out_dir)?;

    let summary =
        with_page_source(input, |source| write_previews(&pipeline, source, &stem, out_dir))?;
    for name in &summary.written {
        println!("{name}");
    }
    for skipped in &summary.skipped {
        eprintln!("skipped page {}: {}", skipped.page_number, skipped.reason);
    }
    Ok(())
}

/// Write one PNG per renderable page.
pub fn write_previews<S: PageSource + ?Sized>(
    pipeline: &Pipeline,
    source: &S,
    stem: &str,
    out_dir: &Path,
) -> Result<PreviewSummary> {
    let mut run = pipeline.previews(source, CancelToken::new())?;
    let mut summary = PreviewSummary::default();
    while let Some(event) = run.next() {
        match event? {
            PageEvent::Previewed(preview) => {
                summary.record(preview.page_number(), preview.to_png_bytes(), stem, out_dir)?;
            }
            PageEvent::Skipped { page_number, error } => summary.skipped.push(SkippedPage {
                page_number,
                reason: error.to_string(),
            }),
            PageEvent::Analyzed(_) | PageEvent::Exported(_) => {}
        }
        log_progress(run.progress());
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::BlankDocument;
    use printready_core::error::PrintreadyError;

    #[test]
    fn thumbnails_are_written_in_page_order() {
        let dir = tempfile::tempdir().unwrap();
        let doc = BlankDocument {
            pages: 2,
            width_pt: 595.0,
            height_pt: 842.0,
            broken: None,
        };
        let pipeline = Pipeline::new(PipelineConfig {
            preview_width_px: 60,
            ..Default::default()
        });
        let summary = write_previews(&pipeline, &doc, "menu", dir.path()).unwrap();
        let names = summary.written;
        assert_eq!(names, vec!["menu_preview_001.png", "menu_preview_002.png"]);
        let png = std::fs::read(dir.path().join(&names[0])).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn broken_page_has_no_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let doc = BlankDocument {
            pages: 3,
            width_pt: 100.0,
            height_pt: 100.0,
            broken: Some(1),
        };
        let summary = write_previews(&Pipeline::default(), &doc, "x", dir.path()).unwrap();
        assert_eq!(summary.written, vec!["x_preview_002.png", "x_preview_003.png"]);
        assert_eq!(summary.skipped[0].page_number, 1);
    }

    #[test]
    fn encode_failure_skips_only_that_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut summary = PreviewSummary::default();
        let png = || Ok(b"\x89PNG".to_vec());
        let failed = Err(PrintreadyError::Encode("png writer failed".into()));
        summary.record(1, png(), "x", dir.path()).unwrap();
        summary.record(2, failed, "x", dir.path()).unwrap();
        summary.record(3, png(), "x", dir.path()).unwrap();
        assert_eq!(summary.written, vec!["x_preview_001.png", "x_preview_003.png"]);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].page_number, 2);
        assert!(!dir.path().join("x_preview_002.png").exists());
    }

    #[test]
    fn write_failure_is_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let mut summary = PreviewSummary::default();
        let result = summary.record(1, Ok(Vec::new()), "x", &missing);
        assert!(matches!(result, Err(PrintreadyError::Io(_))));
    }
}
