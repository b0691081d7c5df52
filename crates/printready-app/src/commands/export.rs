// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `printready export` — one density-tagged JPEG per page.
//
// Pages are written as they are produced, so only one encoded page is held
// in memory at a time.

use std::path::Path;

use printready_core::PipelineConfig;
use printready_core::error::Result;
use printready_document::{CancelToken, ExportedPage, PageEvent, PageSource, Pipeline, SkippedPage};
use tracing::info;

use super::log_progress;
use crate::services::source::{output_stem, with_page_source};

/// Command-line overrides on top of the stored settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOverrides {
    pub dpi: Option<u16>,
    pub width_mm: Option<f64>,
    pub quality: Option<u8>,
}

impl ExportOverrides {
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(dpi) = self.dpi {
            config.export_dpi = dpi;
        }
        if self.width_mm.is_some() {
            config.target_width_mm = self.width_mm;
        }
        if let Some(quality) = self.quality {
            config.jpeg_quality = quality;
        }
        config
    }
}

/// What was written; JPEG bytes are not retained.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<ExportedPage>,
    pub skipped: Vec<SkippedPage>,
    pub cancelled: bool,
}

pub fn run(
    input: &Path,
    out_dir: &Path,
    config: &PipelineConfig,
    overrides: ExportOverrides,
) -> Result<()> {
    let pipeline = Pipeline::new(overrides.apply(config.clone()));
    let stem = output_stem(input);
    std::fs::create_dir_all(out_dir)?;

    let summary = with_page_source(input, |source| {
        write_pages(&pipeline, source, &stem, out_dir, &CancelToken::new())
    })?;

    for page in &summary.written {
        println!(
            "{}  {} x {} px  {:.1} x {:.1} mm  {} dpi  sha256 {}",
            page.file_name,
            page.width_px,
            page.height_px,
            page.width_mm,
            page.height_mm,
            page.dpi,
            page.sha256
        );
    }
    for skipped in &summary.skipped {
        eprintln!("skipped page {}: {}", skipped.page_number, skipped.reason);
    }
    if summary.cancelled {
        eprintln!("export cancelled; later pages were not written");
    }
    Ok(())
}

/// Export every page of `source` into `out_dir`.
pub fn write_pages<S: PageSource + ?Sized>(
    pipeline: &Pipeline,
    source: &S,
    stem: &str,
    out_dir: &Path,
    cancel: &CancelToken,
) -> Result<ExportSummary> {
    let mut run = pipeline.exports(source, stem, cancel.clone())?;
    let mut summary = ExportSummary::default();

    while let Some(event) = run.next() {
        match event? {
            PageEvent::Exported(mut page) => {
                std::fs::write(out_dir.join(&page.file_name), &page.jpeg)?;
                page.jpeg = Vec::new();
                summary.written.push(page);
            }
            PageEvent::Skipped { page_number, error } => summary.skipped.push(SkippedPage {
                page_number,
                reason: error.to_string(),
            }),
            PageEvent::Analyzed(_) | PageEvent::Previewed(_) => {}
        }
        log_progress(run.progress());
    }
    summary.cancelled = run.was_cancelled();

    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        out_dir = %out_dir.display(),
        "export finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::BlankDocument;
    use printready_document::raster::read_density;

    fn small_doc(broken: Option<u32>) -> BlankDocument {
        // 1 x 1 inch pages.
        BlankDocument {
            pages: 3,
            width_pt: 72.0,
            height_pt: 72.0,
            broken,
        }
    }

    #[test]
    fn writes_tagged_jpegs() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(PipelineConfig {
            export_dpi: 150,
            ..Default::default()
        });
        let summary =
            write_pages(&pipeline, &small_doc(None), "card", dir.path(), &CancelToken::new())
                .unwrap();
        assert_eq!(summary.written.len(), 3);
        for page in &summary.written {
            assert!(page.jpeg.is_empty());
            let bytes = std::fs::read(dir.path().join(&page.file_name)).unwrap();
            assert_eq!(read_density(&bytes).and_then(|d| d.dpi()), Some(150));
            assert_eq!((page.width_px, page.height_px), (150, 150));
        }
        assert!(dir.path().join("card_page_002.jpg").is_file());
    }

    #[test]
    fn broken_page_is_reported_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_pages(
            &Pipeline::default(),
            &small_doc(Some(2)),
            "doc",
            dir.path(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(summary.written.len(), 2);
        assert_eq!(summary.skipped[0].page_number, 2);
        assert!(!dir.path().join("doc_page_002.jpg").exists());
    }

    #[test]
    fn cancelled_before_start_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let summary =
            write_pages(&Pipeline::default(), &small_doc(None), "doc", dir.path(), &cancel)
                .unwrap();
        assert!(summary.cancelled);
        assert!(summary.written.is_empty());
    }

    #[test]
    fn overrides_replace_only_given_settings() {
        let overrides = ExportOverrides {
            dpi: Some(600),
            width_mm: None,
            quality: Some(80),
        };
        let config = overrides.apply(PipelineConfig {
            target_width_mm: Some(100.0),
            ..Default::default()
        });
        assert_eq!(config.export_dpi, 600);
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.target_width_mm, Some(100.0));
    }
}
