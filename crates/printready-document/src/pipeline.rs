// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document pipeline — walks a page source one page at a time, classifying or
// exporting each page, and folds the results into document-level reports.
//
// Pages are processed strictly in order by a single worker. Each page's
// bitmap is released before the next page renders, so peak memory is one
// page regardless of document length. A page that fails to render or encode
// is skipped and recorded; the run continues.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use printready_core::error::{PrintreadyError, Result};
use printready_core::{DocumentStats, PageAnalysis, PipelineConfig, RasterSpec, units};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::analysis::{aggregate, classify};
use crate::fingerprint::hash_bytes;
use crate::image::ImageProcessor;
use crate::raster::{PreviewImage, Rasterizer, inject_density_in_place};
use crate::source::PageSource;

// -- Cancellation and progress ------------------------------------------------

/// Shared cancellation flag, checked between pages.
///
/// Clones share the same flag. A page that is already rendering finishes
/// before the run stops.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pages finished so far out of the document's page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion in `[0.0, 1.0]`; an empty document counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

// -- Per-page results ---------------------------------------------------------

/// A page that was left out of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPage {
    pub page_number: u32,
    pub reason: String,
}

/// One density-tagged JPEG page, ready to be written or uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedPage {
    pub page_number: u32,
    /// `<stem>_page_<NNN>.jpg`.
    pub file_name: String,
    #[serde(skip)]
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub width_mm: f64,
    pub height_mm: f64,
    pub dpi: u16,
    /// SHA-256 of `jpeg`, lowercase hex.
    pub sha256: String,
}

/// What happened to one page of a run.
#[derive(Debug)]
pub enum PageEvent {
    Analyzed(PageAnalysis),
    Exported(ExportedPage),
    Previewed(PreviewImage),
    Skipped {
        page_number: u32,
        error: PrintreadyError,
    },
}

/// Build the export file name for `page_number`.
pub fn export_file_name(stem: &str, page_number: u32) -> String {
    format!("{stem}_page_{page_number:03}.jpg")
}

/// Render `page_number` at `spec` and classify it.
///
/// The low-resolution verdict uses the page's native size, not the size it
/// was rendered at.
pub fn analyze_page<S: PageSource + ?Sized>(
    source: &S,
    page_number: u32,
    spec: &RasterSpec,
) -> Result<PageAnalysis> {
    let rasterizer = Rasterizer::new(source);
    let geometry = rasterizer.geometry(page_number)?;
    let raster = rasterizer.rasterize_page(page_number, &geometry, spec)?;
    let (native_w, native_h) = geometry.native_pixels();
    let class = classify(raster.bitmap(), native_w, native_h);
    Ok(PageAnalysis {
        page_number,
        is_color: class.is_color,
        is_low_res: class.is_low_res,
        width_mm: geometry.width_mm(),
        height_mm: geometry.height_mm(),
    })
}

/// Render `page_number` at `spec`, encode it as JPEG and tag its density.
pub fn export_page<S: PageSource + ?Sized>(
    source: &S,
    page_number: u32,
    spec: &RasterSpec,
    jpeg_quality: u8,
    stem: &str,
) -> Result<ExportedPage> {
    let raster = Rasterizer::new(source).rasterize(page_number, spec)?;
    let (width_px, height_px) = (raster.width_px(), raster.height_px());
    let mut jpeg = ImageProcessor::from_rgba(raster.into_bitmap()).to_jpeg_bytes(jpeg_quality)?;
    if !inject_density_in_place(&mut jpeg, spec.dpi) {
        warn!(page_number, "Encoder wrote no JFIF header, density not tagged");
    }
    Ok(ExportedPage {
        page_number,
        file_name: export_file_name(stem, page_number),
        sha256: hash_bytes(&jpeg),
        jpeg,
        width_px,
        height_px,
        width_mm: units::pixels_to_mm(width_px, spec.dpi),
        height_mm: units::pixels_to_mm(height_px, spec.dpi),
        dpi: spec.dpi,
    })
}

// -- Lazy page run ------------------------------------------------------------

#[derive(Debug, Clone)]
enum RunMode {
    Analyze { spec: RasterSpec },
    Export { spec: RasterSpec, quality: u8, stem: String },
    Preview { width_px: u32 },
}

/// A lazy, in-order walk over a document's pages.
///
/// Each call to `next` processes exactly one page. Page-local failures come
/// back as [`PageEvent::Skipped`]; any other error is yielded once and ends
/// the run. A run cannot be rewound; start a new one to go again.
pub struct PageRun<'s, S: PageSource + ?Sized> {
    source: &'s S,
    mode: RunMode,
    next_page: u32,
    total: usize,
    completed: usize,
    cancel: CancelToken,
    cancelled: bool,
    finished: bool,
}

impl<'s, S: PageSource + ?Sized> PageRun<'s, S> {
    fn new(source: &'s S, mode: RunMode, cancel: CancelToken) -> Self {
        Self {
            source,
            mode,
            next_page: 1,
            total: source.page_count(),
            completed: 0,
            cancel,
            cancelled: false,
            finished: false,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed,
            total: self.total,
        }
    }

    /// Whether the run stopped early because its token was cancelled.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn nominal_pages(&self) -> usize {
        self.total
    }

    fn process(&self, page_number: u32) -> Result<PageEvent> {
        match &self.mode {
            RunMode::Analyze { spec } => {
                analyze_page(self.source, page_number, spec).map(PageEvent::Analyzed)
            }
            RunMode::Export {
                spec,
                quality,
                stem,
            } => export_page(self.source, page_number, spec, *quality, stem)
                .map(PageEvent::Exported),
            RunMode::Preview { width_px } => Rasterizer::new(self.source)
                .preview(page_number, *width_px)
                .map(PageEvent::Previewed),
        }
    }
}

impl<S: PageSource + ?Sized> Iterator for PageRun<'_, S> {
    type Item = Result<PageEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.next_page as usize > self.total {
            return None;
        }
        if self.cancel.is_cancelled() {
            info!(completed = self.completed, total = self.total, "Run cancelled");
            self.cancelled = true;
            self.finished = true;
            return None;
        }

        let page_number = self.next_page;
        self.next_page += 1;
        let event = match self.process(page_number) {
            Ok(event) => event,
            Err(error) if error.is_page_local() => {
                warn!(page_number, %error, "Skipping page");
                PageEvent::Skipped { page_number, error }
            }
            Err(error) => {
                self.finished = true;
                return Some(Err(error));
            }
        };
        self.completed += 1;
        Some(Ok(event))
    }
}

// -- Reports ------------------------------------------------------------------

/// Result of one analysis pass over a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub analyses: Vec<PageAnalysis>,
    pub stats: DocumentStats,
    pub skipped_pages: Vec<SkippedPage>,
    /// Page count reported by the source.
    pub nominal_pages: usize,
    pub cancelled: bool,
    pub generated_at: DateTime<Utc>,
}

/// Result of one export pass over a document.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub pages: Vec<ExportedPage>,
    pub skipped_pages: Vec<SkippedPage>,
    pub nominal_pages: usize,
    pub cancelled: bool,
}

// -- Pipeline -----------------------------------------------------------------

/// Runs analysis, export and preview passes with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Lazy analysis run. Invalid raster settings fail before any page renders.
    pub fn analyses<'s, S: PageSource + ?Sized>(
        &self,
        source: &'s S,
        cancel: CancelToken,
    ) -> Result<PageRun<'s, S>> {
        let spec = self.config.analysis_spec();
        spec.validate()?;
        Ok(PageRun::new(source, RunMode::Analyze { spec }, cancel))
    }

    /// Lazy export run producing `<stem>_page_<NNN>.jpg` pages.
    pub fn exports<'s, S: PageSource + ?Sized>(
        &self,
        source: &'s S,
        stem: &str,
        cancel: CancelToken,
    ) -> Result<PageRun<'s, S>> {
        let spec = self.config.export_spec();
        spec.validate()?;
        let mode = RunMode::Export {
            spec,
            quality: self.config.effective_jpeg_quality(),
            stem: stem.to_owned(),
        };
        Ok(PageRun::new(source, mode, cancel))
    }

    /// Lazy run of preview thumbnails.
    pub fn previews<'s, S: PageSource + ?Sized>(
        &self,
        source: &'s S,
        cancel: CancelToken,
    ) -> Result<PageRun<'s, S>> {
        if self.config.preview_width_px == 0 {
            return Err(PrintreadyError::InvalidRasterSpec(
                "preview width must be greater than zero".into(),
            ));
        }
        let mode = RunMode::Preview {
            width_px: self.config.preview_width_px,
        };
        Ok(PageRun::new(source, mode, cancel))
    }

    /// Classify every page and aggregate the document statistics.
    ///
    /// `on_progress` is called after each page, skipped pages included.
    #[instrument(skip_all, fields(pages = source.page_count()))]
    pub fn analyze<S: PageSource + ?Sized>(
        &self,
        source: &S,
        cancel: &CancelToken,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<DocumentReport> {
        let mut run = self.analyses(source, cancel.clone())?;
        let mut analyses = Vec::new();
        let mut skipped_pages = Vec::new();

        while let Some(event) = run.next() {
            match event? {
                PageEvent::Analyzed(analysis) => analyses.push(analysis),
                PageEvent::Skipped { page_number, error } => skipped_pages.push(SkippedPage {
                    page_number,
                    reason: error.to_string(),
                }),
                PageEvent::Exported(_) | PageEvent::Previewed(_) => {}
            }
            on_progress(run.progress());
        }

        let stats = aggregate(&analyses);
        info!(
            total = stats.total,
            color = stats.color_count,
            mono = stats.mono_count,
            skipped = skipped_pages.len(),
            "Document analysed"
        );
        Ok(DocumentReport {
            analyses,
            stats,
            skipped_pages,
            nominal_pages: run.nominal_pages(),
            cancelled: run.was_cancelled(),
            generated_at: Utc::now(),
        })
    }

    /// Export every page as a density-tagged JPEG.
    #[instrument(skip_all, fields(pages = source.page_count(), stem = %stem))]
    pub fn export<S: PageSource + ?Sized>(
        &self,
        source: &S,
        stem: &str,
        cancel: &CancelToken,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<ExportReport> {
        let mut run = self.exports(source, stem, cancel.clone())?;
        let mut pages = Vec::new();
        let mut skipped_pages = Vec::new();

        while let Some(event) = run.next() {
            match event? {
                PageEvent::Exported(page) => pages.push(page),
                PageEvent::Skipped { page_number, error } => skipped_pages.push(SkippedPage {
                    page_number,
                    reason: error.to_string(),
                }),
                PageEvent::Analyzed(_) | PageEvent::Previewed(_) => {}
            }
            on_progress(run.progress());
        }

        info!(
            exported = pages.len(),
            skipped = skipped_pages.len(),
            dpi = self.config.export_dpi,
            "Document exported"
        );
        Ok(ExportReport {
            pages,
            skipped_pages,
            nominal_pages: run.nominal_pages(),
            cancelled: run.was_cancelled(),
        })
    }
}
