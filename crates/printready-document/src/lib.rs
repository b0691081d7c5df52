// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// printready-document — Page rendering and preflight for Printready.
//
// Provides PDF page inspection (boxes, rotation, physical size), page
// rasterization at a physical resolution, JFIF density tagging, colour and
// resolution classification, document statistics, and the sequential
// page pipeline that ties them together.

pub mod analysis;
pub mod fingerprint;
pub mod image;
pub mod pdf;
pub mod pipeline;
pub mod raster;
pub mod source;

#[cfg(test)]
mod testing;

// Re-export the primary items so callers can use `printready_document::Pipeline` etc.
pub use analysis::{aggregate, classify};
pub use crate::image::processor::ImageProcessor;
pub use pdf::reader::PdfReader;
pub use pipeline::{
    CancelToken, DocumentReport, ExportReport, ExportedPage, PageEvent, PageRun, Pipeline,
    Progress, SkippedPage,
};
pub use raster::{PreviewImage, RasterResult, Rasterizer, inject_density};
pub use source::PageSource;

#[cfg(feature = "pdfium")]
pub use pdf::pdfium::{PdfiumSource, bind_pdfium};
