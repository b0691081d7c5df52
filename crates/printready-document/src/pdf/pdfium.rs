// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDFium rendering backend (feature "pdfium").
//
// PDFium is loaded dynamically at runtime: first from the working directory,
// then from the system library path.

use image::RgbaImage;
use pdfium_render::prelude::*;
use printready_core::PageGeometry;
use printready_core::error::{PrintreadyError, Result};
use tracing::{debug, info, instrument};

use crate::source::PageSource;

/// Bind to the PDFium shared library.
pub fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|err| PrintreadyError::BackendUnavailable(format!("cannot load PDFium: {err}")))?;
    info!("PDFium bound");
    Ok(Pdfium::new(bindings))
}

/// A PDF document rendered through PDFium.
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumSource<'a> {
    /// Load a document from bytes. Failure to open is a decode failure.
    #[instrument(skip_all, fields(bytes_len = bytes.len()))]
    pub fn from_bytes(pdfium: &'a Pdfium, bytes: &'a [u8]) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|err| {
                PrintreadyError::Decode(format!("PDFium rejected the document: {err}"))
            })?;
        debug!(pages = document.pages().len(), "PDF loaded into PDFium");
        Ok(Self { document })
    }

    fn page(&self, page_number: u32) -> Result<PdfPage<'a>> {
        let count = self.page_count();
        if page_number == 0 || page_number as usize > count {
            return Err(PrintreadyError::PageOutOfRange {
                page: page_number,
                count,
            });
        }
        let index = PdfPageIndex::try_from(page_number - 1).map_err(|_| {
            PrintreadyError::PageOutOfRange {
                page: page_number,
                count,
            }
        })?;
        self.document
            .pages()
            .get(index)
            .map_err(|err| PrintreadyError::Render {
                page: page_number,
                reason: err.to_string(),
            })
    }
}

impl PageSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn geometry(&self, page_number: u32) -> Result<PageGeometry> {
        let page = self.page(page_number)?;
        PageGeometry::new(f64::from(page.width().value), f64::from(page.height().value))
    }

    fn render_rgba(&self, page_number: u32, width_px: u32, height_px: u32) -> Result<RgbaImage> {
        let render_err = |reason: String| PrintreadyError::Render {
            page: page_number,
            reason,
        };
        let page = self.page(page_number)?;
        let width = i32::try_from(width_px).map_err(|_| render_err("width too large".into()))?;
        let height = i32::try_from(height_px).map_err(|_| render_err("height too large".into()))?;

        let config = PdfRenderConfig::new().set_target_size(width, height);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|err| render_err(err.to_string()))?;

        let (w, h) = (bitmap.width() as u32, bitmap.height() as u32);
        RgbaImage::from_raw(w, h, bitmap.as_rgba_bytes())
            .ok_or_else(|| render_err(format!("PDFium returned a short {w}x{h} buffer")))
    }
}
