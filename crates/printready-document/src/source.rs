// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page source abstraction — the document handle the engine renders from.
//
// The engine never parses page content itself. A source reports how many
// pages it has, how large each page is, and renders a page into an RGBA
// bitmap of a requested pixel size. Rendering backends (PDFium, test fakes)
// implement this trait.

use image::RgbaImage;
use printready_core::PageGeometry;
use printready_core::error::Result;

/// A loaded, decodable document.
///
/// Page numbers are 1-based throughout.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Physical size of `page_number`, after page rotation.
    fn geometry(&self, page_number: u32) -> Result<PageGeometry>;

    /// Render `page_number` so that it exactly fills `width_px` x `height_px`.
    ///
    /// The returned bitmap may contain transparent pixels; callers composite
    /// it over an opaque background. Failures are reported as
    /// `PrintreadyError::Render` and affect only this page.
    fn render_rgba(&self, page_number: u32, width_px: u32, height_px: u32) -> Result<RgbaImage>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn geometry(&self, page_number: u32) -> Result<PageGeometry> {
        (**self).geometry(page_number)
    }

    fn render_rgba(&self, page_number: u32, width_px: u32, height_px: u32) -> Result<RgbaImage> {
        (**self).render_rgba(page_number, width_px, height_px)
    }
}
