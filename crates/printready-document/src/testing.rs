// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test helpers: an in-memory page source with scripted page sizes, fills and
// failures.

use std::cell::Cell;

use image::{Rgba, RgbaImage};
use printready_core::PageGeometry;
use printready_core::error::{PrintreadyError, Result};

use crate::source::PageSource;

#[derive(Debug, Clone)]
pub(crate) struct FakePage {
    pub width_pt: f64,
    pub height_pt: f64,
    pub fill: Rgba<u8>,
    /// Painted over pixel (0, 0), which every sampling pass visits.
    pub spot: Option<Rgba<u8>>,
    pub fail_render: bool,
    pub wrong_size: bool,
}

impl FakePage {
    pub fn new(width_pt: f64, height_pt: f64, fill: Rgba<u8>) -> Self {
        Self {
            width_pt,
            height_pt,
            fill,
            spot: None,
            fail_render: false,
            wrong_size: false,
        }
    }

    pub fn with_spot(mut self, spot: Rgba<u8>) -> Self {
        self.spot = Some(spot);
        self
    }
}

/// A [`PageSource`] that paints each page with a flat fill.
pub(crate) struct FakeSource {
    pages: Vec<FakePage>,
    render_calls: Cell<usize>,
}

impl FakeSource {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            render_calls: Cell::new(0),
        }
    }

    /// `count` identical pages.
    pub fn uniform(count: usize, width_pt: f64, height_pt: f64, fill: Rgba<u8>) -> Self {
        Self::new(vec![FakePage::new(width_pt, height_pt, fill); count])
    }

    /// Make rendering of the given 1-based pages fail.
    pub fn failing_on(mut self, page_numbers: &[u32]) -> Self {
        for &number in page_numbers {
            self.pages[number as usize - 1].fail_render = true;
        }
        self
    }

    /// Make the given page come back one pixel too narrow.
    pub fn with_size_error(mut self, page_number: u32) -> Self {
        self.pages[page_number as usize - 1].wrong_size = true;
        self
    }

    pub fn render_calls(&self) -> usize {
        self.render_calls.get()
    }

    fn page(&self, page_number: u32) -> Result<&FakePage> {
        let index = (page_number as usize)
            .checked_sub(1)
            .filter(|i| *i < self.pages.len());
        index
            .map(|i| &self.pages[i])
            .ok_or(PrintreadyError::PageOutOfRange {
                page: page_number,
                count: self.pages.len(),
            })
    }
}

impl PageSource for FakeSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn geometry(&self, page_number: u32) -> Result<PageGeometry> {
        let page = self.page(page_number)?;
        PageGeometry::new(page.width_pt, page.height_pt)
    }

    fn render_rgba(&self, page_number: u32, width_px: u32, height_px: u32) -> Result<RgbaImage> {
        self.render_calls.set(self.render_calls.get() + 1);
        let page = self.page(page_number)?;
        if page.fail_render {
            return Err(PrintreadyError::Render {
                page: page_number,
                reason: "scripted failure".into(),
            });
        }
        let width = if page.wrong_size {
            width_px.saturating_sub(1)
        } else {
            width_px
        };
        let mut bitmap = RgbaImage::from_pixel(width, height_px, page.fill);
        if let Some(spot) = page.spot {
            if width > 0 && height_px > 0 {
                bitmap.put_pixel(0, 0, spot);
            }
        }
        Ok(bitmap)
    }
}
