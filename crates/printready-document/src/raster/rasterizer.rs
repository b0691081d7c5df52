// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterizer — turns one page of a `PageSource` into an opaque RGBA
// bitmap of exact integer dimensions for a requested resolution and size.

use image::RgbaImage;
use printready_core::error::{PrintreadyError, Result};
use printready_core::{PageGeometry, RasterSpec, units};
use tracing::{debug, instrument};

use crate::image::ImageProcessor;
use crate::source::PageSource;

/// Resolved output size for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSize {
    /// Pixels per point.
    pub render_scale: f64,
    pub width_px: u32,
    pub height_px: u32,
}

/// Resolve the render scale and floored pixel size of `page` under `spec`.
pub fn output_size(page: &PageGeometry, spec: &RasterSpec) -> OutputSize {
    let render_scale = spec.render_scale(page);
    let (width_px, height_px) = page.scaled_pixels(render_scale);
    OutputSize {
        render_scale,
        width_px,
        height_px,
    }
}

/// One rasterized page, owned by the caller until it is encoded or classified.
#[derive(Debug, Clone)]
pub struct RasterResult {
    page_number: u32,
    dpi: u16,
    render_scale: f64,
    bitmap: RgbaImage,
}

impl RasterResult {
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn dpi(&self) -> u16 {
        self.dpi
    }

    pub fn render_scale(&self) -> f64 {
        self.render_scale
    }

    pub fn width_px(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height_px(&self) -> u32 {
        self.bitmap.height()
    }

    /// Physical output width, one decimal.
    pub fn width_mm(&self) -> f64 {
        units::pixels_to_mm(self.width_px(), self.dpi)
    }

    /// Physical output height, one decimal.
    pub fn height_mm(&self) -> f64 {
        units::pixels_to_mm(self.height_px(), self.dpi)
    }

    /// The opaque RGBA bitmap.
    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> RgbaImage {
        self.bitmap
    }
}

/// A low-resolution thumbnail of a page.
///
/// Previews are a separate type so they cannot be handed to the export path
/// and end up density-tagged as print output.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    page_number: u32,
    bitmap: RgbaImage,
}

impl PreviewImage {
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn width_px(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height_px(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// Encode the thumbnail as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        ImageProcessor::from_rgba(self.bitmap.clone()).to_png_bytes()
    }
}

/// Rasterizes pages of a borrowed [`PageSource`].
pub struct Rasterizer<'s, S: PageSource + ?Sized> {
    source: &'s S,
}

impl<'s, S: PageSource + ?Sized> Rasterizer<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    /// Geometry of `page_number` as reported by the source.
    ///
    /// A page with an unusable size cannot be rendered, so it fails as that
    /// page's render error instead of failing the document.
    pub fn geometry(&self, page_number: u32) -> Result<PageGeometry> {
        self.source
            .geometry(page_number)
            .map_err(|error| match error {
                PrintreadyError::InvalidGeometry(reason) => PrintreadyError::Render {
                    page: page_number,
                    reason,
                },
                other => other,
            })
    }

    /// Rasterize `page_number`, reading its geometry from the source.
    pub fn rasterize(&self, page_number: u32, spec: &RasterSpec) -> Result<RasterResult> {
        let geometry = self.geometry(page_number)?;
        self.rasterize_page(page_number, &geometry, spec)
    }

    /// Rasterize `page_number` with already-known geometry.
    ///
    /// Output dimensions are `floor(width_pt * scale)` x `floor(height_pt *
    /// scale)`, so the bitmap never exceeds the requested footprint.
    #[instrument(
        skip(self, geometry),
        fields(dpi = spec.dpi, target_width_mm = ?spec.target_width_mm)
    )]
    pub fn rasterize_page(
        &self,
        page_number: u32,
        geometry: &PageGeometry,
        spec: &RasterSpec,
    ) -> Result<RasterResult> {
        spec.validate()?;
        let size = output_size(geometry, spec);
        let bitmap = self.render_opaque(page_number, size.width_px, size.height_px)?;

        debug!(
            page_number,
            width_px = size.width_px,
            height_px = size.height_px,
            render_scale = size.render_scale,
            "Page rasterized"
        );

        Ok(RasterResult {
            page_number,
            dpi: spec.dpi,
            render_scale: size.render_scale,
            bitmap,
        })
    }

    /// Render a thumbnail `width_px` pixels wide, height following the page's
    /// aspect ratio.
    #[instrument(skip(self))]
    pub fn preview(&self, page_number: u32, width_px: u32) -> Result<PreviewImage> {
        if width_px == 0 {
            return Err(PrintreadyError::InvalidRasterSpec(
                "preview width must be greater than zero".into(),
            ));
        }
        let geometry = self.geometry(page_number)?;
        let scale = f64::from(width_px) / geometry.width_pt();
        let (w, h) = geometry.scaled_pixels(scale);
        let bitmap = self.render_opaque(page_number, w, h)?;
        debug!(page_number, width_px = w, height_px = h, "Preview rendered");
        Ok(PreviewImage {
            page_number,
            bitmap,
        })
    }

    /// Render into a white, fully opaque bitmap of exactly `width` x `height`.
    fn render_opaque(&self, page_number: u32, width: u32, height: u32) -> Result<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(PrintreadyError::Render {
                page: page_number,
                reason: format!("output size {width}x{height} px is empty"),
            });
        }
        let content = self.source.render_rgba(page_number, width, height)?;
        if content.dimensions() != (width, height) {
            return Err(PrintreadyError::Render {
                page: page_number,
                reason: format!(
                    "renderer returned {}x{} px, expected {width}x{height} px",
                    content.width(),
                    content.height()
                ),
            });
        }
        Ok(ImageProcessor::from_rgba(content)
            .flatten_onto_white()
            .into_rgba())
    }
}
