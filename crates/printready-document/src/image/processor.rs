// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — background flattening and JPEG/PNG encoding of rendered
// pages. Operates on in-memory images using the `image` crate.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use printready_core::error::PrintreadyError;
use tracing::{debug, instrument};

/// Image processing pipeline operating on a single in-memory page bitmap.
///
/// Transformations consume `self` and return a new `ImageProcessor`, enabling
/// method chaining.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_rgba(bitmap)
///     .flatten_onto_white()
///     .to_jpeg_bytes(92)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: RgbaImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap an RGBA bitmap.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Consume the processor and return the underlying bitmap.
    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Composite the image over an opaque white page.
    ///
    /// Every output pixel has alpha 255. Print JPEGs carry no alpha channel,
    /// so transparent page backgrounds must become paper white rather than
    /// the black an encoder would otherwise produce.
    #[instrument(skip(self), fields(width = self.image.width(), height = self.image.height()))]
    pub fn flatten_onto_white(self) -> Self {
        let mut page = RgbaImage::from_pixel(
            self.image.width(),
            self.image.height(),
            Rgba([255, 255, 255, 255]),
        );
        for (dst, src) in page.pixels_mut().zip(self.image.pixels()) {
            let Rgba([r, g, b, a]) = *src;
            let blend = |channel: u8| -> u8 {
                let alpha = u32::from(a);
                let value = u32::from(channel) * alpha + 255 * (255 - alpha);
                ((value + 127) / 255) as u8
            };
            *dst = Rgba([blend(r), blend(g), blend(b), 255]);
        }
        Self { image: page }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PrintreadyError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| PrintreadyError::Encode(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Encode the current image as baseline JPEG bytes with the given quality
    /// (1-100). The alpha channel is dropped.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, PrintreadyError> {
        let mut buffer = Vec::new();
        let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder).map_err(|err| {
            PrintreadyError::Encode(format!("JPEG encoding failed: {}", err))
        })?;
        debug!(bytes = buffer.len(), quality, "JPEG encoded");
        Ok(buffer)
    }
}
