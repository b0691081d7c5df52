// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page classifier — colour/greyscale verdict and low-resolution risk.
//
// The colour test is statistical, not an exact colour-plane analysis: it
// samples every fourth pixel and flags the page as colour as soon as one
// sample's channels diverge by more than the noise threshold. The stride and
// threshold are empirical and must stay as they are.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Pixels skipped between colour samples (every 4th pixel is inspected).
pub const SAMPLE_STRIDE_PX: usize = 4;

/// Maximum |R-G| or |G-B| tolerated as JPEG or anti-aliasing noise.
pub const CHANNEL_DELTA_THRESHOLD: u8 = 18;

/// Native (one pixel per point) size below which a page is a print risk.
pub const LOW_RES_FLOOR_PX: u32 = 300;

const BYTES_PER_PIXEL: usize = 4;

/// Verdict for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageClass {
    pub is_color: bool,
    pub is_low_res: bool,
}

/// Classify a rendered page.
///
/// `native_width_px` and `native_height_px` are the page's size at scale 1,
/// independent of the resolution `bitmap` was rendered at.
pub fn classify(bitmap: &RgbaImage, native_width_px: u32, native_height_px: u32) -> PageClass {
    PageClass {
        is_color: has_color(bitmap.as_raw()),
        is_low_res: is_low_res(native_width_px, native_height_px),
    }
}

/// Scan an RGBA buffer in raster order; `true` on the first sample whose
/// channels differ by more than [`CHANNEL_DELTA_THRESHOLD`].
pub fn has_color(rgba: &[u8]) -> bool {
    rgba.chunks_exact(BYTES_PER_PIXEL)
        .step_by(SAMPLE_STRIDE_PX)
        .any(|px| {
            px[0].abs_diff(px[1]) > CHANNEL_DELTA_THRESHOLD
                || px[1].abs_diff(px[2]) > CHANNEL_DELTA_THRESHOLD
        })
}

/// Either native axis below [`LOW_RES_FLOOR_PX`].
pub fn is_low_res(native_width_px: u32, native_height_px: u32) -> bool {
    native_width_px < LOW_RES_FLOOR_PX || native_height_px < LOW_RES_FLOOR_PX
}
