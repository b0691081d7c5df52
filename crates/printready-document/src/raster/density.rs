// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JFIF density tagging.
//
// Patches the APP0/JFIF segment of an encoded JPEG so RIPs, printers and
// previewers read the intended dots-per-inch instead of assuming 72 or 96.
// Pixel data is never touched and the byte length never changes.
//
// APP0 layout from the start of the file:
//
//   0  FF D8        start of image
//   2  FF E0        APP0 marker
//   4  len (2)      segment length
//   6  "JFIF\0"     identifier
//  11  ver (2)      version
//  13  units        0 = aspect ratio, 1 = dots per inch, 2 = dots per cm
//  14  Xdensity     big-endian u16
//  16  Ydensity     big-endian u16

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Start-of-image marker immediately followed by an APP0 marker.
pub const JFIF_SIGNATURE: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

const UNITS_OFFSET: usize = 13;
const X_DENSITY_OFFSET: usize = 14;
const Y_DENSITY_OFFSET: usize = 16;
/// Smallest buffer that contains both density fields.
const MIN_PATCHABLE_LEN: usize = Y_DENSITY_OFFSET + 2;

/// Density-units byte meaning "dots per inch".
pub const UNITS_DOTS_PER_INCH: u8 = 1;

/// Density declared in a JFIF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JfifDensity {
    pub units: u8,
    pub x: u16,
    pub y: u16,
}

impl JfifDensity {
    /// The declared density as DPI, if the units are dots per inch and the
    /// image is isotropic.
    pub fn dpi(&self) -> Option<u16> {
        (self.units == UNITS_DOTS_PER_INCH && self.x == self.y).then_some(self.x)
    }
}

/// Whether `bytes` starts with SOI + APP0 and is long enough to patch.
pub fn has_jfif_header(bytes: &[u8]) -> bool {
    bytes.len() >= MIN_PATCHABLE_LEN && bytes.starts_with(&JFIF_SIGNATURE)
}

/// Return a copy of `bytes` with its JFIF density set to `dpi` in both axes.
///
/// Input that does not start with the SOI + APP0 signature is returned
/// unchanged. That is not an error: encoders that omit APP0 simply do not get
/// a density tag.
#[instrument(skip(bytes), fields(bytes_len = bytes.len()))]
pub fn inject_density(bytes: &[u8], dpi: u16) -> Vec<u8> {
    let mut out = bytes.to_vec();
    inject_density_in_place(&mut out, dpi);
    out
}

/// Patch the density fields of `bytes` in place.
///
/// Returns `true` when the buffer was patched and `false` when it was left
/// untouched because the signature is absent.
pub fn inject_density_in_place(bytes: &mut [u8], dpi: u16) -> bool {
    if !has_jfif_header(bytes) {
        debug!(len = bytes.len(), "No JFIF APP0 header, density left untouched");
        return false;
    }
    let density = dpi.to_be_bytes();
    bytes[UNITS_OFFSET] = UNITS_DOTS_PER_INCH;
    bytes[X_DENSITY_OFFSET..X_DENSITY_OFFSET + 2].copy_from_slice(&density);
    bytes[Y_DENSITY_OFFSET..Y_DENSITY_OFFSET + 2].copy_from_slice(&density);
    debug!(dpi, "JFIF density patched");
    true
}

/// Read the density declared in a JFIF header, if there is one.
pub fn read_density(bytes: &[u8]) -> Option<JfifDensity> {
    if !has_jfif_header(bytes) {
        return None;
    }
    let field = |offset: usize| u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
    Some(JfifDensity {
        units: bytes[UNITS_OFFSET],
        x: field(X_DENSITY_OFFSET),
        y: field(Y_DENSITY_OFFSET),
    })
}
