// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — page rasterization at a physical scale, preview thumbnails,
// and JFIF density tagging of encoded output.

pub mod density;
pub mod rasterizer;

pub use density::{JfifDensity, inject_density, inject_density_in_place, read_density};
pub use rasterizer::{OutputSize, PreviewImage, RasterResult, Rasterizer, output_size};
