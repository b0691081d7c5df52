// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — page geometry inspection and (optionally) PDFium rendering.

pub mod reader;

#[cfg(feature = "pdfium")]
pub mod pdfium;

pub use reader::{PageBoxes, PageInfo, PdfRect, PdfReader};

#[cfg(feature = "pdfium")]
pub use pdfium::{PdfiumSource, bind_pdfium};
