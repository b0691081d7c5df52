// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Printready.

use thiserror::Error;

/// Top-level error type for all Printready operations.
#[derive(Debug, Error)]
pub enum PrintreadyError {
    // -- Document errors --
    /// The document cannot be opened at all. Fatal for the whole run.
    #[error("cannot open document: {0}")]
    Decode(String),

    /// A single page could not be rasterized. The pipeline skips the page.
    #[error("page {page} could not be rendered: {reason}")]
    Render { page: u32, reason: String },

    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: usize },

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid raster request: {0}")]
    InvalidRasterSpec(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    // -- Pricing errors --
    #[error("invalid pricing configuration: {0}")]
    InvalidPricing(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PrintreadyError {
    /// Whether this error only affects one page and the document run may
    /// continue with the next page.
    pub fn is_page_local(&self) -> bool {
        matches!(self, Self::Render { .. } | Self::Encode(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PrintreadyError>;
