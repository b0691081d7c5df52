// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people preparing print jobs.
//
// Every technical error is mapped to plain English with a clear suggestion,
// so host applications can show something better than a parser message.

use crate::error::PrintreadyError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// One page was affected; the rest of the document was processed.
    PageSkipped,
    /// User must do something (choose another file, fix a setting).
    ActionRequired,
    /// Cannot be fixed by retrying or changing settings.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in the host UI).
    pub severity: Severity,
}

/// Convert a `PrintreadyError` into a `HumanError`.
pub fn humanize_error(err: &PrintreadyError) -> HumanError {
    match err {
        // -- Document errors --
        PrintreadyError::Decode(_) => HumanError {
            message: "We can't process this file.".into(),
            suggestion: "The PDF may be damaged, encrypted or not a PDF at all. Try exporting it again from the program that created it.".into(),
            severity: Severity::Permanent,
        },

        PrintreadyError::Render { page, .. } => HumanError {
            message: format!("Page {page} couldn't be rendered."),
            suggestion: "The other pages were processed. Check this page in a PDF viewer; it may use features the renderer doesn't support.".into(),
            severity: Severity::PageSkipped,
        },

        PrintreadyError::Encode(_) => HumanError {
            message: "An exported image couldn't be written.".into(),
            suggestion: "Try a lower resolution. Very large pages at high DPI can exceed what the image encoder accepts.".into(),
            severity: Severity::PageSkipped,
        },

        PrintreadyError::PageOutOfRange { page, count } => HumanError {
            message: format!("There is no page {page}."),
            suggestion: format!("This document has {count} pages."),
            severity: Severity::ActionRequired,
        },

        PrintreadyError::InvalidGeometry(_) => HumanError {
            message: "A page in this file has no usable size.".into(),
            suggestion: "The page box is empty or broken. Re-export the PDF with a standard page size.".into(),
            severity: Severity::Permanent,
        },

        PrintreadyError::InvalidRasterSpec(detail) => HumanError {
            message: "The output size or resolution isn't valid.".into(),
            suggestion: format!("Choose a positive width and a resolution such as 150, 300 or 600 DPI. ({detail})"),
            severity: Severity::ActionRequired,
        },

        PrintreadyError::BackendUnavailable(_) => HumanError {
            message: "Page rendering isn't available in this build.".into(),
            suggestion: "Install the PDFium library, or use a build with PDF rendering enabled.".into(),
            severity: Severity::Permanent,
        },

        // -- Pricing --
        PrintreadyError::InvalidPricing(detail) => HumanError {
            message: "The price list has a mistake in it.".into(),
            suggestion: format!("Open the price settings and correct it. ({detail})"),
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        PrintreadyError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or copy the file to a different location first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    severity: Severity::ActionRequired,
                }
            }
        }

        PrintreadyError::Serialization(_) => HumanError {
            message: "A settings file couldn't be read.".into(),
            suggestion: "The file is not valid JSON. Restore it from a backup or delete it to use the defaults.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
