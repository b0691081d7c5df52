// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Opening a document for rendering.

use std::path::Path;

use printready_core::error::Result;
use printready_document::PageSource;

/// Open `path` with the PDFium backend and hand the page source to `f`.
///
/// The PDFium binding and the file bytes live only for the duration of the
/// call.
#[cfg(feature = "pdfium")]
pub fn with_page_source<T>(
    path: &Path,
    f: impl FnOnce(&dyn PageSource) -> Result<T>,
) -> Result<T> {
    use printready_document::{PdfiumSource, bind_pdfium};

    let bytes = std::fs::read(path)?;
    let pdfium = bind_pdfium()?;
    let source = PdfiumSource::from_bytes(&pdfium, &bytes)?;
    tracing::info!(path = %path.display(), pages = source.page_count(), "document opened");
    f(&source)
}

/// Without a renderer the file is still parsed, so a damaged PDF is reported
/// as such rather than as a missing backend.
#[cfg(not(feature = "pdfium"))]
pub fn with_page_source<T>(
    path: &Path,
    _f: impl FnOnce(&dyn PageSource) -> Result<T>,
) -> Result<T> {
    use printready_core::PrintreadyError;
    use printready_document::PdfReader;

    PdfReader::open(path)?;
    Err(PrintreadyError::BackendUnavailable(
        "this build has no page renderer; rebuild with the `pdfium` feature".into(),
    ))
}

/// File stem used to name exported pages.
pub fn output_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("page")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_from_file_name() {
        assert_eq!(output_stem(Path::new("/jobs/flyer.pdf")), "flyer");
        assert_eq!(output_stem(Path::new("brochure.v2.pdf")), "brochure.v2");
        assert_eq!(output_stem(Path::new("/")), "page");
    }

    #[cfg(not(feature = "pdfium"))]
    #[test]
    fn damaged_file_is_a_decode_failure_without_renderer() {
        use printready_core::PrintreadyError;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();
        let result = with_page_source(&path, |source| Ok(source.page_count()));
        assert!(matches!(result, Err(PrintreadyError::Decode(_))));
    }
}
