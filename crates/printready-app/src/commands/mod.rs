// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command handlers — one module per `printready` subcommand.

pub mod analyze;
pub mod export;
pub mod inspect;
pub mod preview;
pub mod quote;

use printready_document::Progress;
use tracing::debug;

/// Progress observer shared by the rendering commands.
pub fn log_progress(progress: Progress) {
    debug!(
        completed = progress.completed,
        total = progress.total,
        fraction = progress.fraction(),
        "progress"
    );
}

/// `"1, 3, 4"`, or `"-"` for none.
pub fn page_list(pages: &[u32]) -> String {
    if pages.is_empty() {
        return "-".into();
    }
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// A blank in-memory document for command tests.
#[cfg(test)]
pub(crate) mod test_support {
    use image::{Rgba, RgbaImage};
    use printready_core::PageGeometry;
    use printready_core::error::{PrintreadyError, Result};
    use printready_document::PageSource;

    /// `pages` white pages of `width_pt` x `height_pt`; page `broken` fails
    /// to render.
    pub struct BlankDocument {
        pub pages: usize,
        pub width_pt: f64,
        pub height_pt: f64,
        pub broken: Option<u32>,
    }

    impl PageSource for BlankDocument {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn geometry(&self, _page_number: u32) -> Result<PageGeometry> {
            PageGeometry::new(self.width_pt, self.height_pt)
        }

        fn render_rgba(
            &self,
            page_number: u32,
            width_px: u32,
            height_px: u32,
        ) -> Result<RgbaImage> {
            if self.broken == Some(page_number) {
                return Err(PrintreadyError::Render {
                    page: page_number,
                    reason: "broken page".into(),
                });
            }
            Ok(RgbaImage::from_pixel(width_px, height_px, Rgba([255, 255, 255, 255])))
        }
    }
}
