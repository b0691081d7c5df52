// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Printready engine.

use serde::{Deserialize, Serialize};

use crate::error::{PrintreadyError, Result};
use crate::units;

/// Physical size of one page in PDF points (72 per inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    width_pt: f64,
    height_pt: f64,
}

impl PageGeometry {
    /// Create a geometry; both sides must be finite and strictly positive.
    pub fn new(width_pt: f64, height_pt: f64) -> Result<Self> {
        if !(width_pt.is_finite() && width_pt > 0.0 && height_pt.is_finite() && height_pt > 0.0) {
            return Err(PrintreadyError::InvalidGeometry(format!(
                "page size must be positive, got {width_pt} x {height_pt} pt"
            )));
        }
        Ok(Self {
            width_pt,
            height_pt,
        })
    }

    pub fn width_pt(&self) -> f64 {
        self.width_pt
    }

    pub fn height_pt(&self) -> f64 {
        self.height_pt
    }

    /// Width in millimetres, one decimal.
    pub fn width_mm(&self) -> f64 {
        units::points_to_mm(self.width_pt)
    }

    /// Height in millimetres, one decimal.
    pub fn height_mm(&self) -> f64 {
        units::points_to_mm(self.height_pt)
    }

    /// Pixel dimensions of the page at scale 1 (one pixel per point).
    pub fn native_pixels(&self) -> (u32, u32) {
        (
            units::floor_px(self.width_pt, 1.0),
            units::floor_px(self.height_pt, 1.0),
        )
    }

    /// Pixel dimensions at an arbitrary scale, floored.
    pub fn scaled_pixels(&self, scale: f64) -> (u32, u32) {
        (
            units::floor_px(self.width_pt, scale),
            units::floor_px(self.height_pt, scale),
        )
    }

    /// `"W x H mm"` label used for reports.
    pub fn size_label(&self) -> String {
        format!("{:.1} x {:.1} mm", self.width_mm(), self.height_mm())
    }
}

/// How a page should be rasterized.
///
/// With `target_width_mm` unset the page keeps its native physical size and
/// is rendered at `dpi / 72`. With it set, the page is scaled so its pixel
/// width equals `target_width_mm` at `dpi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterSpec {
    pub dpi: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_width_mm: Option<f64>,
}

impl RasterSpec {
    /// Render at the page's native physical size.
    pub fn native(dpi: u16) -> Self {
        Self {
            dpi,
            target_width_mm: None,
        }
    }

    /// Render scaled to a physical output width.
    pub fn fit_width(dpi: u16, target_width_mm: f64) -> Self {
        Self {
            dpi,
            target_width_mm: Some(target_width_mm),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(PrintreadyError::InvalidRasterSpec(
                "dpi must be greater than zero".into(),
            ));
        }
        match self.target_width_mm {
            Some(mm) if !(mm.is_finite() && mm > 0.0) => Err(PrintreadyError::InvalidRasterSpec(
                format!("target width must be a positive length, got {mm} mm"),
            )),
            _ => Ok(()),
        }
    }

    /// Scale factor (pixels per point) for `page`.
    pub fn render_scale(&self, page: &PageGeometry) -> f64 {
        match self.target_width_mm {
            Some(mm) if mm > 0.0 => {
                units::scale_to_fit(page.width_pt(), units::mm_to_pixels(mm, self.dpi))
            }
            _ => units::dpi_to_scale(self.dpi),
        }
    }
}

/// Classification of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// 1-based, in document order.
    pub page_number: u32,
    pub is_color: bool,
    pub is_low_res: bool,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Document-level print-readiness summary derived from [`PageAnalysis`] values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total: usize,
    pub color_count: usize,
    pub mono_count: usize,
    pub color_pages: Vec<u32>,
    pub mono_pages: Vec<u32>,
    /// Spine thickness estimate, in paper-thickness units.
    pub spine: f64,
    /// Page 1's size label; `None` for an empty document.
    pub main_size: Option<String>,
    /// Page 1 is wider than A4 by no more than 10 mm.
    pub is_bleed: bool,
    pub has_low_res: bool,
}

impl DocumentStats {
    /// The figures the pricing flow consumes.
    pub fn handoff(&self) -> PrintHandoff {
        PrintHandoff {
            total_pages: self.total,
            color_count: self.color_count,
            bw_count: self.mono_count,
            spine: self.spine,
        }
    }
}

/// Totals handed from analysis to pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintHandoff {
    pub total_pages: usize,
    pub color_count: usize,
    pub bw_count: usize,
    pub spine: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> PageGeometry {
        PageGeometry::new(595.0, 842.0).unwrap()
    }

    #[test]
    fn geometry_rejects_non_positive_sides() {
        assert!(PageGeometry::new(0.0, 842.0).is_err());
        assert!(PageGeometry::new(595.0, -1.0).is_err());
        assert!(PageGeometry::new(f64::INFINITY, 842.0).is_err());
    }

    #[test]
    fn geometry_millimetres_and_label() {
        let page = a4();
        assert_eq!(page.width_mm(), 209.9);
        assert_eq!(page.height_mm(), 297.0);
        assert_eq!(page.size_label(), "209.9 x 297.0 mm");
        assert_eq!(page.native_pixels(), (595, 842));
    }

    #[test]
    fn native_scale_is_dpi_over_72() {
        let scale = RasterSpec::native(300).render_scale(&a4());
        assert!((scale - 300.0 / 72.0).abs() < 1e-12);
        assert_eq!(a4().scaled_pixels(scale), (2479, 3508));
    }

    #[test]
    fn fit_width_scale_targets_pixel_width() {
        let spec = RasterSpec::fit_width(300, 100.0);
        let scale = spec.render_scale(&a4());
        let expected = (100.0 / 25.4 * 300.0) / 595.0;
        assert!((scale - expected).abs() < 1e-12);
        // 100 mm at 300 dpi is 1181.1 px; floor keeps it at 1181.
        assert_eq!(a4().scaled_pixels(scale).0, 1181);
    }

    #[test]
    fn fit_width_keeps_whole_pixel_target() {
        // 50.8 mm at 72 dpi is exactly 144 px; 144 / 259.5 * 259.5 is not.
        let page = PageGeometry::new(259.5, 400.0).unwrap();
        let scale = RasterSpec::fit_width(72, 50.8).render_scale(&page);
        assert_eq!(page.scaled_pixels(scale).0, 144);
        assert_eq!(page.scaled_pixels(scale).0, (259.5 * scale).floor() as u32);
    }

    #[test]
    fn validate_rejects_bad_requests() {
        assert!(RasterSpec::native(0).validate().is_err());
        assert!(RasterSpec::fit_width(300, 0.0).validate().is_err());
        assert!(RasterSpec::fit_width(300, -10.0).validate().is_err());
        assert!(RasterSpec::fit_width(300, f64::NAN).validate().is_err());
        assert!(RasterSpec::fit_width(300, 210.0).validate().is_ok());
        assert!(RasterSpec::native(150).validate().is_ok());
    }

    #[test]
    fn spec_serializes_without_absent_target() {
        let json = serde_json::to_string(&RasterSpec::native(600)).unwrap();
        assert_eq!(json, r#"{"dpi":600}"#);
        let back: RasterSpec =
            serde_json::from_str(r#"{"dpi":150,"target_width_mm":148.0}"#).unwrap();
        assert_eq!(back, RasterSpec::fit_width(150, 148.0));
    }

    #[test]
    fn handoff_mirrors_stats() {
        let stats = DocumentStats {
            total: 4,
            color_count: 1,
            mono_count: 3,
            spine: 0.2,
            ..Default::default()
        };
        let handoff = stats.handoff();
        assert_eq!(handoff.total_pages, 4);
        assert_eq!(handoff.color_count, 1);
        assert_eq!(handoff.bw_count, 3);
        assert_eq!(handoff.spine, 0.2);
    }
}
