// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Physical unit conversions.
//
// Every component converts through these functions so the rasterizer and the
// aggregator report identical millimetre values for the same page.

/// PDF user-space units per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Round to one decimal place, half away from zero.
///
/// This is the display rounding applied to every millimetre value.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert points to millimetres, unrounded.
pub fn points_to_mm_exact(points: f64) -> f64 {
    points / POINTS_PER_INCH * MM_PER_INCH
}

/// Convert points to millimetres, rounded to one decimal.
pub fn points_to_mm(points: f64) -> f64 {
    round_to_tenth(points_to_mm_exact(points))
}

/// Convert millimetres to a (fractional) pixel count at `dpi`.
pub fn mm_to_pixels(mm: f64, dpi: u16) -> f64 {
    mm / MM_PER_INCH * f64::from(dpi)
}

/// Convert a pixel count at `dpi` to millimetres, rounded to one decimal.
pub fn pixels_to_mm(pixels: u32, dpi: u16) -> f64 {
    round_to_tenth(f64::from(pixels) / f64::from(dpi) * MM_PER_INCH)
}

/// Scale factor that renders one point as `dpi / 72` pixels.
pub fn dpi_to_scale(dpi: u16) -> f64 {
    f64::from(dpi) / POINTS_PER_INCH
}

/// Floor a scaled dimension to whole pixels: `floor(points * scale)`.
///
/// Flooring keeps the output inside the requested footprint.
pub fn floor_px(points: f64, scale: f64) -> u32 {
    let scaled = points * scale;
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0;
    }
    scaled.floor().min(f64::from(u32::MAX)) as u32
}

/// Smallest scale at which `points * scale` reaches `floor(target_px)`.
///
/// `target_px / points` can land one ulp short, which would cost the last
/// whole pixel once floored.
pub fn scale_to_fit(points: f64, target_px: f64) -> f64 {
    let mut scale = target_px / points;
    if !scale.is_finite() || scale <= 0.0 {
        return scale;
    }
    let whole = target_px.floor();
    while points * scale < whole {
        scale = f64::from_bits(scale.to_bits() + 1);
    }
    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_width_in_mm() {
        assert_eq!(points_to_mm(595.0), 209.9);
        assert_eq!(points_to_mm(595.276), 210.0);
        assert_eq!(points_to_mm(841.89), 297.0);
    }

    #[test]
    fn mm_to_pixels_at_300_dpi() {
        let px = mm_to_pixels(210.0, 300);
        assert!((px - 2480.315).abs() < 0.001, "got {px}");
    }

    #[test]
    fn pixels_back_to_mm() {
        assert_eq!(pixels_to_mm(2480, 300), 210.0);
        assert_eq!(pixels_to_mm(2479, 300), 209.9);
        assert_eq!(pixels_to_mm(595, 72), 209.9);
    }

    #[test]
    fn floor_never_rounds_up() {
        assert_eq!(floor_px(595.0, dpi_to_scale(300)), 2479);
        assert_eq!(floor_px(842.0, dpi_to_scale(300)), 3508);
        assert_eq!(floor_px(10.9, 1.0), 10);
    }

    #[test]
    fn floor_is_exact() {
        // 0.57 * 100.0 is 56.99999999999999 in f64.
        assert_eq!(floor_px(0.57, 100.0), 56);
        assert_eq!(floor_px(0.57, 100.0), (0.57f64 * 100.0).floor() as u32);
    }

    #[test]
    fn fitted_scale_reaches_whole_targets() {
        for points in [595.0, 612.0, 841.89, 420.5, 283.46] {
            for target in 1..3000u32 {
                let scale = scale_to_fit(points, f64::from(target));
                assert_eq!(floor_px(points, scale), target, "{points} pt -> {target} px");
            }
        }
    }

    #[test]
    fn fitted_scale_floors_fractional_targets() {
        let target = mm_to_pixels(100.0, 300);
        let scale = scale_to_fit(595.0, target);
        assert_eq!(floor_px(595.0, scale), target.floor() as u32);
        assert!(595.0 * scale <= target.ceil());
    }

    #[test]
    fn floor_of_degenerate_input_is_zero() {
        assert_eq!(floor_px(0.0, 4.0), 0);
        assert_eq!(floor_px(-5.0, 4.0), 0);
        assert_eq!(floor_px(f64::NAN, 4.0), 0);
    }

    #[test]
    fn round_to_tenth_half_cases() {
        assert_eq!(round_to_tenth(1.25), 1.3);
        assert_eq!(round_to_tenth(209.94), 209.9);
    }
}
