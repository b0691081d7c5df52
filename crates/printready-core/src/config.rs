// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::types::RasterSpec;

/// Persistent pipeline settings.
///
/// Missing fields in a stored file fall back to the defaults, so older
/// configuration files keep loading after new settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Resolution of exported JPEG pages.
    pub export_dpi: u16,
    /// Optional physical output width for exported pages, in millimetres.
    pub target_width_mm: Option<f64>,
    /// JPEG quality (1-100) for exported pages.
    pub jpeg_quality: u8,
    /// Resolution at which pages are rendered for colour classification.
    pub analysis_dpi: u16,
    /// Pixel width of preview thumbnails.
    pub preview_width_px: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            export_dpi: 300,
            target_width_mm: None,
            jpeg_quality: 92,
            analysis_dpi: 72,
            preview_width_px: 400,
        }
    }
}

impl PipelineConfig {
    /// Read a configuration file written by [`PipelineConfig::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(path = %path.as_ref().display(), "pipeline config loaded");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)?;
        info!(path = %path.as_ref().display(), "pipeline config saved");
        Ok(())
    }

    /// The raster request used for exported pages.
    pub fn export_spec(&self) -> RasterSpec {
        RasterSpec {
            dpi: self.export_dpi,
            target_width_mm: self.target_width_mm,
        }
    }

    /// The raster request used when classifying pages.
    pub fn analysis_spec(&self) -> RasterSpec {
        RasterSpec::native(self.analysis_dpi)
    }

    /// JPEG quality clamped to the encoder's accepted range.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_print_export() {
        let config = PipelineConfig::default();
        assert_eq!(config.export_spec(), RasterSpec::native(300));
        assert_eq!(config.analysis_spec(), RasterSpec::native(72));
        assert_eq!(config.preview_width_px, 400);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"export_dpi":600,"target_width_mm":148.0}"#).unwrap();
        assert_eq!(config.export_spec(), RasterSpec::fit_width(600, 148.0));
        assert_eq!(config.jpeg_quality, 92);
    }

    #[test]
    fn quality_is_clamped() {
        let config = PipelineConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_jpeg_quality(), 1);
        let config = PipelineConfig {
            jpeg_quality: 255,
            ..Default::default()
        };
        assert_eq!(config.effective_jpeg_quality(), 100);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = PipelineConfig {
            export_dpi: 150,
            preview_width_px: 320,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::PrintreadyError::Io(_)));
    }
}
