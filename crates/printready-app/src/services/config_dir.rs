// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings location and loading.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use printready_core::PipelineConfig;
use printready_core::error::Result;
use tracing::debug;

const APP_DIR: &str = "printready";
const CONFIG_FILE: &str = "config.json";

/// Return the application config directory.
///
/// Not created here; the CLI only ever reads from it.
pub fn config_dir() -> PathBuf {
    config_dir_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_dir_from(xdg: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let base = match (xdg, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) => PathBuf::from(home).join(".config"),
        // Last resort
        _ => PathBuf::from("."),
    };
    base.join(APP_DIR)
}

/// Default location of the pipeline settings file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Load pipeline settings.
///
/// An explicit path must exist. Without one the default file is used when
/// present, and built-in defaults otherwise.
pub fn load_pipeline_config(explicit: Option<&Path>) -> Result<PipelineConfig> {
    match explicit {
        Some(path) => PipelineConfig::load(path),
        None => load_or_default(&default_config_path()),
    }
}

fn load_or_default(path: &Path) -> Result<PipelineConfig> {
    if path.is_file() {
        PipelineConfig::load(path)
    } else {
        debug!(path = %path.display(), "no settings file, using defaults");
        Ok(PipelineConfig::default())
    }
}
