// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Commute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Commute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration file loading.
//!
//! ```toml
//! step = 1.0
//! precision = 3
//! distance_weight = 0.25
//! parallel_threshold = 0.1
//! bbox_margin = 0.3
//!
//! [[keybindings]]
//! combo = "1:x"
//! action = "delete-selected"
//! ```

use std::fs;
use std::path::Path;

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use crate::editor::{EditorSettings, DEFAULT_STEP};
use crate::error::{ConfigError, KeymapError};
use crate::keymap::Keymap;
use crate::model::diagram::{DEFAULT_BBOX_MARGIN, DEFAULT_PRECISION};
use crate::nav::{Navigator, DEFAULT_DISTANCE_WEIGHT};
use crate::ops::{CommandSettings, DEFAULT_PARALLEL_THRESHOLD};

const LOCAL_CONFIG: &str = "commute/config.toml";

// Coordinates are scaled by 10^precision into an i64.
const MAX_PRECISION: u32 = 9;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub step: f64,
    pub precision: u32,
    pub distance_weight: f64,
    pub parallel_threshold: f64,
    pub bbox_margin: f64,
    /// Extra bindings, applied after the built-in ones.
    pub keybindings: Vec<BindingConfig>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            precision: DEFAULT_PRECISION,
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            bbox_margin: DEFAULT_BBOX_MARGIN,
            keybindings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindingConfig {
    /// `"[mask:]combo"`, e.g. `"1:shift+l"`.
    pub combo: String,
    /// Action name, e.g. `"extend-out:right"`.
    pub action: String,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::Validation(format!(
                "step must be a positive number, got {}",
                self.step
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Validation(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        for (name, value) in [
            ("distance_weight", self.distance_weight),
            ("parallel_threshold", self.parallel_threshold),
            ("bbox_margin", self.bbox_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn settings(&self) -> EditorSettings {
        EditorSettings {
            step: self.step,
            precision: self.precision,
            bbox_margin: self.bbox_margin,
            commands: CommandSettings {
                navigator: Navigator::new(self.distance_weight),
                parallel_threshold: self.parallel_threshold,
            },
        }
    }

    /// The built-in bindings overlaid with the configured ones.
    pub fn keymap(&self) -> Result<Keymap, KeymapError> {
        let mut keymap = Keymap::defaults();
        for binding in &self.keybindings {
            keymap.bind_named(&binding.combo, &binding.action)?;
        }
        Ok(keymap)
    }
}

/// Finds and loads the configuration.
///
/// Search order:
/// 1. `explicit_path`, which must exist
/// 2. `commute/config.toml` under the working directory
/// 3. `config.toml` in the platform config directory
/// 4. built-in defaults
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<EditorConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "commute", "commute") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(EditorConfig::default())
}

pub fn load_config_file(path: impl AsRef<Path>) -> Result<EditorConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<EditorConfig, ConfigError> {
    let config: EditorConfig =
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate()?;
    // surface bad bindings at load time rather than on first keypress
    config.keymap()?;
    Ok(config)
}
