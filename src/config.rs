use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Projection;
use crate::cli::Cli;
use crate::params::{LightParams, Params};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read preset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid preset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Saved panel state. Missing sections and fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub params: Params,
    pub light: LightParams,
}

impl Preset {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything the app needs to start
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub params: Params,
    pub light: LightParams,
    pub asset_dir: PathBuf,
    pub show_ui: bool,
    pub window_size: (u32, u32),
    pub projection: Projection,
}

impl ViewerConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut preset = match &cli.params {
            Some(path) => {
                let preset = Preset::load(path)?;
                log::info!("Loaded preset {}", path.display());
                preset
            }
            None => Preset::default(),
        };

        let params = &mut preset.params;
        if let Some(shape) = cli.shape {
            params.shape = shape;
        }
        if let Some(material) = cli.material {
            params.material = material;
        }
        if let Some(animation) = cli.animation {
            params.animation = animation;
        }
        if let Some(mode) = cli.mode {
            params.mode_control = mode;
        }
        params.clamp();
        preset.light.clamp();

        Ok(Self {
            params: preset.params,
            light: preset.light,
            asset_dir: cli.assets.clone(),
            show_ui: !cli.no_ui,
            window_size: (cli.width.max(1), cli.height.max(1)),
            projection: if cli.orthographic {
                Projection::Orthographic
            } else {
                Projection::Perspective
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MaterialKind, Shape};
    use clap::Parser;

    fn write_preset(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("shape-viewer-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_preset() {
        let config = ViewerConfig::from_cli(&Cli::parse_from(["shape-viewer"])).unwrap();
        assert_eq!(config.params, Params::default());
        assert_eq!(config.light, LightParams::default());
        assert!(config.show_ui);
        assert_eq!(config.projection, Projection::Perspective);
    }

    #[test]
    fn test_cli_overrides_preset() {
        let path = write_preset(
            "override",
            r#"{"params":{"shape":"box","material":"glossy","lx":500},"light":{"intensity":3}}"#,
        );
        let cli = Cli::parse_from(["shape-viewer", "--params", path.to_str().unwrap(), "--shape", "sphere"]);
        let config = ViewerConfig::from_cli(&cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.params.shape, Shape::Sphere);
        assert_eq!(config.params.material, MaterialKind::Glossy);
        // Clamped to the slider range
        assert_eq!(config.params.lx, 100.0);
        assert_eq!(config.light.intensity, 3.0);
        assert_eq!(config.light.distance, 400.0);
    }

    #[test]
    fn test_bad_preset_reports_path() {
        let path = write_preset("bad", "{ not json");
        let err = Preset::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("shape-viewer-bad"));
    }

    #[test]
    fn test_missing_preset() {
        let err = Preset::load(Path::new("no/such/preset.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
