//! YAML configuration: grid geometry, pacing and the initial spheres

use crate::color::ColorFlag;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default = "default_spheres")]
    pub spheres: Vec<SphereConfig>,
}

/// Character grid geometry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Width / height of one character cell
    #[serde(default = "default_pixel_aspect")]
    pub pixel_aspect: f32,
}

fn default_width() -> usize {
    crate::WIDTH
}

fn default_height() -> usize {
    crate::HEIGHT
}

fn default_pixel_aspect() -> f32 {
    crate::PIXEL_ASPECT
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            pixel_aspect: default_pixel_aspect(),
        }
    }
}

/// Frame pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_frame_delay")]
    pub frame_delay_ms: u64,
    /// Trace rows on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_frame_delay() -> u64 {
    crate::FRAME_DELAY_MS
}

fn default_parallel() -> bool {
    true
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: default_frame_delay(),
            parallel: default_parallel(),
        }
    }
}

/// One sphere of the initial scene
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SphereConfig {
    pub radius: f32,
    #[serde(default)]
    pub phase: f32,
    #[serde(default = "default_sphere_color")]
    pub color: Vec<ColorFlag>,
}

/// Bright glyphs on black, for spheres configured without a color
fn default_sphere_color() -> Vec<ColorFlag> {
    vec![ColorFlag::ForegroundIntensity]
}

fn default_spheres() -> Vec<SphereConfig> {
    vec![
        SphereConfig {
            radius: 0.8,
            phase: 0.0,
            color: vec![ColorFlag::BackgroundRed],
        },
        SphereConfig {
            radius: 0.5,
            phase: 10.0,
            color: vec![ColorFlag::BackgroundGreen],
        },
        SphereConfig {
            radius: 1.5,
            phase: 20.0,
            color: vec![ColorFlag::BackgroundBlue],
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            animation: AnimationConfig::default(),
            spheres: default_spheres(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load configuration, falling back to the default file names and then
    /// to built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["sphere-rt.yaml", "sphere-rt.yml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Validation(format!(
                "display must be at least 1x1, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if !(self.display.pixel_aspect > 0.0) {
            return Err(ConfigError::Validation(format!(
                "pixel_aspect must be positive, got {}",
                self.display.pixel_aspect
            )));
        }
        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "sphere {} has non-positive radius {}",
                    i, sphere.radius
                )));
            }
        }
        Ok(())
    }
}

/// Load and validate configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let config = AppConfig::default();
        assert_eq!(config.display.width, 200);
        assert_eq!(config.display.height, 50);
        assert_eq!(config.animation.frame_delay_ms, 20);
        assert_eq!(config.spheres.len(), 3);
        assert_eq!(config.spheres[2].radius, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/sphere-rt.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let temp_file = std::env::temp_dir().join("sphere_rt_invalid_config.yaml");
        std::fs::write(&temp_file, "display: [width: ").unwrap();

        let result = load_config(&temp_file);
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));

        let _ = std::fs::remove_file(&temp_file);
    }

    #[test]
    fn test_load_config_valid() {
        let temp_file = std::env::temp_dir().join("sphere_rt_valid_config.yaml");
        let config_content = r#"
display:
  width: 80
  height: 24

animation:
  frame_delay_ms: 40
  parallel: false

spheres:
  - radius: 1.0
    phase: 2.5
    color: [background_red, background_intensity]
  - radius: 0.25
"#;
        std::fs::write(&temp_file, config_content).unwrap();

        let config = load_config(&temp_file).unwrap();
        assert_eq!(config.display.width, 80);
        assert_eq!(config.display.height, 24);
        assert_eq!(config.display.pixel_aspect, 0.5);
        assert_eq!(config.animation.frame_delay_ms, 40);
        assert!(!config.animation.parallel);
        assert_eq!(config.spheres.len(), 2);
        assert_eq!(
            config.spheres[0].color,
            vec![ColorFlag::BackgroundRed, ColorFlag::BackgroundIntensity]
        );
        assert_eq!(config.spheres[1].phase, 0.0);
        assert_eq!(config.spheres[1].color, default_sphere_color());

        let _ = std::fs::remove_file(&temp_file);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.spheres, default_spheres());
        assert_eq!(config.display.width, 200);
    }

    #[test]
    fn test_sphere_without_color_is_visible() {
        let config: AppConfig = serde_yaml::from_str("spheres:\n  - radius: 1.0\n").unwrap();
        let scene = crate::scene::Scene::from_config(&config.spheres);
        assert_eq!(scene.spheres[0].color, crate::color::ColorAttr::FG_INTENSITY);
    }

    #[test]
    fn test_explicit_empty_color_stays_empty() {
        let config: AppConfig =
            serde_yaml::from_str("spheres:\n  - radius: 1.0\n    color: []\n").unwrap();
        assert!(config.spheres[0].color.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut config = AppConfig::default();
        config.spheres[1].radius = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let mut config = AppConfig::default();
        config.display.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_color_flag() {
        let result: Result<AppConfig, _> =
            serde_yaml::from_str("spheres:\n  - radius: 1.0\n    color: [purple]\n");
        assert!(result.is_err());
    }
}
