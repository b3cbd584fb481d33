//! Configuration loader.
//!
//! Loads player and portal tuning from YAML files, allowing different
//! movement feels and portal sizes without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! config/
//! ├── player/
//! │   ├── default.yaml
//! │   ├── low_gravity.yaml
//! │   └── ...
//! └── portal/
//!     └── default.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::constants;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            ConfigError::NotFound(name) => write!(f, "Config not found: {}", name),
            ConfigError::Invalid(reason) => write!(f, "Invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

// =============================================================================
// Player
// =============================================================================

/// Movement tuning for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Walking speed (m/s)
    pub move_speed: f32,
    /// Radians of rotation per raw mouse unit
    pub mouse_sensitivity: f32,
    /// Downward acceleration (m/s²)
    pub gravity: f32,
    /// Vertical speed given by a jump (m/s)
    pub jump_speed: f32,
    /// Horizontal half-width of the player box (m)
    pub radius: f32,
    /// Full height of the player box (m)
    pub height: f32,
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius <= 0.0 || self.height <= constants::EYE_OFFSET {
            return Err(ConfigError::Invalid(format!(
                "player '{}' has degenerate box {} x {}",
                self.name, self.radius, self.height
            )));
        }
        if !self.gravity.is_finite() || !self.move_speed.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "player '{}' has non-finite tuning",
                self.name
            )));
        }
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            move_speed: constants::DEFAULT_MOVE_SPEED,
            mouse_sensitivity: constants::DEFAULT_MOUSE_SENSITIVITY,
            gravity: constants::DEFAULT_GRAVITY,
            jump_speed: constants::DEFAULT_JUMP_SPEED,
            radius: constants::DEFAULT_RADIUS,
            height: constants::DEFAULT_HEIGHT,
        }
    }
}

// =============================================================================
// Portal
// =============================================================================

/// Size of placed portals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub name: String,
    /// Extent along the portal's right axis (m)
    pub width: f32,
    /// Extent along the portal's up axis (m)
    pub height: f32,
}

impl PortalConfig {
    /// Portal extents must be positive; teleport math divides through them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "portal '{}' has non-positive size {} x {}",
                self.name, self.width, self.height
            )))
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            width: constants::DEFAULT_PORTAL_WIDTH,
            height: constants::DEFAULT_PORTAL_HEIGHT,
        }
    }
}

// =============================================================================
// Loader
// =============================================================================

/// Config loader with configurable base directory.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `player/` and `portal/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a player config by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = ConfigLoader::new("config");
    /// let moon = loader.load_player("low_gravity")?;
    /// ```
    pub fn load_player(&self, name: &str) -> Result<PlayerConfig, ConfigError> {
        let config: PlayerConfig = self.load("player", name)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a portal config by name.
    pub fn load_portal(&self, name: &str) -> Result<PortalConfig, ConfigError> {
        let config: PortalConfig = self.load("portal", name)?;
        config.validate()?;
        Ok(config)
    }

    /// List all available player configs.
    pub fn list_players(&self) -> Result<Vec<String>, ConfigError> {
        self.list("player")
    }

    /// List all available portal configs.
    pub fn list_portals(&self) -> Result<Vec<String>, ConfigError> {
        self.list("portal")
    }

    fn load<T: serde::de::DeserializeOwned>(
        &self,
        subdir: &str,
        name: &str,
    ) -> Result<T, ConfigError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn list(&self, subdir: &str) -> Result<Vec<String>, ConfigError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
