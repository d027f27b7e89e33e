//! Scene configuration with defaults and RON persistence.
//!
//! Every asset the renderer touches is resolved through [`SceneConfig`]; nothing
//! in the crate hardcodes a filesystem location. All structs use
//! `#[serde(default)]` so a config file only needs to name what it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),
}

/// Top-level scene configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub input: InputConfig,
}

impl SceneConfig {
    /// Read and parse a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text)?;
        log::info!("Loaded scene config from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(ConfigError::Parse)
    }
}

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial surface width in physical pixels.
    pub width: u32,
    /// Initial surface height in physical pixels.
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "Planet Scene".to_string(),
        }
    }
}

/// The six skybox face images, named by where they sit around the viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyboxFaces {
    pub right: PathBuf,
    pub left: PathBuf,
    pub top: PathBuf,
    pub bottom: PathBuf,
    pub back: PathBuf,
    pub front: PathBuf,
}

impl Default for SkyboxFaces {
    fn default() -> Self {
        let face = |name: &str| Path::new("assets").join("skybox").join(format!("{name}.jpg"));
        Self {
            right: face("right"),
            left: face("left"),
            top: face("top"),
            bottom: face("bottom"),
            back: face("back"),
            front: face("front"),
        }
    }
}

/// Vertex and fragment shader files for one object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

/// Locations of every mesh, texture and shader the scene loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub earth_mesh: PathBuf,
    pub plane_mesh: PathBuf,
    pub earth_day: PathBuf,
    pub earth_night: PathBuf,
    pub earth_clouds: PathBuf,
    pub skybox: SkyboxFaces,
    /// Directory holding `<name>.vert.wgsl` / `<name>.frag.wgsl` pairs.
    pub shader_dir: PathBuf,
    /// Extra meshes drawn as white wireframes after the main scene.
    pub wireframes: Vec<PathBuf>,
}

impl AssetConfig {
    pub fn shader(&self, name: &str) -> ShaderPaths {
        ShaderPaths {
            vertex: self.shader_dir.join(format!("{name}.vert.wgsl")),
            fragment: self.shader_dir.join(format!("{name}.frag.wgsl")),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        let assets = Path::new("assets");
        Self {
            earth_mesh: assets.join("objects").join("earth.obj"),
            plane_mesh: assets.join("objects").join("plane.obj"),
            earth_day: assets.join("textures").join("earth_daymap.jpg"),
            earth_night: assets.join("textures").join("earth_nightmap.jpg"),
            earth_clouds: assets.join("textures").join("earth_clouds.jpg"),
            skybox: SkyboxFaces::default(),
            shader_dir: assets.join("shaders"),
            wireframes: Vec::new(),
        }
    }
}

/// Input settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Character that switches the planet between day and night.
    pub toggle_key: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            toggle_key: "1".to_string(),
        }
    }
}
