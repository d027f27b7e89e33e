//! planet-scene
//!
//! A small wgpu scene: a textured planet with a day/night switch, a plane
//! circling it, a cubemap sky and optional wireframe meshes. Every asset
//! location comes from a [`SceneConfig`].
//!
//! High-level modules
//! - `camera`: fixed look-at camera and perspective projection
//! - `config`: RON scene configuration with defaults
//! - `context`: GPU and window context that owns surface/device/queue
//! - `data_structures`: mesh and texture GPU resources
//! - `pipelines`: shader programs and their named uniforms
//! - `renderer`: per-frame rendering and the window event loop
//! - `resources`: loading OBJ meshes, images and shader sources
//! - `scene`: the scene objects and their animation state
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod renderer;
pub mod resources;
pub mod scene;

pub use config::SceneConfig;
pub use renderer::{SceneRenderer, run};
pub use scene::Scene;
