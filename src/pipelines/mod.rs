//! Shader programs and the uniform blocks that feed them.
//!
//! - `shader` compiles a WGSL vertex/fragment pair into a render pipeline
//! - `uniform` packs named uniform values with WGSL alignment rules

pub mod shader;
pub mod uniform;
