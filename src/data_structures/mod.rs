//! Engine data structures: meshes and textures.
//!
//! - `mesh` holds flat OBJ-derived geometry and the GPU vertex buffers built from it
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod mesh;
pub mod texture;
