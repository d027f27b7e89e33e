//! Loading meshes, images and shader sources from external files.
//!
//! Every path is supplied by the caller (normally from
//! [`SceneConfig`](crate::config::SceneConfig)); nothing here assumes a working
//! directory layout.

use std::path::Path;

use anyhow::Context as _;

pub mod mesh;
pub mod texture;

pub fn load_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("could not read {:?}", path))
}

pub fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("could not read {:?}", path))
}
