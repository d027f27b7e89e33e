#![allow(dead_code)]

use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn shader_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("shaders")
}

pub fn assert_vec_eq(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-5, "{actual:?} vs {expected:?}");
    }
}

#[cfg(feature = "integration-tests")]
pub fn headless() -> (tokio::runtime::Runtime, planet_scene::context::InitContext) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let ctx = runtime
        .block_on(planet_scene::context::InitContext::headless(
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ))
        .expect("a headless adapter is required for integration tests");
    (runtime, ctx)
}
