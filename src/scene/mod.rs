//! The objects that make up the scene and the container that owns them.
//!
//! Every object is optional: one whose shader fails to build is logged and
//! left out, and the rest of the scene still renders.

use std::path::Path;

use cgmath::Matrix4;

use crate::{
    camera::Camera,
    config::AssetConfig,
    context::InitContext,
    data_structures::texture::Texture,
    resources::{mesh::load_mesh, texture::load_texture},
};

pub mod animation;
pub mod day_night;
pub mod earth;
pub mod object;
pub mod plane;
pub mod skybox;

pub use earth::{Earth, EarthTextures};
pub use object::Object;
pub use plane::Plane;
pub use skybox::Skybox;

/// Something that records its own draw into a render pass.
///
/// Implementors upload their per-frame uniforms through `queue` before
/// recording, and advance any animation state after.
pub trait Draw {
    fn draw(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    );
}

/// The groups of objects a frame draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawLayer {
    Plane,
    Earth,
    Skybox,
    Wireframes,
}

/// Frame draw order. The sky follows the opaque objects so its far-plane
/// fragments only fill pixels nothing else covered.
pub const DRAW_ORDER: [DrawLayer; 4] = [
    DrawLayer::Plane,
    DrawLayer::Earth,
    DrawLayer::Skybox,
    DrawLayer::Wireframes,
];

#[derive(Default)]
pub struct Scene {
    pub plane: Option<Plane>,
    pub earth: Option<Earth>,
    pub skybox: Option<Skybox>,
    pub wireframes: Vec<Object>,
}

impl Scene {
    /// Load every asset named in `assets` and build the scene objects.
    ///
    /// Missing meshes become empty meshes and missing textures become black
    /// placeholders; only a shader failure drops an object.
    pub async fn load(ctx: &InitContext, assets: &AssetConfig, camera: &Camera) -> Self {
        let plane_mesh = load_mesh(&assets.plane_mesh);
        let eye = [camera.eye.x, camera.eye.y, camera.eye.z];
        let plane = Plane::new(ctx, &plane_mesh, &assets.shader("plane"), eye)
            .await
            .inspect_err(|e| log::error!("Plane disabled: {e}"))
            .ok();

        let earth_mesh = load_mesh(&assets.earth_mesh);
        let texture = |path: &Path, format: wgpu::TextureFormat, label: &str| {
            load_texture(&ctx.device, &ctx.queue, path, format, label)
        };
        let textures = EarthTextures {
            day: texture(assets.earth_day.as_path(), Texture::COLOR_FORMAT, "earth_day"),
            night: texture(assets.earth_night.as_path(), Texture::COLOR_FORMAT, "earth_night"),
            clouds: texture(assets.earth_clouds.as_path(), Texture::DATA_FORMAT, "earth_clouds"),
        };
        let earth = Earth::new(ctx, &earth_mesh, textures, &assets.shader("earth"))
            .await
            .inspect_err(|e| log::error!("Earth disabled: {e}"))
            .ok();

        let skybox = Skybox::new(ctx, &assets.skybox, &assets.shader("skybox"))
            .await
            .inspect_err(|e| log::error!("Skybox disabled: {e:#}"))
            .ok();

        let mut wireframes = Vec::with_capacity(assets.wireframes.len());
        let object_shaders = assets.shader("object");
        for path in &assets.wireframes {
            let mesh = load_mesh(path);
            let label = path.display().to_string();
            match Object::new(ctx, &mesh, &object_shaders, &label).await {
                Ok(object) => wireframes.push(object),
                Err(e) => log::error!("Wireframe {label} disabled: {e}"),
            }
        }

        log::info!(
            "Scene ready: plane={} earth={} skybox={} wireframes={}",
            plane.is_some(),
            earth.is_some(),
            skybox.is_some(),
            wireframes.len()
        );
        Self {
            plane,
            earth,
            skybox,
            wireframes,
        }
    }

    /// Switch the planet between day and night. No-op without a planet.
    pub fn switch_time(&mut self) {
        match &mut self.earth {
            Some(earth) => earth.switch_time(),
            None => log::warn!("No planet to switch time on"),
        }
    }

    /// Draw every present object in [`DRAW_ORDER`].
    pub fn draw_all(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        for layer in DRAW_ORDER {
            for drawable in self.layer_mut(layer) {
                drawable.draw(queue, render_pass, view, projection);
            }
        }
    }

    /// The objects of `layer` that were built.
    pub fn layer_len(&self, layer: DrawLayer) -> usize {
        match layer {
            DrawLayer::Plane => self.plane.iter().count(),
            DrawLayer::Earth => self.earth.iter().count(),
            DrawLayer::Skybox => self.skybox.iter().count(),
            DrawLayer::Wireframes => self.wireframes.len(),
        }
    }

    fn layer_mut(&mut self, layer: DrawLayer) -> Vec<&mut dyn Draw> {
        match layer {
            DrawLayer::Plane => self.plane.iter_mut().map(|p| p as &mut dyn Draw).collect(),
            DrawLayer::Earth => self.earth.iter_mut().map(|e| e as &mut dyn Draw).collect(),
            DrawLayer::Skybox => self.skybox.iter_mut().map(|s| s as &mut dyn Draw).collect(),
            DrawLayer::Wireframes => self.wireframes.iter_mut().map(|o| o as &mut dyn Draw).collect(),
        }
    }
}
