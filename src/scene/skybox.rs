use cgmath::Matrix4;

use crate::{
    camera::strip_translation,
    config::{ShaderPaths, SkyboxFaces},
    context::InitContext,
    data_structures::{
        mesh::{GpuMesh, MeshData, VertexStream, stream_layouts},
        texture::Texture,
    },
    pipelines::{
        shader::{ProgramDescriptor, RasterState, ShaderProgram},
        uniform::UniformLayout,
    },
    resources::texture::{cube_layout, load_cubemap},
    scene::Draw,
};

/// Unit cube, 12 triangles, positions only.
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; 108] = [
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,

    -1.0, -1.0,  1.0,
    -1.0, -1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,

     1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,

    -1.0, -1.0,  1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,

    -1.0,  1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,

    -1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
];

pub fn cube_mesh() -> MeshData {
    MeshData {
        positions: CUBE_VERTICES.to_vec(),
        ..Default::default()
    }
}

/// Depth state for a background drawn last: the shader pins every fragment to
/// the far plane, so it must pass against a cleared depth of 1.0 and never
/// occlude anything.
pub const SKYBOX_RASTER: RasterState = RasterState {
    polygon_mode: wgpu::PolygonMode::Fill,
    depth_compare: wgpu::CompareFunction::LessEqual,
    depth_write_enabled: false,
};

/// A cubemapped background that follows the camera's orientation only.
pub struct Skybox {
    mesh: GpuMesh,
    program: ShaderProgram,
    cubemap: Texture,
    bind_group: wgpu::BindGroup,
}

impl Skybox {
    pub const STREAMS: [VertexStream; 1] = [VertexStream::Position];

    pub fn uniform_layout() -> UniformLayout {
        UniformLayout::builder().mat4("view").mat4("projection").build()
    }

    pub async fn new(
        ctx: &InitContext,
        faces: &SkyboxFaces,
        shaders: &ShaderPaths,
    ) -> anyhow::Result<Self> {
        let texture_layout = cube_layout(&ctx.device);
        let layouts = stream_layouts(&Self::STREAMS);
        let program = ShaderProgram::new(
            &ctx.device,
            ProgramDescriptor {
                label: "Skybox",
                shaders,
                uniforms: Self::uniform_layout(),
                textures: Some(&texture_layout),
                vertex_layouts: &layouts,
                color_format: ctx.color_format,
                raster: SKYBOX_RASTER,
            },
        )
        .await?;

        let cubemap = load_cubemap(&ctx.device, &ctx.queue, faces, "skybox_cubemap");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cubemap.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(cubemap.sampler()?),
                },
            ],
            label: Some("skybox_bind_group"),
        });
        let mesh = GpuMesh::upload(&ctx.device, &cube_mesh(), &Self::STREAMS, "Skybox");

        Ok(Self {
            mesh,
            program,
            cubemap,
            bind_group,
        })
    }

    pub fn cubemap(&self) -> &Texture {
        &self.cubemap
    }
}

impl Draw for Skybox {
    fn draw(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        self.program.set_mat4("view", &strip_translation(view));
        self.program.set_mat4("projection", projection);
        self.program.flush(queue);

        self.program.bind(render_pass);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}
