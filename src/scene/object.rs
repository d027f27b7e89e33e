use cgmath::Matrix4;

use crate::{
    config::ShaderPaths,
    context::InitContext,
    data_structures::mesh::{GpuMesh, MeshData, VertexStream, stream_layouts},
    pipelines::{
        shader::{ProgramDescriptor, RasterState, ShaderError, ShaderProgram},
        uniform::UniformLayout,
    },
    scene::Draw,
};

/// A plain mesh drawn as a single-colour wireframe.
pub struct Object {
    mesh: GpuMesh,
    program: ShaderProgram,
    color: [f32; 4],
    scale: f32,
}

impl Object {
    pub const STREAMS: [VertexStream; 2] = [VertexStream::Position, VertexStream::Normal];

    pub fn uniform_layout() -> UniformLayout {
        UniformLayout::builder()
            .mat4("model")
            .mat4("view")
            .mat4("projection")
            .vec4("object_color")
            .build()
    }

    pub async fn new(
        ctx: &InitContext,
        mesh: &MeshData,
        shaders: &ShaderPaths,
        label: &str,
    ) -> Result<Self, ShaderError> {
        let polygon_mode = if ctx.supports_wireframe() {
            wgpu::PolygonMode::Line
        } else {
            log::warn!("{label}: adapter has no line polygon mode, drawing filled");
            wgpu::PolygonMode::Fill
        };
        let layouts = stream_layouts(&Self::STREAMS);
        let program = ShaderProgram::new(
            &ctx.device,
            ProgramDescriptor {
                label,
                shaders,
                uniforms: Self::uniform_layout(),
                textures: None,
                vertex_layouts: &layouts,
                color_format: ctx.color_format,
                raster: RasterState {
                    polygon_mode,
                    ..Default::default()
                },
            },
        )
        .await?;
        let mesh = GpuMesh::upload(&ctx.device, mesh, &Self::STREAMS, label);
        Ok(Self {
            mesh,
            program,
            color: [1.0, 1.0, 1.0, 1.0],
            scale: 1.0,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count()
    }
}

impl Draw for Object {
    fn draw(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        self.program.set_vec4("object_color", self.color);
        self.program.set_mat4("model", &Matrix4::from_scale(self.scale));
        self.program.set_mat4("view", view);
        self.program.set_mat4("projection", projection);
        self.program.flush(queue);

        self.program.bind(render_pass);
        self.mesh.draw(render_pass);
    }
}
