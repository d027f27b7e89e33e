use cgmath::{Deg, Matrix4, Vector3};

use crate::{
    config::ShaderPaths,
    context::InitContext,
    data_structures::mesh::{GpuMesh, MeshData, VertexStream, stream_layouts},
    pipelines::{
        shader::{ProgramDescriptor, RasterState, ShaderError, ShaderProgram},
        uniform::UniformLayout,
    },
    scene::{Draw, animation::Spin},
};

pub const PLANE_SCALE: f32 = 0.35;
pub const ORBIT_RADIUS: f32 = 6.0;
pub const ORBIT_START: f32 = 0.5;
pub const ORBIT_STEP: f32 = 0.5;

const PLANE_COLOR: [f32; 3] = [0.741, 0.741, 0.741];
const LIGHT_POSITION: [f32; 3] = [15.0, 15.0, -10.0];
const LIGHT_COLOR: [f32; 3] = [0.988, 0.945, 0.784];

/// Model matrix for the plane at a given orbit angle.
///
/// Orbit about the world Y axis at [`ORBIT_RADIUS`], then turn the model so
/// its nose follows the orbit, then shrink it.
pub fn model_matrix(orbit: Deg<f32>) -> Matrix4<f32> {
    Matrix4::from_angle_y(orbit)
        * Matrix4::from_translation(Vector3::new(0.0, 0.0, -ORBIT_RADIUS))
        * Matrix4::from_angle_x(Deg(-90.0))
        * Matrix4::from_angle_z(Deg(90.0))
        * Matrix4::from_scale(PLANE_SCALE)
}

/// An opaque, Phong-lit model circling the planet.
pub struct Plane {
    mesh: GpuMesh,
    program: ShaderProgram,
    orbit: Spin,
    view_position: [f32; 3],
}

impl Plane {
    pub const STREAMS: [VertexStream; 2] = [VertexStream::Position, VertexStream::Normal];

    pub fn uniform_layout() -> UniformLayout {
        UniformLayout::builder()
            .mat4("model")
            .mat4("view")
            .mat4("projection")
            .vec3("object_color")
            .vec3("light_pos")
            .vec3("view_pos")
            .vec3("light_color")
            .build()
    }

    /// `view_position` is the camera eye, used for the specular term.
    pub async fn new(
        ctx: &InitContext,
        mesh: &MeshData,
        shaders: &ShaderPaths,
        view_position: [f32; 3],
    ) -> Result<Self, ShaderError> {
        let layouts = stream_layouts(&Self::STREAMS);
        let program = ShaderProgram::new(
            &ctx.device,
            ProgramDescriptor {
                label: "Plane",
                shaders,
                uniforms: Self::uniform_layout(),
                textures: None,
                vertex_layouts: &layouts,
                color_format: ctx.color_format,
                raster: RasterState::default(),
            },
        )
        .await?;
        let mesh = GpuMesh::upload(&ctx.device, mesh, &Self::STREAMS, "Plane");
        Ok(Self {
            mesh,
            program,
            orbit: Spin::new(ORBIT_START, ORBIT_STEP),
            view_position,
        })
    }

    pub fn orbit(&self) -> Spin {
        self.orbit
    }
}

impl Draw for Plane {
    fn draw(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        self.program.set_vec3("object_color", PLANE_COLOR);
        self.program.set_vec3("light_pos", LIGHT_POSITION);
        self.program.set_vec3("view_pos", self.view_position);
        self.program.set_vec3("light_color", LIGHT_COLOR);
        self.program.set_mat4("model", &model_matrix(self.orbit.angle()));
        self.program.set_mat4("view", view);
        self.program.set_mat4("projection", projection);
        self.program.flush(queue);

        self.program.bind(render_pass);
        self.mesh.draw(render_pass);

        self.orbit.advance();
    }
}
