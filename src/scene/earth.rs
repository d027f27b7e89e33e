use cgmath::{Deg, Matrix4};

use crate::{
    config::ShaderPaths,
    context::InitContext,
    data_structures::{
        mesh::{GpuMesh, MeshData, VertexStream, stream_layouts},
        texture::{Texture, create_clamped_sampler},
    },
    pipelines::{
        shader::{ProgramDescriptor, RasterState, ShaderError, ShaderProgram},
        uniform::UniformLayout,
    },
    resources::texture::surface_clouds_layout,
    scene::{
        Draw,
        animation::Spin,
        day_night::{DayNightCycle, LightPreset},
    },
};

pub const EARTH_SCALE: f32 = 2.0;
pub const SPIN_START: f32 = 0.2;
pub const SPIN_STEP: f32 = 0.2;

const LIGHT_DIRECTION: [f32; 3] = [-1.0, 0.0, -1.0];
const LIGHT_AMBIENT: [f32; 3] = [1.0, 1.0, 1.0];
const LIGHT_DIFFUSE: f32 = 1.2;

pub fn model_matrix(spin: Deg<f32>) -> Matrix4<f32> {
    Matrix4::from_angle_y(spin) * Matrix4::from_scale(EARTH_SCALE)
}

/// Day map, night map and cloud mask for the planet.
pub struct EarthTextures {
    pub day: Texture,
    pub night: Texture,
    pub clouds: Texture,
}

/// The textured, directionally lit planet.
pub struct Earth {
    mesh: GpuMesh,
    program: ShaderProgram,
    textures: EarthTextures,
    /// One bind group per main texture: index 0 pairs day with clouds, 1 night with clouds.
    bind_groups: [wgpu::BindGroup; 2],
    spin: Spin,
    cycle: DayNightCycle,
}

impl Earth {
    pub const STREAMS: [VertexStream; 3] = [
        VertexStream::Position,
        VertexStream::Normal,
        VertexStream::TexCoord,
    ];

    pub fn uniform_layout() -> UniformLayout {
        UniformLayout::builder()
            .mat4("model")
            .mat4("view")
            .mat4("projection")
            .structure("light", |light| {
                light
                    .vec3("color")
                    .vec3("direction")
                    .vec3("ambient")
                    .vec3("diffuse")
            })
            .float("clouds_intensity")
            .build()
    }

    pub async fn new(
        ctx: &InitContext,
        mesh: &MeshData,
        textures: EarthTextures,
        shaders: &ShaderPaths,
    ) -> Result<Self, ShaderError> {
        let texture_layout = surface_clouds_layout(&ctx.device);
        let layouts = stream_layouts(&Self::STREAMS);
        let program = ShaderProgram::new(
            &ctx.device,
            ProgramDescriptor {
                label: "Earth",
                shaders,
                uniforms: Self::uniform_layout(),
                textures: Some(&texture_layout),
                vertex_layouts: &layouts,
                color_format: ctx.color_format,
                raster: RasterState::default(),
            },
        )
        .await?;

        if !mesh.has_texcoords() {
            log::warn!("Earth: mesh has no texture coordinates, the surface will be flat");
        }
        let mesh = GpuMesh::upload(&ctx.device, mesh, &Self::STREAMS, "Earth");
        let sampler = create_clamped_sampler(&ctx.device, wgpu::FilterMode::Linear);
        let bind_groups = [
            mk_bind_group(&ctx.device, &texture_layout, &sampler, &textures.day, &textures.clouds, "day"),
            mk_bind_group(&ctx.device, &texture_layout, &sampler, &textures.night, &textures.clouds, "night"),
        ];

        Ok(Self {
            mesh,
            program,
            textures,
            bind_groups,
            spin: Spin::new(SPIN_START, SPIN_STEP),
            cycle: DayNightCycle::default(),
        })
    }

    /// Flip between the day and night presets.
    pub fn switch_time(&mut self) {
        self.cycle.toggle();
    }

    pub fn textures(&self) -> &EarthTextures {
        &self.textures
    }

    pub fn cycle(&self) -> &DayNightCycle {
        &self.cycle
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn light(&self) -> LightPreset {
        self.cycle.light()
    }
}

fn mk_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    surface: &Texture,
    clouds: &Texture,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&surface.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&clouds.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some(&format!("Earth {label} bind group")),
    })
}

impl Draw for Earth {
    fn draw(
        &mut self,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'_>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        let light = self.cycle.light();
        self.program.set_vec3("light.color", light.color);
        self.program.set_vec3("light.direction", LIGHT_DIRECTION);
        self.program.set_vec3("light.ambient", LIGHT_AMBIENT);
        self.program.set_vec3("light.diffuse", [LIGHT_DIFFUSE; 3]);
        self.program.set_float("clouds_intensity", light.clouds_intensity);
        self.program.set_mat4("model", &model_matrix(self.spin.angle()));
        self.program.set_mat4("view", view);
        self.program.set_mat4("projection", projection);
        self.program.flush(queue);

        self.program.bind(render_pass);
        render_pass.set_bind_group(1, &self.bind_groups[self.cycle.main_texture()], &[]);
        self.mesh.draw(render_pass);

        self.spin.advance();
    }
}
