//! Shader programs: a vertex/fragment WGSL pair linked into a render pipeline,
//! plus the uniform buffer that feeds it.

use std::path::{Path, PathBuf};

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::{
    config::ShaderPaths,
    data_structures::texture::Texture,
    pipelines::uniform::{UniformBlock, UniformLayout},
    resources::load_string,
};

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not read shader source {path:?}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("shader program `{label}` failed to build:\n{diagnostic}")]
    Compile { label: String, diagnostic: String },
}

/// Fixed-function state a program is linked with.
#[derive(Debug, Clone, Copy)]
pub struct RasterState {
    pub polygon_mode: wgpu::PolygonMode,
    pub depth_compare: wgpu::CompareFunction,
    pub depth_write_enabled: bool,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            polygon_mode: wgpu::PolygonMode::Fill,
            depth_compare: wgpu::CompareFunction::Less,
            depth_write_enabled: true,
        }
    }
}

/// Everything needed to build a [`ShaderProgram`].
pub struct ProgramDescriptor<'a> {
    pub label: &'a str,
    pub shaders: &'a ShaderPaths,
    pub uniforms: UniformLayout,
    /// Bind group layout for group 1, if the program samples textures.
    pub textures: Option<&'a wgpu::BindGroupLayout>,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    pub color_format: wgpu::TextureFormat,
    pub raster: RasterState,
}

/// A linked vertex + fragment pipeline with its own uniform buffer at group 0.
#[derive(Debug)]
pub struct ShaderProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBlock,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    load_string(path).map_err(|source| ShaderError::Source {
        path: path.to_path_buf(),
        source,
    })
}

impl ShaderProgram {
    /// Compile both stages and link them.
    ///
    /// Compilation and validation run inside a validation error scope, so a
    /// broken shader comes back as [`ShaderError::Compile`] carrying the
    /// compiler's diagnostic instead of aborting the process.
    pub async fn new(device: &wgpu::Device, desc: ProgramDescriptor<'_>) -> Result<Self, ShaderError> {
        let vertex_source = read_source(&desc.shaders.vertex)?;
        let fragment_source = read_source(&desc.shaders.fragment)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let uniform_layout = uniform_bind_group_layout(device, desc.label);
        let mut bind_group_layouts = vec![&uniform_layout];
        if let Some(textures) = desc.textures {
            bind_group_layouts.push(textures);
        }
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", desc.label)),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let vertex_label = format!("{} Vertex Shader", desc.label);
        let fragment_label = format!("{} Fragment Shader", desc.label);
        let vertex = wgpu::ShaderModuleDescriptor {
            label: Some(&vertex_label),
            source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
        };
        let fragment = wgpu::ShaderModuleDescriptor {
            label: Some(&fragment_label),
            source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
        };
        let pipeline = mk_render_pipeline(
            device,
            &pipeline_layout,
            desc.color_format,
            Some(wgpu::BlendState::REPLACE),
            Some(Texture::DEPTH_FORMAT),
            desc.vertex_layouts,
            vertex,
            fragment,
            desc.raster,
        );

        if let Some(error) = device.pop_error_scope().await {
            return Err(ShaderError::Compile {
                label: desc.label.to_string(),
                diagnostic: error.to_string(),
            });
        }

        let uniforms = UniformBlock::new(desc.uniforms);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniform Buffer", desc.label)),
            contents: uniforms.bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} Uniform Bind Group", desc.label)),
        });

        log::debug!("Built shader program `{}`", desc.label);
        Ok(Self {
            label: desc.label.to_string(),
            pipeline,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set_float(name, value);
    }

    pub fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.uniforms.set_vec3(name, value);
    }

    pub fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.uniforms.set_vec4(name, value);
    }

    pub fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        self.uniforms.set_mat4(name, value);
    }

    /// Upload the staged uniform values.
    pub fn flush(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, self.uniforms.bytes());
    }

    /// Make this program current: pipeline plus uniforms at group 0.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
    }
}

fn uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(&format!("{label} Uniform Layout")),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    vertex: wgpu::ShaderModuleDescriptor,
    fragment: wgpu::ShaderModuleDescriptor,
    raster: RasterState,
) -> wgpu::RenderPipeline {
    let vertex = device.create_shader_module(vertex);
    let fragment = device.create_shader_module(fragment);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // OBJ exports do not agree on winding
            cull_mode: None,
            polygon_mode: raster.polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: raster.depth_write_enabled,
            depth_compare: raster.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
