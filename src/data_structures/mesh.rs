//! Flat mesh data and its GPU-side counterpart.
//!
//! [`MeshData`] is what the OBJ loader produces: one entry per face-vertex, no
//! index buffer. [`GpuMesh`] owns the vertex buffers uploaded from it, one
//! buffer per attribute stream.

use wgpu::util::DeviceExt;

/// Flattened, triangulated geometry.
///
/// `normals` and `texcoords` are either empty or exactly parallel to
/// `positions` (3 and 2 floats per vertex respectively).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// The raw floats backing `stream`, if the mesh carries that attribute.
    pub fn attribute(&self, stream: VertexStream) -> Option<&[f32]> {
        let data = match stream {
            VertexStream::Position => &self.positions,
            VertexStream::Normal => &self.normals,
            VertexStream::TexCoord => &self.texcoords,
        };
        (!data.is_empty()).then_some(data.as_slice())
    }
}

/// One vertex attribute, living in its own vertex buffer.
///
/// The shader location equals the buffer slot equals the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexStream {
    Position = 0,
    Normal = 1,
    TexCoord = 2,
}

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const TEXCOORD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x2];

impl VertexStream {
    pub fn components(self) -> usize {
        match self {
            VertexStream::Position | VertexStream::Normal => 3,
            VertexStream::TexCoord => 2,
        }
    }

    pub fn desc(self) -> wgpu::VertexBufferLayout<'static> {
        let attributes: &'static [wgpu::VertexAttribute] = match self {
            VertexStream::Position => &POSITION_ATTRIBUTES,
            VertexStream::Normal => &NORMAL_ATTRIBUTES,
            VertexStream::TexCoord => &TEXCOORD_ATTRIBUTES,
        };
        wgpu::VertexBufferLayout {
            array_stride: (self.components() * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }

    fn name(self) -> &'static str {
        match self {
            VertexStream::Position => "Position",
            VertexStream::Normal => "Normal",
            VertexStream::TexCoord => "TexCoord",
        }
    }
}

/// Vertex buffer layouts for a set of streams, in slot order.
pub fn stream_layouts(streams: &[VertexStream]) -> Vec<wgpu::VertexBufferLayout<'static>> {
    streams.iter().map(|stream| stream.desc()).collect()
}

/// Vertex buffers for one mesh.
///
/// The buffers are released when this value is dropped. An empty mesh owns no
/// buffers and [`draw`](Self::draw) is a no-op for it.
#[derive(Debug)]
pub struct GpuMesh {
    buffers: Vec<wgpu::Buffer>,
    vertex_count: u32,
}

impl GpuMesh {
    /// Upload the requested `streams` of `mesh`, in slot order.
    ///
    /// Streams the mesh lacks are filled with zeros so the pipeline always
    /// gets a buffer of the right length.
    pub fn upload(
        device: &wgpu::Device,
        mesh: &MeshData,
        streams: &[VertexStream],
        label: &str,
    ) -> Self {
        let vertex_count = mesh.vertex_count();
        if vertex_count == 0 {
            log::warn!("{label}: mesh has no vertices, nothing will be drawn");
            return Self {
                buffers: Vec::new(),
                vertex_count: 0,
            };
        }
        let buffers = streams
            .iter()
            .map(|&stream| {
                let expected = vertex_count * stream.components();
                let zeros;
                let contents = match mesh.attribute(stream) {
                    Some(data) if data.len() == expected => data,
                    other => {
                        if other.is_some() {
                            log::warn!(
                                "{label}: {} stream has the wrong length, replacing with zeros",
                                stream.name()
                            );
                        } else {
                            log::debug!("{label}: no {} data, filling with zeros", stream.name());
                        }
                        zeros = vec![0.0f32; expected];
                        zeros.as_slice()
                    }
                };
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} {} Buffer", stream.name())),
                    contents: bytemuck::cast_slice(contents),
                    usage: wgpu::BufferUsages::VERTEX,
                })
            })
            .collect();
        Self {
            buffers,
            vertex_count: vertex_count as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        for (slot, buffer) in self.buffers.iter().enumerate() {
            render_pass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}
