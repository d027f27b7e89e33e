//! Named uniform fields packed with WGSL uniform address space rules.
//!
//! A [`UniformLayout`] mirrors one WGSL `struct` bound at `@group(0)
//! @binding(0)`. Fields are declared in the same order as in the shader and
//! addressed by name afterwards; nested structs get dotted names such as
//! `light.color`.

use cgmath::Matrix4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformType {
    Float,
    Vec3,
    Vec4,
    Mat4,
}

impl UniformType {
    pub fn align(self) -> u64 {
        match self {
            UniformType::Float => 4,
            UniformType::Vec3 | UniformType::Vec4 | UniformType::Mat4 => 16,
        }
    }

    pub fn size(self) -> u64 {
        match self {
            UniformType::Float => 4,
            UniformType::Vec3 => 12,
            UniformType::Vec4 => 16,
            UniformType::Mat4 => 64,
        }
    }
}

/// Structs in the uniform address space are aligned to 16 bytes.
const STRUCT_ALIGN: u64 = 16;

fn round_up(value: u64, align: u64) -> u64 {
    value.div_ceil(align) * align
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformField {
    pub name: String,
    pub ty: UniformType,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformLayout {
    fields: Vec<UniformField>,
    size: u64,
}

impl UniformLayout {
    pub fn builder() -> UniformLayoutBuilder {
        UniformLayoutBuilder::default()
    }

    pub fn fields(&self) -> &[UniformField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&UniformField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Total size in bytes, a multiple of 16.
    pub fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Debug, Default)]
pub struct UniformLayoutBuilder {
    fields: Vec<UniformField>,
    cursor: u64,
}

impl UniformLayoutBuilder {
    fn push(mut self, name: &str, ty: UniformType) -> Self {
        let offset = round_up(self.cursor, ty.align());
        self.fields.push(UniformField {
            name: name.to_string(),
            ty,
            offset,
        });
        self.cursor = offset + ty.size();
        self
    }

    pub fn float(self, name: &str) -> Self {
        self.push(name, UniformType::Float)
    }

    pub fn vec3(self, name: &str) -> Self {
        self.push(name, UniformType::Vec3)
    }

    pub fn vec4(self, name: &str) -> Self {
        self.push(name, UniformType::Vec4)
    }

    pub fn mat4(self, name: &str) -> Self {
        self.push(name, UniformType::Mat4)
    }

    /// A nested struct member. Its fields are reachable as `name.field`.
    pub fn structure(
        mut self,
        name: &str,
        members: impl FnOnce(UniformLayoutBuilder) -> UniformLayoutBuilder,
    ) -> Self {
        let inner = members(UniformLayoutBuilder::default()).build();
        let base = round_up(self.cursor, STRUCT_ALIGN);
        self.fields
            .extend(inner.fields.into_iter().map(|field| UniformField {
                name: format!("{name}.{}", field.name),
                ty: field.ty,
                offset: base + field.offset,
            }));
        self.cursor = base + inner.size;
        self
    }

    pub fn build(self) -> UniformLayout {
        UniformLayout {
            size: round_up(self.cursor, STRUCT_ALIGN).max(STRUCT_ALIGN),
            fields: self.fields,
        }
    }
}

/// CPU-side staging bytes for one [`UniformLayout`].
///
/// Setters mirror shader uniform semantics: writing an unknown name or the
/// wrong type is reported and otherwise ignored.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    layout: UniformLayout,
    data: Vec<u8>,
}

impl UniformBlock {
    pub fn new(layout: UniformLayout) -> Self {
        let data = vec![0; layout.size() as usize];
        Self { layout, data }
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn write(&mut self, name: &str, ty: UniformType, value: &[f32]) {
        let Some(field) = self.layout.field(name) else {
            log::warn!("uniform `{name}` does not exist");
            return;
        };
        if field.ty != ty {
            log::warn!("uniform `{name}` is a {:?}, not a {:?}", field.ty, ty);
            return;
        }
        let start = field.offset as usize;
        let bytes: &[u8] = bytemuck::cast_slice(value);
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformType::Float, &[value]);
    }

    pub fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.write(name, UniformType::Vec3, &value);
    }

    pub fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.write(name, UniformType::Vec4, &value);
    }

    /// Column-major, as WGSL expects.
    pub fn set_mat4(&mut self, name: &str, value: &Matrix4<f32>) {
        let columns: [[f32; 4]; 4] = (*value).into();
        self.write(name, UniformType::Mat4, bytemuck::cast_slice(&columns));
    }

    /// Read back the components of a field, mainly for inspection.
    pub fn get(&self, name: &str) -> Option<Vec<f32>> {
        let field = self.layout.field(name)?;
        let start = field.offset as usize;
        let end = start + field.ty.size() as usize;
        Some(
            self.data[start..end]
                .chunks_exact(4)
                .map(bytemuck::pod_read_unaligned::<f32>)
                .collect(),
        )
    }
}
