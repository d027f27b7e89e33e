use std::path::Path;

use image::DynamicImage;

use crate::{
    config::SkyboxFaces,
    data_structures::texture::{CubeFace, Texture},
    resources::load_binary,
};

/// Two sampled 2D textures: a surface map at bindings 0/1 and a cloud mask at 2/3.
pub fn surface_clouds_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("surface_clouds_bind_group_layout"),
    })
}

/// One cube texture at binding 0 and its sampler at binding 1.
pub fn cube_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::Cube,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("cube_bind_group_layout"),
    })
}

/// Decode image bytes, guessing the format from the content.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> anyhow::Result<DynamicImage> {
    let data = load_binary(path)?;
    decode_image(&data)
}

/// Load a 2D texture in `format`.
///
/// The image is flipped vertically so OBJ texture coordinates, which start at
/// the bottom-left, address it correctly. A file that cannot be read or decoded
/// is logged and replaced by a black placeholder.
pub fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
    format: wgpu::TextureFormat,
    label: &str,
) -> Texture {
    match load_image(path) {
        Ok(img) => {
            log::info!("Loaded texture {:?} ({}x{})", path, img.width(), img.height());
            Texture::from_image(device, queue, &img.flipv(), format, Some(label))
        }
        Err(e) => {
            log::error!("Failed to load texture {:?}: {:#}", path, e);
            Texture::placeholder(device, queue, format, label)
        }
    }
}

/// The skybox face files in cubemap layer order (+X, -X, +Y, -Y, +Z, -Z).
pub fn cube_face_paths(faces: &SkyboxFaces) -> [(CubeFace, &Path); 6] {
    [
        (CubeFace::PositiveX, faces.right.as_path()),
        (CubeFace::NegativeX, faces.left.as_path()),
        (CubeFace::PositiveY, faces.top.as_path()),
        (CubeFace::NegativeY, faces.bottom.as_path()),
        (CubeFace::PositiveZ, faces.back.as_path()),
        (CubeFace::NegativeZ, faces.front.as_path()),
    ]
}

/// Load the six skybox faces into a cubemap. Faces that fail to load are
/// logged and left empty.
pub fn load_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    faces: &SkyboxFaces,
    label: &str,
) -> Texture {
    let images = cube_face_paths(faces).map(|(face, path)| match load_image(path) {
        Ok(img) => Some(img),
        Err(e) => {
            log::error!(
                "Cubemap texture failed to load for the {} face at {:?}: {:#}",
                face.skybox_name(),
                path,
                e
            );
            None
        }
    });
    Texture::from_cube_faces(device, queue, &images, label)
}
