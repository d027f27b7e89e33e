//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! with constructors for 2D color maps (with a CPU-generated mip chain),
//! six-face cubemaps, black placeholders and depth buffers.

use std::borrow::Cow;

use anyhow::*;
use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};

/// A GPU texture with a view and optional sampler.
///
/// Typically created via [`from_image`](Self::from_image),
/// [`from_cube_faces`](Self::from_cube_faces) or
/// [`create_depth_texture`](Self::create_depth_texture).
#[derive(Clone, Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

/// Cubemap faces in GPU layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Array layer of this face inside the cube texture.
    pub fn layer(self) -> u32 {
        self as u32
    }

    /// Which skybox image feeds this face.
    pub fn skybox_name(self) -> &'static str {
        match self {
            CubeFace::PositiveX => "right",
            CubeFace::NegativeX => "left",
            CubeFace::PositiveY => "top",
            CubeFace::NegativeY => "bottom",
            CubeFace::PositiveZ => "back",
            CubeFace::NegativeZ => "front",
        }
    }
}

/// The largest size with the same aspect ratio whose sides fit in `max_dimension`.
///
/// `None` when the size already fits. Sides never shrink below one pixel.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max_dimension {
        return None;
    }
    let scale = |side: u32| ((side as u64 * max_dimension as u64) / longest as u64).max(1) as u32;
    Some((scale(width), scale(height)))
}

/// Downscale `img` if either side exceeds `max_dimension`.
pub fn fit_image(img: &DynamicImage, max_dimension: u32) -> Option<DynamicImage> {
    let (width, height) = fit_within(img.width(), img.height(), max_dimension)?;
    Some(img.resize_exact(width, height, FilterType::Triangle))
}

fn fit_to_device<'a>(
    device: &wgpu::Device,
    img: &'a DynamicImage,
    label: &str,
) -> Cow<'a, DynamicImage> {
    let limit = device.limits().max_texture_dimension_2d;
    match fit_image(img, limit) {
        Some(resized) => {
            log::warn!(
                "{label}: {}x{} exceeds the device limit of {limit}, downscaled to {}x{}",
                img.width(),
                img.height(),
                resized.width(),
                resized.height()
            );
            Cow::Owned(resized)
        }
        None => Cow::Borrowed(img),
    }
}

/// Number of mip levels in a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Color textures are sampled as sRGB.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
    /// Masks and other non-color data are sampled as stored.
    pub const DATA_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// A 1x1 opaque black texture.
    ///
    /// Stands in for a texture whose image could not be decoded, so the owning
    /// object keeps a valid binding.
    pub fn placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        label: &str,
    ) -> Self {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255])));
        Self::from_image(device, queue, &img, format, Some(label))
    }

    /// Upload a decoded image as a mipmapped 2D texture.
    ///
    /// `format` is [`COLOR_FORMAT`](Self::COLOR_FORMAT) for color maps and
    /// [`DATA_FORMAT`](Self::DATA_FORMAT) for masks. Images larger than the
    /// device allows are downscaled first. Wrapping is clamp-to-edge;
    /// magnification, minification and mip selection all filter linearly.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        format: wgpu::TextureFormat,
        label: Option<&str>,
    ) -> Self {
        let img = fit_to_device(device, img, label.unwrap_or("texture"));
        let (width, height) = img.dimensions();
        let mip_level_count = mip_level_count(width, height);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut level = img.to_rgba8();
        for mip_level in 0..mip_level_count {
            if mip_level > 0 {
                let w = (width >> mip_level).max(1);
                let h = (height >> mip_level).max(1);
                level = image::imageops::resize(&level, w, h, FilterType::Triangle);
            }
            write_layer(queue, &texture, &level, mip_level, 0);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_clamped_sampler(device, wgpu::FilterMode::Linear));

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Build a cubemap from up to six decoded faces, in [`CubeFace::ALL`] order.
    ///
    /// Faces larger than the device allows are downscaled. The face size is
    /// taken from the first face present. Missing faces, and faces that are not
    /// square or do not match that size, stay zeroed.
    pub fn from_cube_faces(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        faces: &[Option<DynamicImage>; 6],
        label: &str,
    ) -> Self {
        let faces = faces
            .each_ref()
            .map(|face| face.as_ref().map(|img| fit_to_device(device, img, label)));
        let face_size = faces
            .iter()
            .flatten()
            .map(|img| img.width())
            .next()
            .unwrap_or(1);
        if faces.iter().all(Option::is_none) {
            log::error!("{label}: no cubemap face could be loaded");
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: face_size,
                height: face_size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (face, img) in CubeFace::ALL.iter().zip(faces.iter()) {
            let Some(img) = img else {
                continue;
            };
            let (w, h) = img.dimensions();
            if w != face_size || h != face_size {
                log::error!(
                    "{label}: {} face is {w}x{h}, expected {face_size}x{face_size}; leaving it empty",
                    face.skybox_name()
                );
                continue;
            }
            write_layer(queue, &texture, &img.to_rgba8(), 0, face.layer());
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = Some(create_clamped_sampler(device, wgpu::FilterMode::Nearest));

        Self {
            texture,
            view,
            sampler,
        }
    }

    pub fn sampler(&self) -> Result<&wgpu::Sampler> {
        self.sampler
            .as_ref()
            .ok_or_else(|| anyhow!("texture has no sampler"))
    }
}

fn write_layer(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    rgba: &RgbaImage,
    mip_level: u32,
    layer: u32,
) {
    let (width, height) = rgba.dimensions();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Clamp-to-edge on every axis with linear texel filtering.
pub fn create_clamped_sampler(device: &wgpu::Device, mipmap_filter: wgpu::FilterMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter,
        ..Default::default()
    })
}
