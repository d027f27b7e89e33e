#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn uploads_meshes_and_builds_scene_objects() {
    use planet_scene::{
        config::{ShaderPaths, SkyboxFaces},
        data_structures::{mesh::{GpuMesh, MeshData}, texture::Texture},
        resources::mesh::load_mesh,
        scene::{Earth, EarthTextures, Object, Skybox},
    };

    let (runtime, ctx) = common::headless();
    let shader = |name: &str| ShaderPaths {
        vertex: common::shader_dir().join(format!("{name}.vert.wgsl")),
        fragment: common::shader_dir().join(format!("{name}.frag.wgsl")),
    };

    let quad = load_mesh(&common::fixture("quad.obj"));
    let gpu = GpuMesh::upload(&ctx.device, &quad, &Earth::STREAMS, "quad");
    assert_eq!(gpu.vertex_count(), 6);
    let empty = GpuMesh::upload(&ctx.device, &MeshData::default(), &Earth::STREAMS, "empty");
    assert_eq!(empty.vertex_count(), 0);

    let textures = EarthTextures {
        day: Texture::placeholder(&ctx.device, &ctx.queue, Texture::COLOR_FORMAT, "day"),
        night: Texture::placeholder(&ctx.device, &ctx.queue, Texture::COLOR_FORMAT, "night"),
        clouds: Texture::placeholder(&ctx.device, &ctx.queue, Texture::DATA_FORMAT, "clouds"),
    };
    let mut earth = runtime
        .block_on(Earth::new(&ctx, &quad, textures, &shader("earth")))
        .unwrap();
    assert_eq!(earth.cycle().main_texture(), 0);
    // the cloud mask is sampled as stored, the surface maps as sRGB
    assert_eq!(earth.textures().clouds.texture.format(), wgpu::TextureFormat::Rgba8Unorm);
    assert!(earth.textures().day.texture.format().is_srgb());
    assert!(!earth.textures().clouds.texture.format().is_srgb());
    earth.switch_time();
    assert_eq!(earth.cycle().main_texture(), 1);
    assert_eq!(earth.light().color, [0.98, 0.859, 0.0]);

    // a mesh that failed to load still produces an object
    let missing = load_mesh(std::path::Path::new("does/not/exist.obj"));
    let object = runtime
        .block_on(Object::new(&ctx, &missing, &shader("object"), "missing"))
        .unwrap();
    assert_eq!(object.vertex_count(), 0);

    // every face missing still yields a usable cubemap
    let faces = SkyboxFaces {
        right: "nope/right.jpg".into(),
        left: "nope/left.jpg".into(),
        top: "nope/top.jpg".into(),
        bottom: "nope/bottom.jpg".into(),
        back: "nope/back.jpg".into(),
        front: "nope/front.jpg".into(),
    };
    assert!(runtime.block_on(Skybox::new(&ctx, &faces, &shader("skybox"))).is_ok());
}

#[test]
#[cfg(feature = "integration-tests")]
fn broken_shaders_are_reported_not_fatal() {
    use planet_scene::{
        config::ShaderPaths, data_structures::mesh::MeshData, pipelines::shader::ShaderError,
        scene::Object,
    };

    let (runtime, ctx) = common::headless();
    let mesh = MeshData::default();

    let missing = ShaderPaths {
        vertex: "does/not/exist.vert.wgsl".into(),
        fragment: common::shader_dir().join("object.frag.wgsl"),
    };
    let err = runtime
        .block_on(Object::new(&ctx, &mesh, &missing, "missing source"))
        .err()
        .unwrap();
    assert!(matches!(err, ShaderError::Source { .. }));

    let broken = ShaderPaths {
        vertex: common::fixture("broken.vert.wgsl"),
        fragment: common::shader_dir().join("object.frag.wgsl"),
    };
    let err = runtime
        .block_on(Object::new(&ctx, &mesh, &broken, "broken"))
        .err()
        .unwrap();
    match err {
        ShaderError::Compile { label, diagnostic } => {
            assert_eq!(label, "broken");
            assert!(!diagnostic.is_empty());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn oversized_images_are_downscaled_to_the_device_limit() {
    use image::{DynamicImage, RgbaImage};
    use planet_scene::{data_structures::texture::Texture, resources::texture::load_texture};

    let (_runtime, ctx) = common::headless();
    let limit = ctx.device.limits().max_texture_dimension_2d;

    let wide = DynamicImage::ImageRgba8(RgbaImage::new(limit + 2, 2));
    let texture = Texture::from_image(
        &ctx.device,
        &ctx.queue,
        &wide,
        Texture::COLOR_FORMAT,
        Some("wide"),
    );
    let size = texture.texture.size();
    assert_eq!(size.width, limit);
    assert_eq!(size.height, 1);

    let missing = load_texture(
        &ctx.device,
        &ctx.queue,
        std::path::Path::new("does/not/exist.png"),
        Texture::DATA_FORMAT,
        "missing",
    );
    assert_eq!(missing.texture.format(), Texture::DATA_FORMAT);
}
