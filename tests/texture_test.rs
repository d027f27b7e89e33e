use std::{io::Cursor, path::Path};

use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};
use planet_scene::{
    config::SkyboxFaces,
    data_structures::texture::{CubeFace, Texture, fit_image, fit_within, mip_level_count},
    resources::texture::{cube_face_paths, decode_image, load_image},
};

#[test]
fn mip_chain_goes_down_to_one_pixel() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2, 2), 2);
    assert_eq!(mip_level_count(3, 5), 3);
    assert_eq!(mip_level_count(2048, 1024), 12);
    assert_eq!(mip_level_count(0, 0), 1);
}

#[test]
fn cube_faces_are_in_layer_order() {
    let layers: Vec<_> = CubeFace::ALL.iter().map(|face| face.layer()).collect();
    assert_eq!(layers, vec![0, 1, 2, 3, 4, 5]);
    let names: Vec<_> = CubeFace::ALL.iter().map(|face| face.skybox_name()).collect();
    assert_eq!(names, vec!["right", "left", "top", "bottom", "back", "front"]);
}

#[test]
fn skybox_files_map_onto_faces() {
    let faces = SkyboxFaces::default();
    for (expected, (face, path)) in CubeFace::ALL.iter().zip(cube_face_paths(&faces)) {
        assert_eq!(*expected, face);
        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert_eq!(stem, face.skybox_name());
    }
}

#[test]
fn decodes_in_memory_png() {
    let mut img = RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

    let decoded = decode_image(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (4, 2));
    assert_eq!(decoded.to_rgba8().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    // textures are uploaded flipped so OBJ texcoords address them bottom-up
    assert_eq!(decoded.flipv().to_rgba8().get_pixel(0, 1), &Rgba([255, 0, 0, 255]));
}

#[test]
fn garbage_and_missing_files_are_errors() {
    assert!(decode_image(b"definitely not an image").is_err());
    assert!(load_image(Path::new("does/not/exist.png")).is_err());
}

#[test]
fn oversized_sizes_shrink_to_the_limit_keeping_aspect() {
    assert_eq!(fit_within(1024, 512, 2048), None);
    assert_eq!(fit_within(2048, 2048, 2048), None);
    assert_eq!(fit_within(16384, 8192, 8192), Some((8192, 4096)));
    assert_eq!(fit_within(100, 30000, 8192), Some((27, 8192)));
    // very thin images keep at least one pixel
    assert_eq!(fit_within(20000, 1, 8192), Some((8192, 1)));
}

#[test]
fn fit_image_resizes_only_when_needed() {
    let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 4, Rgba([9, 9, 9, 255])));
    assert!(fit_image(&img, 8).is_none());
    let small = fit_image(&img, 2).unwrap();
    assert_eq!(small.dimensions(), (2, 1));
}

#[test]
fn mask_textures_are_not_srgb() {
    assert!(Texture::COLOR_FORMAT.is_srgb());
    assert!(!Texture::DATA_FORMAT.is_srgb());
    assert_eq!(Texture::DATA_FORMAT, Texture::COLOR_FORMAT.remove_srgb_suffix());
}
