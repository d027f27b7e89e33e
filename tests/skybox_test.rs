use cgmath::{Point3, Transform, Vector3};
use planet_scene::{
    camera::{Camera, strip_translation},
    pipelines::shader::RasterState,
    scene::{
        DRAW_ORDER, DrawLayer, Scene,
        skybox::{SKYBOX_RASTER, Skybox, cube_mesh},
    },
};

mod common;
use common::shader_dir;

#[test]
fn cube_is_twelve_position_only_triangles() {
    let mesh = cube_mesh();
    assert_eq!(mesh.vertex_count(), 36);
    assert!(mesh.normals.is_empty());
    assert!(mesh.texcoords.is_empty());
    assert_eq!(Skybox::STREAMS.len(), 1);
}

#[test]
fn every_cube_vertex_lies_on_the_unit_cube_surface() {
    for vertex in cube_mesh().positions.chunks_exact(3) {
        assert!(vertex.iter().all(|c| c.abs() <= 1.0), "{vertex:?}");
        assert!(vertex.iter().any(|c| c.abs() == 1.0), "{vertex:?}");
    }
}

#[test]
fn each_cube_side_gets_two_triangles() {
    let mesh = cube_mesh();
    let mut sides = std::collections::HashMap::new();
    for triangle in mesh.positions.chunks_exact(9) {
        let corners: Vec<_> = triangle.chunks_exact(3).collect();
        // the axis all three corners share names the side
        let side = (0..3)
            .find_map(|axis| {
                let value = corners[0][axis];
                corners
                    .iter()
                    .all(|c| c[axis] == value)
                    .then_some((axis, value > 0.0))
            })
            .unwrap();
        *sides.entry(side).or_insert(0) += 1;
    }
    assert_eq!(sides.len(), 6);
    assert!(sides.values().all(|&count| count == 2));
}

#[test]
fn sky_passes_on_a_cleared_depth_and_never_writes_it() {
    assert_eq!(SKYBOX_RASTER.depth_compare, wgpu::CompareFunction::LessEqual);
    assert!(!SKYBOX_RASTER.depth_write_enabled);
    assert_eq!(SKYBOX_RASTER.polygon_mode, wgpu::PolygonMode::Fill);

    let opaque = RasterState::default();
    assert_eq!(opaque.depth_compare, wgpu::CompareFunction::Less);
    assert!(opaque.depth_write_enabled);
}

#[test]
fn sky_vertex_shader_pins_depth_to_the_far_plane() {
    let source = std::fs::read_to_string(shader_dir().join("skybox.vert.wgsl")).unwrap();
    assert!(source.contains(".xyww"));
}

#[test]
fn sky_view_ignores_camera_position() {
    let near = Camera::new((0.0, 1.0, 10.0), (0.0, 0.0, 0.0), Vector3::unit_y());
    // same orientation, far away
    let far = Camera::new((0.0, 51.0, 500.0), (0.0, 50.0, 490.0), Vector3::unit_y());
    let a = strip_translation(&near.view_matrix());
    let b = strip_translation(&far.view_matrix());
    common::assert_vec_eq(
        AsRef::<[f32; 16]>::as_ref(&a),
        AsRef::<[f32; 16]>::as_ref(&b),
    );
    let origin = a.transform_point(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(origin, Point3::new(0.0, 0.0, 0.0));
}

#[test]
fn sky_is_drawn_after_the_opaque_objects() {
    let position = |layer| DRAW_ORDER.iter().position(|&l| l == layer).unwrap();
    assert_eq!(
        DRAW_ORDER,
        [
            DrawLayer::Plane,
            DrawLayer::Earth,
            DrawLayer::Skybox,
            DrawLayer::Wireframes
        ]
    );
    assert!(position(DrawLayer::Skybox) > position(DrawLayer::Plane));
    assert!(position(DrawLayer::Skybox) > position(DrawLayer::Earth));
}

#[test]
fn empty_scene_has_nothing_to_draw() {
    let scene = Scene::default();
    for layer in DRAW_ORDER {
        assert_eq!(scene.layer_len(layer), 0);
    }
}
