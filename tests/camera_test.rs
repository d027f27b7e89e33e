use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Transform, Vector4};
use planet_scene::{
    SceneRenderer,
    camera::{Camera, Projection, strip_translation},
};

mod common;
use common::assert_vec_eq;

#[test]
fn default_camera_looks_at_the_origin() {
    let camera = Camera::default();
    assert_eq!(camera.eye, Point3::new(0.0, 1.0, 10.0));
    let centre = camera.view_matrix().transform_point(Point3::new(0.0, 0.0, 0.0));
    // straight ahead in view space
    assert!(centre.x.abs() < 1e-5);
    assert!(centre.y.abs() < 1e-5);
    assert!(centre.z < 0.0);
}

#[test]
fn projection_follows_the_window_aspect() {
    let mut projection = Projection::new(1920, 1080, Deg(65.0), 0.1, 100.0);
    assert!((projection.aspect() - 16.0 / 9.0).abs() < 1e-5);
    projection.resize(1000, 1000);
    assert!((projection.aspect() - 1.0).abs() < 1e-6);
    projection.resize(0, 600);
    assert!((projection.aspect() - 1.0).abs() < 1e-6);
}

#[test]
fn depth_maps_into_zero_to_one() {
    let projection = Projection::new(800, 600, Deg(65.0), 0.1, 100.0);
    let m = projection.calc_matrix();
    let depth = |z: f32| {
        let clip = m * Vector4::new(0.0, 0.0, -z, 1.0);
        clip.z / clip.w
    };
    assert!(depth(0.1).abs() < 1e-4);
    assert!((depth(100.0) - 1.0).abs() < 1e-4);
}

#[test]
fn stripped_view_has_no_translation() {
    for eye in [(0.0, 1.0, 10.0), (3.0, -4.0, 5.0), (-20.0, 7.5, 0.5)] {
        let camera = Camera::new(eye, (0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        let view = camera.view_matrix();
        let stripped = strip_translation(&view);
        assert_vec_eq(&[stripped.w.x, stripped.w.y, stripped.w.z, stripped.w.w], &[0.0, 0.0, 0.0, 1.0]);
        assert_vec_eq(
            &[stripped.x.x, stripped.x.y, stripped.x.z, stripped.x.w],
            &[view.x.x, view.x.y, view.x.z, 0.0],
        );
    }
}

#[test]
fn stripping_identity_is_identity() {
    assert_eq!(strip_translation(&Matrix4::identity()), Matrix4::identity());
}

#[test]
fn renderer_uses_a_65_degree_projection() {
    let renderer = SceneRenderer::new(1920, 1080);
    let expected = Projection::new(1920, 1080, Deg(65.0), 0.1, 100.0).calc_matrix();
    let (view, projection) = renderer.frame_matrices();
    assert_eq!(projection, expected);
    assert_eq!(view, Camera::default().view_matrix());
}
