use std::{io::Cursor, path::Path};

use planet_scene::{
    data_structures::mesh::{MeshData, VertexStream},
    resources::mesh::{FaceAttributes, load_mesh, parse_obj, scan_face_attributes, try_load_mesh},
};

mod common;
use common::{assert_vec_eq, fixture};

fn parse(text: &str) -> anyhow::Result<MeshData> {
    parse_obj(&mut Cursor::new(text.as_bytes()), "inline")
}

#[test]
fn triangle_flattens_to_three_vertices() {
    let mesh = load_mesh(&fixture("triangle.obj"));
    assert_eq!(mesh.vertex_count(), 3);
    assert_vec_eq(
        &mesh.positions,
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    );
    assert!(!mesh.has_normals());
    assert!(!mesh.has_texcoords());
}

#[test]
fn quad_is_triangulated_and_keeps_all_attributes() {
    // the referenced material library does not exist and must not matter
    let mesh = try_load_mesh(&fixture("quad.obj")).unwrap();
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.positions.len(), 3 * 6);
    assert_eq!(mesh.normals.len(), 3 * 6);
    assert_eq!(mesh.texcoords.len(), 2 * 6);
    for normal in mesh.normals.chunks_exact(3) {
        assert_vec_eq(normal, &[0.0, 0.0, 1.0]);
    }
    // texcoords follow their own indices, not the position indices
    for (position, uv) in mesh.positions.chunks_exact(3).zip(mesh.texcoords.chunks_exact(2)) {
        assert_vec_eq(uv, &[(position[0] + 1.0) / 2.0, (position[1] + 1.0) / 2.0]);
    }
}

#[test]
fn normals_are_dropped_when_any_face_lacks_them() {
    let mesh = load_mesh(&fixture("partial_normals.obj"));
    assert_eq!(mesh.vertex_count(), 6);
    assert!(mesh.normals.is_empty());
    assert!(mesh.attribute(VertexStream::Normal).is_none());
}

#[test]
fn trailing_group_without_faces_keeps_attributes() {
    let mesh = load_mesh(&fixture("trailing_group.obj"));
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.normals.len(), 9);
    assert_eq!(mesh.texcoords.len(), 6);
}

#[test]
fn face_without_normals_in_the_same_object_drops_them() {
    let mesh = parse(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 1 0 0\nf 1//2 2//2 3//2\nf 1 2 3\n",
    )
    .unwrap();
    assert_eq!(mesh.vertex_count(), 6);
    assert!(mesh.normals.is_empty());
    assert!(mesh.texcoords.is_empty());
}

#[test]
fn face_without_texcoords_in_the_same_object_drops_them() {
    let mesh = parse(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\nf 1//1 2//1 3//1\n",
    )
    .unwrap();
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.normals.len(), 18);
    assert!(mesh.texcoords.is_empty());
}

#[test]
fn face_scan_reports_attributes_every_corner_names() {
    let full = FaceAttributes {
        normals: true,
        texcoords: true,
    };
    assert_eq!(scan_face_attributes("v 0 0 0\n"), full);
    assert_eq!(scan_face_attributes("f 1/1/1 2/2/2 3/3/3\n"), full);
    assert_eq!(
        scan_face_attributes("f 1//1 2//1 3//1\n"),
        FaceAttributes {
            normals: true,
            texcoords: false,
        }
    );
    assert_eq!(
        scan_face_attributes("f 1/1 2/2 3/3\nf 1/1/1 2/2/2 3/3/3\n"),
        FaceAttributes {
            normals: false,
            texcoords: true,
        }
    );
    // "fo" is not a face statement
    assert_eq!(scan_face_attributes("fo 1 2 3\n"), full);
}

#[test]
fn attribute_lengths_stay_parallel() {
    let mesh = parse(
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1//1 3//1 4//1\n",
    )
    .unwrap();
    let n = mesh.vertex_count();
    assert_eq!(n, 6);
    assert_eq!(mesh.positions.len(), 3 * n);
    assert_eq!(mesh.normals.len(), 3 * n);
    assert!(mesh.texcoords.is_empty());
}

#[test]
fn missing_file_yields_an_empty_mesh() {
    let mesh = load_mesh(Path::new("does/not/exist.obj"));
    assert_eq!(mesh.vertex_count(), 0);
    assert!(mesh.is_empty());
    assert!(try_load_mesh(Path::new("does/not/exist.obj")).is_err());
}

#[test]
fn face_pointing_past_the_vertex_list_is_an_error() {
    assert!(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").is_err());
}

#[test]
fn empty_source_parses_to_nothing() {
    let mesh = parse("# nothing here\n").unwrap();
    assert!(mesh.is_empty());
}

#[test]
fn stream_layouts_use_one_slot_per_attribute() {
    let layouts = planet_scene::data_structures::mesh::stream_layouts(&[
        VertexStream::Position,
        VertexStream::Normal,
        VertexStream::TexCoord,
    ]);
    let strides: Vec<_> = layouts.iter().map(|l| l.array_stride).collect();
    assert_eq!(strides, vec![12, 12, 8]);
    let locations: Vec<_> = layouts.iter().map(|l| l.attributes[0].shader_location).collect();
    assert_eq!(locations, vec![0, 1, 2]);
}
