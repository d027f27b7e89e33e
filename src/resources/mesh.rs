use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use anyhow::{Context as _, bail};

use crate::data_structures::mesh::MeshData;

/**
 * Load an OBJ file into flat, triangulated arrays.
 *
 * Never fails: a missing or malformed file is logged and yields an empty
 * mesh, so the owning object is still built and simply draws nothing.
 */
pub fn load_mesh(path: &Path) -> MeshData {
    match try_load_mesh(path) {
        Ok(mesh) => {
            log::info!(
                "Loaded {:?}: {} vertices (normals: {}, texcoords: {})",
                path,
                mesh.vertex_count(),
                mesh.has_normals(),
                mesh.has_texcoords()
            );
            mesh
        }
        Err(e) => {
            log::error!("Unable to load mesh {:?}: {:#}", path, e);
            MeshData::default()
        }
    }
}

pub fn try_load_mesh(path: &Path) -> anyhow::Result<MeshData> {
    let file = File::open(path).with_context(|| format!("could not open {:?}", path))?;
    let label = path.display().to_string();
    parse_obj(&mut BufReader::new(file), &label)
}

/// Which optional attributes every face-vertex of an OBJ source references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceAttributes {
    pub normals: bool,
    pub texcoords: bool,
}

/**
 * Scan the `f` statements of an OBJ source.
 *
 * A face-vertex is written `v`, `v/t`, `v//n` or `v/t/n`; an attribute only
 * counts as present if every face-vertex names it. A source without faces
 * reports both as present.
 */
pub fn scan_face_attributes(source: &str) -> FaceAttributes {
    let mut attributes = FaceAttributes {
        normals: true,
        texcoords: true,
    };
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("f") {
            continue;
        }
        for corner in tokens {
            let mut parts = corner.split('/').skip(1);
            let texcoord = parts.next();
            let normal = parts.next();
            attributes.texcoords &= texcoord.is_some_and(|t| !t.is_empty());
            attributes.normals &= normal.is_some_and(|n| !n.is_empty());
        }
    }
    attributes
}

/**
 * Parse OBJ text from any reader.
 *
 * Faces are triangulated and every face-vertex is written out in full; no
 * index reuse. `mtllib` statements are ignored since materials are not used.
 * Normals and texture coordinates are all-or-nothing: if any face-vertex lacks
 * one, that whole attribute is dropped. Groups without faces are skipped.
 */
pub fn parse_obj<R: BufRead>(reader: &mut R, label: &str) -> anyhow::Result<MeshData> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .with_context(|| format!("could not read {label}"))?;
    let referenced = scan_face_attributes(&source);

    let (models, _materials) = tobj::load_obj_buf(
        &mut source.as_bytes(),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        },
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .with_context(|| format!("could not parse {label}"))?;

    let models: Vec<_> = models
        .iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .collect();
    let with_normals = referenced.normals
        && models.iter().all(|model| {
            let m = &model.mesh;
            !m.normals.is_empty() && m.normal_indices.len() == m.indices.len()
        });
    let with_texcoords = referenced.texcoords
        && models.iter().all(|model| {
            let m = &model.mesh;
            !m.texcoords.is_empty() && m.texcoord_indices.len() == m.indices.len()
        });
    if !with_normals && models.iter().any(|model| !model.mesh.normals.is_empty()) {
        log::warn!("{label}: some faces have no normals, dropping all normals");
    }
    if !with_texcoords && models.iter().any(|model| !model.mesh.texcoords.is_empty()) {
        log::warn!("{label}: some faces have no texture coordinates, dropping all of them");
    }

    let mut mesh = MeshData::default();
    for model in models {
        let m = &model.mesh;
        for (corner, &index) in m.indices.iter().enumerate() {
            push_attribute(&mut mesh.positions, &m.positions, index, 3, label, &model.name)?;
            if with_normals {
                let n = m.normal_indices[corner];
                push_attribute(&mut mesh.normals, &m.normals, n, 3, label, &model.name)?;
            }
            if with_texcoords {
                let t = m.texcoord_indices[corner];
                push_attribute(&mut mesh.texcoords, &m.texcoords, t, 2, label, &model.name)?;
            }
        }
    }

    Ok(mesh)
}

fn push_attribute(
    out: &mut Vec<f32>,
    source: &[f32],
    index: u32,
    width: usize,
    label: &str,
    model: &str,
) -> anyhow::Result<()> {
    let start = index as usize * width;
    match source.get(start..start + width) {
        Some(values) => {
            out.extend_from_slice(values);
            Ok(())
        }
        None => bail!(
            "{label}: index {index} out of range in object {model:?} ({} values available)",
            source.len() / width
        ),
    }
}
