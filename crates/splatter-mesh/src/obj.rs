//! Minimal Wavefront OBJ reader.
//!
//! Only `v` and `f` records are read; texture coordinates, normals, groups and
//! materials are ignored. Polygons are fan triangulated.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use glam::Vec3;
use thiserror::Error;

use crate::Mesh;

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while reading OBJ data")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}

fn malformed(line: usize, message: impl Into<String>) -> ObjError {
    ObjError::Malformed {
        line,
        message: message.into(),
    }
}

/// Resolve one face corner (`7`, `7/2`, `7//3`, `-1`, ...) to a zero based
/// vertex index. `seen` is the number of vertices read so far, used for
/// relative (negative) indices.
fn parse_corner(token: &str, seen: usize, line: usize) -> Result<u32, ObjError> {
    let index_str = token.split('/').next().unwrap_or_default();
    let index: i64 = index_str
        .parse()
        .map_err(|e| malformed(line, format!("invalid vertex index '{token}': {e}")))?;

    let resolved = match index {
        0 => return Err(malformed(line, "vertex index 0 is not valid in OBJ")),
        i if i > 0 => i - 1,
        i => seen as i64 + i,
    };

    u32::try_from(resolved)
        .map_err(|e| malformed(line, format!("vertex index {index} resolves outside the mesh: {e}")))
}

/// Parse OBJ text into a [`Mesh`]. The mesh is not validated.
pub fn parse_obj(reader: impl BufRead) -> Result<Mesh, ObjError> {
    let mut mesh = Mesh::default();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords = parts
                    .take(3)
                    .map(|p| {
                        p.parse::<f32>()
                            .map_err(|e| malformed(line_no, format!("invalid coordinate '{p}': {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let [x, y, z] = coords[..] else {
                    return Err(malformed(line_no, "vertex needs three coordinates"));
                };
                mesh.vertices.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                let seen = mesh.vertices.len();
                let corners = parts
                    .map(|token| parse_corner(token, seen, line_no))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(malformed(
                        line_no,
                        format!("face needs at least 3 vertices, got {}", corners.len()),
                    ));
                }
                for i in 1..corners.len() - 1 {
                    mesh.faces.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

/// Load a mesh from an OBJ file on disk.
pub fn load_obj(path: &Path) -> Result<Mesh, ObjError> {
    let file = File::open(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(BufReader::new(file))?;
    log::info!(
        "Loaded {} ({} vertices, {} faces)",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}
