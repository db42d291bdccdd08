//! Padlock wireframe model
//!
//! Reads a small OBJ subset: `v` vertex lines plus `l` polylines and `f`
//! faces, reduced to a deduplicated edge list for wireframe rendering.
//! Normals, texture coordinates, groups and materials are ignored. Indices
//! are 1-based and must reference previously declared vertices.

use std::collections::HashSet;

use crate::math::Vec3;

use super::AssetError;

/// A wireframe mesh: vertices in model space plus undirected edges
#[derive(Debug, Clone)]
pub struct LockModel {
    vertices: Vec<Vec3>,
    edges: Vec<(usize, usize)>,
}

impl LockModel {
    /// Parse OBJ text into a wireframe
    pub fn parse_obj(text: &str) -> Result<Self, AssetError> {
        let mut vertices: Vec<Vec3> = Vec::new();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for (line_no, raw) in text.lines().enumerate() {
            let mut parts = raw.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };
            match keyword {
                "v" => {
                    let x = next_coord(&mut parts, line_no)?;
                    let y = next_coord(&mut parts, line_no)?;
                    let z = next_coord(&mut parts, line_no)?;
                    vertices.push(Vec3::new(x, y, z));
                }
                "l" | "f" => {
                    let indices = parts
                        .map(|token| parse_index(token, vertices.len(), line_no))
                        .collect::<Result<Vec<usize>, AssetError>>()?;
                    if indices.len() < 2 {
                        return Err(AssetError::InvalidModel(format!(
                            "line {}: '{}' element needs at least two vertices",
                            line_no + 1,
                            keyword
                        )));
                    }
                    for pair in indices.windows(2) {
                        add_edge(&mut edges, &mut seen, pair[0], pair[1]);
                    }
                    // faces close their loop
                    if keyword == "f" && indices.len() > 2 {
                        add_edge(&mut edges, &mut seen, indices[indices.len() - 1], indices[0]);
                    }
                }
                _ => {}
            }
        }

        if vertices.is_empty() {
            return Err(AssetError::InvalidModel("no vertices".to_string()));
        }
        if edges.is_empty() {
            return Err(AssetError::InvalidModel("no edges".to_string()));
        }

        Ok(LockModel { vertices, edges })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Undirected edges as vertex index pairs, each listed once
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn add_edge(
    edges: &mut Vec<(usize, usize)>,
    seen: &mut HashSet<(usize, usize)>,
    a: usize,
    b: usize,
) {
    if a == b {
        return;
    }
    let key = (a.min(b), a.max(b));
    if seen.insert(key) {
        edges.push(key);
    }
}

fn next_coord<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<f64, AssetError> {
    let token = parts.next().ok_or_else(|| {
        AssetError::InvalidModel(format!("line {}: vertex needs three coordinates", line_no + 1))
    })?;
    token.parse().map_err(|_| {
        AssetError::InvalidModel(format!("line {}: bad coordinate '{}'", line_no + 1, token))
    })
}

/// Accepts `7`, `7/2`, `7/2/3` and `7//3` forms, returning the 0-based index
fn parse_index(token: &str, vertex_count: usize, line_no: usize) -> Result<usize, AssetError> {
    let raw = token.split('/').next().unwrap_or(token);
    let idx: usize = raw.parse().map_err(|_| {
        AssetError::InvalidModel(format!("line {}: bad vertex index '{}'", line_no + 1, token))
    })?;
    if idx == 0 || idx > vertex_count {
        return Err(AssetError::InvalidModel(format!(
            "line {}: vertex index {} out of range",
            line_no + 1,
            idx
        )));
    }
    Ok(idx - 1)
}

/// Load a wireframe model from disk
pub async fn load_model(path: &str) -> Result<LockModel, AssetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AssetError::Read {
            path: path.to_string(),
            source: e,
        })?;
    LockModel::parse_obj(&text)
}
