//! Triangle mesh storage for silhouette reconstruction.

use serde::{Deserialize, Serialize};

use crate::core::types::{Point2, Vec3};

/// A textured triangle mesh covering one user's silhouette.
///
/// The vertex and texture-coordinate arrays span the full depth grid;
/// triangle indices reference only the cells classified as body.
/// Rebuilt wholesale on every reconstruction, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMesh {
    /// Camera-space vertices, one per depth-grid cell
    pub vertices: Vec<Vec3>,
    /// Color-image coordinates parallel to `vertices`
    pub tex_coords: Vec<Point2>,
    /// Vertex indices, three per triangle
    pub triangle_indices: Vec<u32>,
}

impl BodyMesh {
    /// Creates an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all geometry, keeping allocations for reuse
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.tex_coords.clear();
        self.triangle_indices.clear();
    }

    /// Number of emitted triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// True when no triangle was emitted
    pub fn is_empty(&self) -> bool {
        self.triangle_indices.is_empty()
    }

    /// Triangles as vertex-index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mesh_is_empty() {
        let mesh = BodyMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_triangle_iteration() {
        let mesh = BodyMesh {
            vertices: vec![Vec3::ZERO; 6],
            tex_coords: vec![Point2::default(); 6],
            triangle_indices: vec![0, 1, 2, 3, 4, 5],
        };
        let tris: Vec<[u32; 3]> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_clear_drops_geometry() {
        let mut mesh = BodyMesh {
            vertices: vec![Vec3::ZERO; 3],
            tex_coords: vec![Point2::default(); 3],
            triangle_indices: vec![0, 1, 2],
        };
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());
        assert!(mesh.tex_coords.is_empty());
    }
}
