//! Triangle and mesh containers.
//!
//! The slicer consumes triangles as ordered edge triples rather than vertex
//! triples: slicing (see the `slice` module) walks edges, and the cyclic
//! edge structure is the invariant the rest of the pipeline relies on.

use crate::geometry::Point3;
use serde::{Deserialize, Serialize};

/// A triangle stored as three directed edges sharing endpoints cyclically.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    edges: [(Point3, Point3); 3],
}

impl Triangle {
    /// Build a triangle from three vertices; edges run `a→b`, `b→c`, `c→a`.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            edges: [(a, b), (b, c), (c, a)],
        }
    }

    /// The three directed edges.
    #[inline]
    pub fn edges(&self) -> &[(Point3, Point3); 3] {
        &self.edges
    }

    /// The three vertices, in construction order.
    pub fn vertices(&self) -> [Point3; 3] {
        [self.edges[0].0, self.edges[1].0, self.edges[2].0]
    }

    /// Minimum and maximum z over the vertices.
    pub fn z_range(&self) -> (f64, f64) {
        let zs = self.vertices().map(|v| v.z());
        (
            zs.iter().copied().fold(f64::INFINITY, f64::min),
            zs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        )
    }
}

/// An in-memory triangle soup, the slicer's mesh input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create a mesh from a list of triangles.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh holds no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Overall z extent of the mesh, `None` when empty.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.triangles
            .iter()
            .map(Triangle::z_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}
