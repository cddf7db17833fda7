//! Delaunay triangulation of point sets and its dual Voronoi diagram.
//!
//! This module provides:
//! - [`Triangulation`] / [`Triangulator`]: sweep-hull construction over flat
//!   half-edge arrays
//! - [`Delaunay`]: neighbor iteration, nearest-site lookup and polygons
//! - [`Voronoi`]: cells clipped to a viewport, containment and neighbors

mod delaunator;
mod delaunay;
mod halfedge;
mod hull;
mod voronoi;

pub use delaunator::{points_from_flat, Triangulation, Triangulator};
pub use delaunay::{Delaunay, Neighbors};
pub use halfedge::{edges_of_triangle, next_halfedge, points_of_triangle, prev_halfedge, triangle_of_edge, EMPTY};
pub use voronoi::Voronoi;
