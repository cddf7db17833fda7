//! dualmesh - Planar Delaunay triangulation and Voronoi diagrams
//!
//! Points go in, a triangulation stored as flat half-edge arrays comes out,
//! and the dual Voronoi diagram is derived from it with every cell clipped to
//! a rectangular viewport.
//!
//! ```
//! use dualmesh::{Delaunay, Point2, Viewport};
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//!     Point2::new(1.0, 1.0),
//! ];
//!
//! let delaunay = Delaunay::new(&points).unwrap();
//! assert_eq!(delaunay.triangulation().len(), 4);
//!
//! let viewport = Viewport::from_extents(0.0, 0.0, 2.0, 2.0).unwrap();
//! let voronoi = delaunay.voronoi(viewport).unwrap();
//! let center = voronoi.cell_polygon(4).unwrap();
//! assert!((center.area() - 2.0).abs() < 1e-12);
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod tolerance;
pub mod triangulation;

pub use bounds::{Aabb2, Viewport};
pub use config::{NonFinitePolicy, TriangulatorConfig};
pub use error::DelaunayError;
pub use polygon::Polygon;
pub use primitives::{Point2, Vec2};
pub use triangulation::{Delaunay, Triangulation, Triangulator, Voronoi, EMPTY};
