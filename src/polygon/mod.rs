//! Polygon type, containment and clipping.
//!
//! This module provides:
//! - Signed area and convexity tests
//! - Inclusive point containment for convex polygons
//! - Sutherland-Hodgman clipping against convex polygons and half-planes
//!
//! # Example
//!
//! ```
//! use dualmesh::polygon::{Polygon, sutherland_hodgman};
//! use dualmesh::Point2;
//!
//! let triangle = Polygon::new(vec![
//!     Point2::new(-1.0, -1.0),
//!     Point2::new(3.0, -1.0),
//!     Point2::new(-1.0, 3.0),
//! ]);
//! let window = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//!
//! let clipped = sutherland_hodgman(&triangle, &window);
//! assert!((clipped.area() - 1.0_f64).abs() < 1e-10);
//! ```

mod clip;
mod core;

pub use clip::{clip_half_plane, sutherland_hodgman};
pub use self::core::{polygon_area, polygon_contains, polygon_is_convex, polygon_signed_area, Polygon};
