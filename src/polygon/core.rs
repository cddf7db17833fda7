//! Core polygon type and basic operations.

use crate::primitives::Point2;
use crate::tolerance::signed_area2;
use num_traits::Float;

/// A simple polygon represented as a sequence of vertices.
///
/// Vertices are stored in counter-clockwise order. The polygon is implicitly
/// closed (the last vertex connects to the first).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The vertices of the polygon in CCW order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    ///
    /// The vertices should be in counter-clockwise order for a positive area.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.vertices)
    }

    /// Returns the absolute area of the polygon.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Tests if a point lies inside or on the boundary of a convex CCW polygon.
    ///
    /// Uses the same left-of-edge test as [`sutherland_hodgman`](crate::polygon::sutherland_hodgman),
    /// so a clipped polygon contains exactly the points its clip kept.
    pub fn contains(&self, point: Point2<F>) -> bool {
        polygon_contains(&self.vertices, point)
    }

    /// Tests if the polygon is convex.
    pub fn is_convex(&self) -> bool {
        polygon_is_convex(&self.vertices)
    }

    /// Ensures the polygon has CCW winding order.
    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < F::zero() {
            self.vertices.reverse();
        }
    }

    /// Removes consecutive vertices closer than `eps` on both axes,
    /// including the wrap-around pair formed by the last and first vertex.
    pub fn remove_coincident(&mut self, eps: F) {
        self.vertices.dedup_by(|next, prev| next.approx_eq(*prev, eps));
        while self.vertices.len() > 1 {
            let first = self.vertices[0];
            match self.vertices.last() {
                Some(&last) if last.approx_eq(first, eps) => {
                    self.vertices.pop();
                }
                _ => break,
            }
        }
    }
}

/// Computes the signed area of a polygon using the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y;
        area = area - vertices[j].x * vertices[i].y;
    }

    area / (F::one() + F::one())
}

/// Computes the absolute area of a polygon.
pub fn polygon_area<F: Float>(vertices: &[Point2<F>]) -> F {
    polygon_signed_area(vertices).abs()
}

/// Tests if a point lies inside or on the boundary of a convex CCW polygon.
///
/// Returns false for polygons with fewer than 3 vertices.
pub fn polygon_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let n = vertices.len();
    (0..n).all(|i| is_left_or_on(point, vertices[i], vertices[(i + 1) % n]))
}

/// Tests if a polygon is convex.
///
/// Returns true if all cross products of consecutive edges have the same sign.
pub fn polygon_is_convex<F: Float>(vertices: &[Point2<F>]) -> bool {
    if vertices.len() < 3 {
        return true; // Degenerate cases are considered convex
    }

    let n = vertices.len();
    let mut sign: Option<bool> = None;

    for i in 0..n {
        let cross = signed_area2(vertices[i], vertices[(i + 1) % n], vertices[(i + 2) % n]);

        if cross.abs() > F::epsilon() {
            let is_positive = cross > F::zero();
            match sign {
                None => sign = Some(is_positive),
                Some(s) if s != is_positive => return false,
                _ => {}
            }
        }
    }

    true
}

/// Tests if a point is on the left of, or on, the directed line `start -> end`.
#[inline]
pub(crate) fn is_left_or_on<F: Float>(point: Point2<F>, start: Point2<F>, end: Point2<F>) -> bool {
    signed_area2(start, end, point) >= F::zero()
}
