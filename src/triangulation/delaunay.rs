//! Query layer over a Delaunay triangulation.
//!
//! [`Delaunay`] owns the input points together with their [`Triangulation`]
//! and indexes it for neighbor iteration and nearest-site lookup.
//!
//! # Complexity
//!
//! - Build: O(n log n) expected
//! - Neighbors: O(degree) per point
//! - Find: O(sqrt(n)) expected for a random start on uniform points
//!
//! # Example
//!
//! ```
//! use dualmesh::{Delaunay, Point2};
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(0.0, 4.0),
//!     Point2::new(1.0, 1.0),
//! ];
//!
//! let delaunay = Delaunay::new(&points).unwrap();
//!
//! let mut neighbors: Vec<usize> = delaunay.neighbors(3).collect();
//! neighbors.sort_unstable();
//! assert_eq!(neighbors, vec![0, 1, 2]);
//!
//! assert_eq!(delaunay.find(Point2::new(3.5, 0.2), 0), Some(1));
//! ```

use super::delaunator::{points_from_flat, Triangulation, Triangulator};
use super::halfedge::{next_halfedge, EMPTY};
use super::voronoi::Voronoi;
use crate::bounds::Viewport;
use crate::config::TriangulatorConfig;
use crate::error::DelaunayError;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use num_traits::Float;

/// A Delaunay triangulation together with the points it was built from.
#[derive(Debug, Clone)]
pub struct Delaunay<F> {
    points: Vec<Point2<F>>,
    triangulation: Triangulation,
    inedges: Vec<usize>,
    hull_index: Vec<usize>,
    triangulator: Triangulator<F>,
}

impl<F: Float> Delaunay<F> {
    /// Triangulates `points` with the default configuration.
    pub fn new(points: &[Point2<F>]) -> Result<Self, DelaunayError> {
        Self::with_config(points, TriangulatorConfig::default())
    }

    /// Triangulates `points` with the given configuration.
    pub fn with_config(points: &[Point2<F>], config: TriangulatorConfig) -> Result<Self, DelaunayError> {
        let mut delaunay = Self {
            points: Vec::new(),
            triangulation: Triangulation::default(),
            inedges: Vec::new(),
            hull_index: Vec::new(),
            triangulator: Triangulator::new(config),
        };
        delaunay.update(points)?;
        Ok(delaunay)
    }

    /// Triangulates a flat `[x0, y0, x1, y1, ...]` coordinate array.
    pub fn from_flat(coords: &[F]) -> Result<Self, DelaunayError> {
        let points = points_from_flat(coords)?;
        Self::new(&points)
    }

    /// Replaces the point set and rebuilds everything derived from it.
    ///
    /// On error the previous points and triangulation are kept.
    pub fn update(&mut self, points: &[Point2<F>]) -> Result<(), DelaunayError> {
        self.triangulator.triangulate_into(points, &mut self.triangulation)?;

        self.points.clear();
        self.points.extend_from_slice(points);
        self.index();
        Ok(())
    }

    fn index(&mut self) {
        let n = self.points.len();
        let Triangulation {
            triangles,
            halfedges,
            hull,
        } = &self.triangulation;

        self.inedges.clear();
        self.inedges.resize(n, EMPTY);
        self.hull_index.clear();
        self.hull_index.resize(n, EMPTY);

        // Hull points prefer their twinless incoming edge, so a neighbor walk
        // starting there covers the whole fan
        for (e, &twin) in halfedges.iter().enumerate() {
            let p = triangles[next_halfedge(e)];
            if twin == EMPTY || self.inedges[p] == EMPTY {
                self.inedges[p] = e;
            }
        }

        for (k, &i) in hull.iter().enumerate() {
            self.hull_index[i] = k;
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    #[inline]
    pub fn triangles(&self) -> &[usize] {
        &self.triangulation.triangles
    }

    #[inline]
    pub fn halfedges(&self) -> &[usize] {
        &self.triangulation.halfedges
    }

    #[inline]
    pub fn hull(&self) -> &[usize] {
        &self.triangulation.hull
    }

    /// For each point, a half-edge ending at it, or [`EMPTY`] for points in
    /// no triangle. Hull points get their incoming hull edge.
    #[inline]
    pub fn inedges(&self) -> &[usize] {
        &self.inedges
    }

    /// Returns true if the distinct usable points all lie on one line, up to
    /// floating point rounding, so no triangle was formed.
    pub fn is_collinear(&self) -> bool {
        self.triangulation.is_empty() && self.triangulation.hull.len() >= 2
    }

    /// Returns true if point `i` took part in the triangulation.
    pub(crate) fn is_connected(&self, i: usize) -> bool {
        self.inedges.get(i).is_some_and(|&e| e != EMPTY)
            || self.hull_index.get(i).is_some_and(|&k| k != EMPTY)
    }

    /// Position of point `i` in the hull, if it is a hull point.
    pub(crate) fn hull_position(&self, i: usize) -> Option<usize> {
        self.hull_index.get(i).copied().filter(|&k| k != EMPTY)
    }

    /// Iterates the Delaunay neighbors of point `i`.
    ///
    /// Neighbors come in clockwise order around the point. For collinear
    /// input the neighbors are the adjacent points along the line. Points
    /// that took no part in the triangulation have no neighbors.
    pub fn neighbors(&self, i: usize) -> Neighbors<'_> {
        let hull = &self.triangulation.hull;

        let walk = if self.triangulation.is_empty() {
            match self.hull_position(i) {
                Some(k) if hull.len() >= 2 => Walk::Line {
                    before: k.checked_sub(1).map(|j| hull[j]),
                    after: hull.get(k + 1).copied(),
                },
                _ => Walk::Done,
            }
        } else {
            match self.inedges.get(i) {
                Some(&e) if e != EMPTY => Walk::Ring { edge: e },
                _ => Walk::Done,
            }
        };

        Neighbors {
            triangles: &self.triangulation.triangles,
            halfedges: &self.triangulation.halfedges,
            hull,
            hull_index: &self.hull_index,
            point: i,
            start: self.inedges.get(i).copied().unwrap_or(EMPTY),
            last: EMPTY,
            walk,
        }
    }

    /// Finds the point nearest to `p`, walking greedily from `start`.
    ///
    /// Returns `None` for a non-finite query or when no point took part in
    /// the triangulation.
    pub fn find(&self, p: Point2<F>, start: usize) -> Option<usize> {
        let n = self.points.len();
        if !p.is_finite() || n == 0 {
            return None;
        }

        let first = if start < n { start } else { 0 };
        let mut i = (0..n).map(|k| (first + k) % n).find(|&i| self.is_connected(i))?;

        loop {
            let mut best = i;
            let mut best_distance = p.distance_squared(self.points[i]);

            for j in self.neighbors(i) {
                let d = p.distance_squared(self.points[j]);
                if d < best_distance {
                    best = j;
                    best_distance = d;
                }
            }

            if best == i {
                return Some(i);
            }
            i = best;
        }
    }

    /// Convex hull as a counter-clockwise polygon.
    pub fn hull_polygon(&self) -> Polygon<F> {
        Polygon::new(self.triangulation.hull.iter().map(|&i| self.points[i]).collect())
    }

    /// Triangle `t` as a counter-clockwise polygon.
    pub fn triangle_polygon(&self, t: usize) -> Polygon<F> {
        let [a, b, c] = self.triangulation.triangle(t);
        Polygon::new(vec![self.points[a], self.points[b], self.points[c]])
    }

    /// Iterates all triangles as polygons.
    pub fn triangle_polygons(&self) -> impl Iterator<Item = Polygon<F>> + '_ {
        (0..self.triangulation.len()).map(move |t| self.triangle_polygon(t))
    }

    /// Builds the Voronoi diagram clipped to `viewport`.
    pub fn voronoi(self, viewport: Viewport<F>) -> Result<Voronoi<F>, DelaunayError> {
        Voronoi::new(self, viewport)
    }
}

#[derive(Debug, Clone, Copy)]
enum Walk {
    Ring { edge: usize },
    HullNext,
    Line { before: Option<usize>, after: Option<usize> },
    Done,
}

/// Iterator over the neighbors of a point, from [`Delaunay::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    triangles: &'a [usize],
    halfedges: &'a [usize],
    hull: &'a [usize],
    hull_index: &'a [usize],
    point: usize,
    start: usize,
    last: usize,
    walk: Walk,
}

impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.walk {
            Walk::Done => None,
            Walk::Line { before, after } => {
                if before.is_some() {
                    self.walk = Walk::Line { before: None, after };
                    before
                } else {
                    self.walk = Walk::Done;
                    after
                }
            }
            Walk::Ring { edge } => {
                let p = self.triangles[edge];
                self.last = p;

                let out = next_halfedge(edge);
                self.walk = if self.triangles[out] != self.point {
                    Walk::Done
                } else {
                    match self.halfedges[out] {
                        EMPTY => Walk::HullNext,
                        e if e == self.start => Walk::Done,
                        e => Walk::Ring { edge: e },
                    }
                };

                Some(p)
            }
            Walk::HullNext => {
                self.walk = Walk::Done;
                let k = self.hull_index[self.point];
                let p = self.hull[(k + 1) % self.hull.len()];
                (p != self.last).then_some(p)
            }
        }
    }
}
