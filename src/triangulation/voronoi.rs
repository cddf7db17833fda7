//! Voronoi diagram derived from a Delaunay triangulation.
//!
//! A Voronoi diagram partitions the plane into cells, where each cell contains
//! all points closer to its generating site than to any other site.
//!
//! # How It Works
//!
//! The Voronoi diagram is the dual of the Delaunay triangulation:
//! - Each Delaunay triangle's circumcenter becomes a Voronoi vertex
//! - Each Delaunay edge shared by two triangles becomes a Voronoi edge
//! - Edges on the convex hull create unbounded Voronoi rays
//!
//! Cells are clipped to a rectangular viewport. Unbounded cells of hull
//! points are first closed far outside the viewport along their two rays,
//! then clipped like every other cell.
//!
//! # Example
//!
//! ```
//! use dualmesh::{Delaunay, Point2, Viewport};
//!
//! let sites: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! let viewport = Viewport::from_extents(-1.0, -1.0, 2.0, 2.0).unwrap();
//! let voronoi = Delaunay::new(&sites).unwrap().voronoi(viewport).unwrap();
//!
//! // One triangle means one Voronoi vertex
//! assert_eq!(voronoi.circumcenters().len(), 1);
//!
//! // The cells tile the viewport
//! let total: f64 = voronoi.cell_polygons().map(|(_, cell)| cell.area()).sum();
//! assert!((total - 9.0).abs() < 1e-9);
//! ```

use super::delaunay::{Delaunay, Neighbors};
use super::halfedge::{next_halfedge, triangle_of_edge, EMPTY};
use crate::bounds::{Aabb2, Viewport};
use crate::error::DelaunayError;
use crate::polygon::{clip_half_plane, sutherland_hodgman, Polygon};
use crate::primitives::{Point2, Vec2};
use crate::tolerance::{circumcenter, is_flat};
use num_traits::Float;

/// Distance of a stand-in circumcenter from its flat triangle, in diagonals
/// of the hull's bounding box.
const FAR: f64 = 1e9;

/// A Voronoi diagram clipped to a viewport.
#[derive(Debug, Clone)]
pub struct Voronoi<F> {
    delaunay: Delaunay<F>,
    viewport: Viewport<F>,
    circumcenters: Vec<Point2<F>>,
    vectors: Vec<[Vec2<F>; 2]>,
}

impl<F: Float> Voronoi<F> {
    /// Builds the diagram of `delaunay` clipped to `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::InvalidViewport`] for non-finite or inverted
    /// viewport bounds.
    pub fn new(delaunay: Delaunay<F>, viewport: Viewport<F>) -> Result<Self, DelaunayError> {
        validate_viewport(viewport)?;

        let mut voronoi = Self {
            delaunay,
            viewport,
            circumcenters: Vec::new(),
            vectors: Vec::new(),
        };
        voronoi.init();
        Ok(voronoi)
    }

    fn init(&mut self) {
        let points = self.delaunay.points();
        let triangulation = self.delaunay.triangulation();
        let hull = &triangulation.hull;

        let barycenter = hull_barycenter(points, hull);
        let diagonal = Aabb2::from_points(hull.iter().map(|&i| points[i])).map_or(F::zero(), |b| b.diagonal());
        let reach = diagonal * F::from(FAR).unwrap();

        self.circumcenters.clear();
        self.circumcenters.extend((0..triangulation.len()).map(|t| {
            let [a, b, c] = triangulation.triangle(t);
            let (pa, pb, pc) = (points[a], points[b], points[c]);

            let center = if is_flat(pa, pb, pc) {
                None
            } else {
                circumcenter(pa, pb, pc)
            };
            center.unwrap_or_else(|| far_circumcenter(pa, pb, pc, barycenter, reach))
        }));

        // Outward normals of the hull edges on either side of each hull point
        self.vectors.clear();
        self.vectors.resize(points.len(), [Vec2::zero(); 2]);
        if !triangulation.is_empty() {
            let h = hull.len();
            for k in 0..h {
                let a = hull[k];
                let b = hull[(k + 1) % h];
                let normal = (points[b] - points[a]).perpendicular_cw();
                self.vectors[a][0] = normal;
                self.vectors[b][1] = normal;
            }
        }

        tracing::debug!(
            points = points.len(),
            circumcenters = self.circumcenters.len(),
            hull = hull.len(),
            "voronoi diagram built"
        );
    }

    /// Rebuilds the triangulation and every derived field for new points.
    ///
    /// On error the diagram is left unchanged.
    pub fn update(&mut self, points: &[Point2<F>]) -> Result<(), DelaunayError> {
        self.delaunay.update(points)?;
        self.init();
        Ok(())
    }

    /// Replaces the clipping viewport.
    pub fn set_viewport(&mut self, viewport: Viewport<F>) -> Result<(), DelaunayError> {
        validate_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    #[inline]
    pub fn viewport(&self) -> Viewport<F> {
        self.viewport
    }

    #[inline]
    pub fn delaunay(&self) -> &Delaunay<F> {
        &self.delaunay
    }

    /// One circumcenter per triangle, in triangle order.
    #[inline]
    pub fn circumcenters(&self) -> &[Point2<F>] {
        &self.circumcenters
    }

    /// Per point, the outward normals of the hull edges `i -> next` and
    /// `prev -> i`. Zero for points not on the hull of a triangulated set.
    #[inline]
    pub fn vectors(&self) -> &[[Vec2<F>; 2]] {
        &self.vectors
    }

    /// The cell of point `i` clipped to the viewport, counter-clockwise.
    ///
    /// Returns `None` for points with no cell (duplicates, skipped points)
    /// and for cells that do not overlap the viewport.
    pub fn cell_polygon(&self, i: usize) -> Option<Polygon<F>> {
        if self.viewport.area() <= F::zero() {
            return None;
        }

        let clipped = if self.delaunay.triangulation().is_empty() {
            self.collinear_cell(i)?
        } else {
            let ring = self.cell_ring(i)?;
            let subject = if self.delaunay.hull_position(i).is_some() {
                self.close_unbounded(i, ring)
            } else {
                Polygon::new(ring)
            };
            sutherland_hodgman(&subject, &self.viewport.to_polygon())
        };

        self.finish(clipped)
    }

    /// Iterates `(index, cell)` over every point that has a cell.
    pub fn cell_polygons(&self) -> impl Iterator<Item = (usize, Polygon<F>)> + '_ {
        (0..self.delaunay.points().len()).filter_map(move |i| self.cell_polygon(i).map(|cell| (i, cell)))
    }

    /// Tests whether `p` lies in the clipped cell of point `i`, boundary
    /// included.
    pub fn contains(&self, i: usize, p: Point2<F>) -> bool {
        p.is_finite() && self.cell_polygon(i).is_some_and(|cell| cell.contains(p))
    }

    /// Iterates the Voronoi neighbors of point `i`: the points sharing a
    /// triangulation edge with it.
    #[inline]
    pub fn neighbors(&self, i: usize) -> Neighbors<'_> {
        self.delaunay.neighbors(i)
    }

    /// Iterates the neighbors of `i` whose clipped cell shares an edge with
    /// the clipped cell of `i`.
    ///
    /// Matches [`neighbors`](Self::neighbors) when the viewport holds every
    /// circumcenter; a smaller viewport drops neighbors whose common edge
    /// falls outside it.
    pub fn shared_edge_neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let cell = self.cell_polygon(i);
        let tolerance = self.tolerance();

        self.delaunay.neighbors(i).filter(move |&j| {
            let (Some(a), Some(b)) = (cell.as_ref(), self.cell_polygon(j)) else {
                return false;
            };
            shares_edge(a, &b, tolerance)
        })
    }

    /// Checks that the viewport holds some of the triangulation's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::ViewportTooSmall`] when the diagram has sites
    /// but the viewport contains none of them and no circumcenter.
    pub fn check_viewport(&self) -> Result<(), DelaunayError> {
        let points = self.delaunay.points();
        let mut sites = (0..points.len()).filter(|&i| self.delaunay.is_connected(i)).peekable();

        if sites.peek().is_none() {
            return Ok(());
        }

        let viewport = self.viewport;
        let inside = sites.any(|i| viewport.contains_point(points[i]))
            || self.circumcenters.iter().any(|&c| viewport.contains_point(c));

        if inside {
            Ok(())
        } else {
            tracing::warn!(
                min_x = viewport.min.x.to_f64(),
                min_y = viewport.min.y.to_f64(),
                max_x = viewport.max.x.to_f64(),
                max_y = viewport.max.y.to_f64(),
                "viewport contains no triangulation geometry"
            );
            Err(DelaunayError::ViewportTooSmall)
        }
    }

    /// Circumcenters of the triangles around `i`, counter-clockwise.
    fn cell_ring(&self, i: usize) -> Option<Vec<Point2<F>>> {
        let triangulation = self.delaunay.triangulation();
        let e0 = *self.delaunay.inedges().get(i)?;
        if e0 == EMPTY {
            return None;
        }

        let mut ring = Vec::new();
        let mut e = e0;
        loop {
            ring.push(self.circumcenters[triangle_of_edge(e)]);

            let out = next_halfedge(e);
            if triangulation.triangles[out] != i {
                break;
            }
            e = triangulation.halfedges[out];
            if e == EMPTY || e == e0 {
                break;
            }
        }

        // The walk runs clockwise
        ring.reverse();
        Some(ring)
    }

    /// Closes the open ring of a hull point far beyond the viewport.
    ///
    /// Both rays are extended by a reach large enough that the closing
    /// chords stay outside the viewport; a third far point on the bisector
    /// of the rays keeps the chords away from the cell when the rays
    /// diverge widely.
    fn close_unbounded(&self, i: usize, ring: Vec<Point2<F>>) -> Polygon<F> {
        let [v_first, v_last] = self.vectors[i];
        let v_first = unit(v_first);
        let v_last = unit(v_last);

        let first = ring[0];
        let last = ring[ring.len() - 1];

        let center = self.viewport.center();
        let four = F::from(4.0).unwrap();
        let reach = four * (self.viewport.diagonal() + center.distance(first).max(center.distance(last)));

        let bisector = (v_first + v_last)
            .normalize()
            .unwrap_or_else(|| Vec2::new(v_first.y, -v_first.x));

        let mut vertices = Vec::with_capacity(ring.len() + 3);
        vertices.push(first + v_first * reach);
        vertices.extend(ring);
        vertices.push(last + v_last * reach);
        vertices.push(last + bisector * reach);
        Polygon::new(vertices)
    }

    /// Cell of a point in a triangle-free set: the viewport cut by the
    /// bisectors with the adjacent points along the line.
    fn collinear_cell(&self, i: usize) -> Option<Polygon<F>> {
        self.delaunay.hull_position(i)?;

        let points = self.delaunay.points();
        let p = points[i];

        let mut cell = self.viewport.to_polygon();
        for j in self.delaunay.neighbors(i) {
            let q = points[j];
            let m = p.midpoint(q);
            cell = clip_half_plane(&cell, m, m + (q - p).perpendicular());
        }
        Some(cell)
    }

    fn finish(&self, mut cell: Polygon<F>) -> Option<Polygon<F>> {
        let tolerance = self.tolerance();
        cell.remove_coincident(tolerance);
        cell.ensure_ccw();

        (cell.len() >= 3 && cell.area() > tolerance * self.viewport.diagonal()).then_some(cell)
    }

    /// Distance under which two cell vertices are treated as one.
    fn tolerance(&self) -> F {
        let Viewport { min, max } = self.viewport;
        let magnitude = min.x.abs().max(min.y.abs()).max(max.x.abs()).max(max.y.abs());
        F::epsilon() * F::from(1024.0).unwrap() * (self.viewport.diagonal() + magnitude)
    }
}

fn validate_viewport<F: Float>(viewport: Viewport<F>) -> Result<(), DelaunayError> {
    let Viewport { min, max } = viewport;
    if min.is_finite() && max.is_finite() && min.x <= max.x && min.y <= max.y {
        Ok(())
    } else {
        Err(DelaunayError::InvalidViewport)
    }
}

fn hull_barycenter<F: Float>(points: &[Point2<F>], hull: &[usize]) -> Point2<F> {
    if hull.is_empty() {
        return Point2::origin();
    }
    let sum = hull
        .iter()
        .fold(Vec2::zero(), |acc, &i| acc + points[i].to_vec());
    let count = F::from(hull.len()).unwrap();
    Point2::new(sum.x / count, sum.y / count)
}

/// `v` scaled to unit length; the zero vector stays zero.
fn unit<F: Float>(v: Vec2<F>) -> Vec2<F> {
    let length = v.magnitude();
    if length > F::zero() {
        v / length
    } else {
        v
    }
}

/// Stand-in circumcenter of a flat triangle: `reach` away from the middle
/// of its longest edge, orthogonal to it, on the side away from `barycenter`.
fn far_circumcenter<F: Float>(
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
    barycenter: Point2<F>,
    reach: F,
) -> Point2<F> {
    let (u, v) = [(a, b), (b, c), (c, a)]
        .into_iter()
        .fold((a, b), |longest, edge| {
            if edge.0.distance_squared(edge.1) > longest.0.distance_squared(longest.1) {
                edge
            } else {
                longest
            }
        });

    let mid = u.midpoint(v);
    let normal = unit(v - u).perpendicular();
    let normal = if (mid - barycenter).dot(normal) < F::zero() {
        -normal
    } else {
        normal
    };
    mid + normal * reach
}

/// True if some edge `p -> q` of `a` appears as `q -> p` in `b`.
fn shares_edge<F: Float>(a: &Polygon<F>, b: &Polygon<F>, tolerance: F) -> bool {
    let (va, vb) = (&a.vertices, &b.vertices);
    let (na, nb) = (va.len(), vb.len());

    (0..na).any(|i| {
        let (p, q) = (va[i], va[(i + 1) % na]);
        (0..nb).any(|j| {
            let (r, s) = (vb[j], vb[(j + 1) % nb]);
            p.approx_eq(s, tolerance) && q.approx_eq(r, tolerance)
        })
    })
}
