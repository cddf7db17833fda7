//! Sweep-hull Delaunay triangulation over flat half-edge arrays.
//!
//! Points are sorted by distance from the circumcenter of a seed triangle
//! and added one at a time outside an advancing convex hull. Every new
//! triangle is legalized with edge flips until all edges satisfy the
//! empty-circumcircle property.

use super::halfedge::{next_halfedge, points_of_triangle, prev_halfedge, EMPTY};
use super::hull::{is_visible, AdvancingHull};
use crate::bounds::Aabb2;
use crate::config::{NonFinitePolicy, TriangulatorConfig};
use crate::error::DelaunayError;
use crate::primitives::{Point2, Vec2};
use crate::tolerance::{circumcenter, circumradius_squared, in_circumcircle, is_flat, signed_area2};
use num_traits::Float;
use std::cmp::Ordering;

/// A Delaunay triangulation stored as flat index arrays.
///
/// # Example
///
/// ```
/// use dualmesh::{Point2, Triangulation, EMPTY};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
///
/// let triangulation = Triangulation::build(&points).unwrap();
/// assert_eq!(triangulation.len(), 1);
/// assert_eq!(triangulation.hull.len(), 3);
/// assert!(triangulation.halfedges.iter().all(|&e| e == EMPTY));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    /// Point indices, three per triangle, counter-clockwise.
    pub triangles: Vec<usize>,
    /// Twin of each half-edge, or [`EMPTY`] on the hull.
    pub halfedges: Vec<usize>,
    /// Convex hull point indices, counter-clockwise.
    pub hull: Vec<usize>,
}

impl Triangulation {
    /// Triangulates `points` with the default configuration.
    pub fn build<F: Float>(points: &[Point2<F>]) -> Result<Self, DelaunayError> {
        Triangulator::new(TriangulatorConfig::default()).triangulate(points)
    }

    /// Triangulates a flat `[x0, y0, x1, y1, ...]` coordinate array.
    pub fn from_flat<F: Float>(coords: &[F]) -> Result<Self, DelaunayError> {
        let points = points_from_flat(coords)?;
        Self::build(&points)
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Returns true if no triangle was formed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        points_of_triangle(&self.triangles, t)
    }

    /// Twin of half-edge `e`, or `None` on the hull.
    #[inline]
    pub fn twin(&self, e: usize) -> Option<usize> {
        match self.halfedges[e] {
            EMPTY => None,
            t => Some(t),
        }
    }

    fn clear(&mut self) {
        self.triangles.clear();
        self.halfedges.clear();
        self.hull.clear();
    }

    fn add_triangle(&mut self, i0: usize, i1: usize, i2: usize, a: usize, b: usize, c: usize) -> usize {
        let t = self.triangles.len();

        self.triangles.extend_from_slice(&[i0, i1, i2]);
        self.halfedges.extend_from_slice(&[EMPTY; 3]);

        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);

        t
    }

    fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != EMPTY {
            self.halfedges[b] = a;
        }
    }

    /// Flips edges until every edge reachable from `a` is locally Delaunay.
    ///
    /// Returns the half-edge that now holds the edge opposite the original
    /// one in its triangle.
    fn legalize<F: Float>(
        &mut self,
        mut a: usize,
        points: &[Point2<F>],
        hull: &mut AdvancingHull<F>,
        stack: &mut Vec<usize>,
    ) -> usize {
        stack.clear();

        let mut ar;
        loop {
            let b = self.halfedges[a];
            ar = prev_halfedge(a);

            if b == EMPTY {
                match stack.pop() {
                    Some(e) => {
                        a = e;
                        continue;
                    }
                    None => break,
                }
            }

            let al = next_halfedge(a);
            let bl = prev_halfedge(b);

            let p0 = self.triangles[ar];
            let pr = self.triangles[a];
            let pl = self.triangles[al];
            let p1 = self.triangles[bl];

            if in_circumcircle(points[p1], points[p0], points[pr], points[pl]) {
                self.triangles[a] = p1;
                self.triangles[b] = p0;

                let hbl = self.halfedges[bl];
                if hbl == EMPTY {
                    hull.retarget(bl, a);
                }

                let har = self.halfedges[ar];
                self.link(a, hbl);
                self.link(b, har);
                self.link(ar, bl);

                tracing::trace!(from = pr, to = pl, "flipped edge");
                stack.push(next_halfedge(b));
            } else {
                match stack.pop() {
                    Some(e) => a = e,
                    None => break,
                }
            }
        }

        ar
    }
}

/// Splits a flat `[x0, y0, x1, y1, ...]` array into points.
///
/// # Errors
///
/// Returns [`DelaunayError::OddCoordinateCount`] if the array does not hold
/// whole coordinate pairs.
pub fn points_from_flat<F: Float>(coords: &[F]) -> Result<Vec<Point2<F>>, DelaunayError> {
    if coords.len() % 2 != 0 {
        return Err(DelaunayError::OddCoordinateCount { len: coords.len() });
    }
    Ok(coords.chunks_exact(2).map(|c| Point2::new(c[0], c[1])).collect())
}

/// Reusable triangulation builder.
///
/// Holds the scratch buffers of the sweep so repeated builds over point sets
/// of similar size do not reallocate.
///
/// # Example
///
/// ```
/// use dualmesh::{NonFinitePolicy, Point2, Triangulator, TriangulatorConfig};
///
/// let config = TriangulatorConfig::default().with_non_finite(NonFinitePolicy::Skip);
/// let mut triangulator = Triangulator::new(config);
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(f64::NAN, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let triangulation = triangulator.triangulate(&points).unwrap();
/// assert_eq!(triangulation.len(), 1);
/// assert!(!triangulation.triangles.contains(&1));
/// ```
#[derive(Debug, Clone)]
pub struct Triangulator<F> {
    config: TriangulatorConfig,
    hull: AdvancingHull<F>,
    ids: Vec<usize>,
    order: Vec<(F, usize)>,
    edge_stack: Vec<usize>,
}

impl<F: Float> Triangulator<F> {
    /// Creates a triangulator with the given configuration.
    pub fn new(config: TriangulatorConfig) -> Self {
        Self {
            config,
            hull: AdvancingHull::new(),
            ids: Vec::new(),
            order: Vec::new(),
            edge_stack: Vec::new(),
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> TriangulatorConfig {
        self.config
    }

    /// Triangulates `points` into a new [`Triangulation`].
    pub fn triangulate(&mut self, points: &[Point2<F>]) -> Result<Triangulation, DelaunayError> {
        let mut out = Triangulation::default();
        self.triangulate_into(points, &mut out)?;
        Ok(out)
    }

    /// Triangulates `points` into `out`, reusing its allocations.
    ///
    /// On error `out` is left untouched.
    ///
    /// # Errors
    ///
    /// - [`DelaunayError::InvalidInput`] for a non-finite coordinate under
    ///   [`NonFinitePolicy::Reject`].
    /// - [`DelaunayError::DegenerateInput`] when no triangle can be formed and
    ///   degenerate results are disabled.
    pub fn triangulate_into(
        &mut self,
        points: &[Point2<F>],
        out: &mut Triangulation,
    ) -> Result<(), DelaunayError> {
        self.collect_usable(points)?;

        let seed = self.find_seed(points);
        if seed.is_none() && !self.config.allow_degenerate {
            return Err(DelaunayError::DegenerateInput {
                usable: self.ids.len(),
            });
        }

        out.clear();

        match seed {
            Some((seed, center)) => self.sweep(points, seed, center, out),
            None => {
                self.collinear_hull(points, out);
                tracing::debug!(
                    points = points.len(),
                    usable = self.ids.len(),
                    hull = out.hull.len(),
                    "no triangle formed; collinear or coincident input"
                );
            }
        }

        Ok(())
    }

    fn collect_usable(&mut self, points: &[Point2<F>]) -> Result<(), DelaunayError> {
        self.ids.clear();
        self.ids.reserve(points.len());

        for (index, p) in points.iter().enumerate() {
            if p.is_finite() {
                self.ids.push(index);
                continue;
            }
            match self.config.non_finite {
                NonFinitePolicy::Reject => return Err(DelaunayError::InvalidInput { index }),
                NonFinitePolicy::Skip => {
                    tracing::warn!(index, "skipping point with non-finite coordinate");
                }
            }
        }

        Ok(())
    }

    /// Picks three points forming a small, non-degenerate triangle near the
    /// middle of the set, oriented CCW, and returns them with their
    /// circumcenter.
    fn find_seed(&self, points: &[Point2<F>]) -> Option<([usize; 3], Point2<F>)> {
        let bbox = Aabb2::from_points(self.ids.iter().map(|&i| points[i]))?;

        let i0 = closest(&self.ids, points, bbox.center(), |_, _| true)?;
        let p0 = points[i0];

        let i1 = closest(&self.ids, points, p0, |i, d| i != i0 && d > F::zero())?;
        let p1 = points[i1];

        if self.all_collinear(points, p0) {
            return None;
        }

        let mut min_radius = F::infinity();
        let mut i2 = EMPTY;
        for &i in &self.ids {
            if i == i0 || i == i1 {
                continue;
            }
            let r = circumradius_squared(p0, p1, points[i]);
            if r < min_radius {
                i2 = i;
                min_radius = r;
            }
        }
        if i2 == EMPTY {
            return None;
        }

        let p2 = points[i2];
        let center = circumcenter(p0, p1, p2)?;

        if signed_area2(p0, p1, p2) < F::zero() {
            Some(([i0, i2, i1], center))
        } else {
            Some(([i0, i1, i2], center))
        }
    }

    /// True when every usable point lies on one line to within rounding.
    ///
    /// The line runs from `origin` to the usable point farthest from it.
    fn all_collinear(&self, points: &[Point2<F>], origin: Point2<F>) -> bool {
        let Some(far) = farthest(&self.ids, points, origin) else {
            return true;
        };
        let end = points[far];
        self.ids.iter().all(|&i| is_flat(origin, end, points[i]))
    }

    /// Hull of a set with no triangle: distinct points ordered along the line
    /// from its leftmost end, or from its bottom end when it is vertical.
    fn collinear_hull(&mut self, points: &[Point2<F>], out: &mut Triangulation) {
        let Some(&first) = self.ids.first() else {
            return;
        };
        let origin = points[first];

        let mut axis = farthest(&self.ids, points, origin).map_or(Vec2::zero(), |i| points[i] - origin);
        if axis.x < F::zero() || (axis.x == F::zero() && axis.y < F::zero()) {
            axis = -axis;
        }

        self.order.clear();
        for &i in &self.ids {
            self.order.push(((points[i] - origin).dot(axis), i));
        }
        self.order.sort_unstable_by(by_key_then_index);

        let mut last = F::neg_infinity();
        for &(d, i) in &self.order {
            if d > last {
                out.hull.push(i);
                last = d;
            }
        }
    }

    fn sweep(&mut self, points: &[Point2<F>], seed: [usize; 3], center: Point2<F>, out: &mut Triangulation) {
        let [i0, i1, i2] = seed;

        self.order.clear();
        self.order
            .extend(self.ids.iter().map(|&i| (center.distance_squared(points[i]), i)));
        self.order.sort_unstable_by(by_key_then_index);

        let max_triangles = (2 * self.ids.len()).saturating_sub(5).max(1);
        out.triangles.reserve(max_triangles * 3);
        out.halfedges.reserve(max_triangles * 3);

        self.hull.reset(points.len(), center, seed, points);
        out.add_triangle(i0, i1, i2, EMPTY, EMPTY, EMPTY);

        let Self {
            hull,
            order,
            edge_stack,
            ..
        } = self;

        let eps = F::epsilon() + F::epsilon();
        let mut last: Option<Point2<F>> = None;
        let mut skipped = 0usize;

        for &(_, i) in order.iter() {
            let p = points[i];

            if last.is_some_and(|q| p.approx_eq(q, eps)) {
                tracing::trace!(index = i, "skipping near-duplicate point");
                skipped += 1;
                continue;
            }
            last = Some(p);

            if i == i0 || i == i1 || i == i2 {
                continue;
            }

            let Some((mut e, walk_back)) = hull.find_visible_edge(p, points) else {
                tracing::trace!(index = i, "no visible hull edge; skipping point");
                skipped += 1;
                continue;
            };

            // First triangle from the new point to the visible edge
            let t = out.add_triangle(e, i, hull.next[e], EMPTY, EMPTY, hull.tri[e]);
            let legal = out.legalize(t + 2, points, hull, edge_stack);
            hull.tri[i] = legal;
            hull.tri[e] = t;

            // Fan forward over visible edges
            let mut n = hull.next[e];
            loop {
                let q = hull.next[n];
                if !is_visible(p, points[n], points[q]) {
                    break;
                }
                let t = out.add_triangle(n, i, q, hull.tri[i], EMPTY, hull.tri[n]);
                let legal = out.legalize(t + 2, points, hull, edge_stack);
                hull.tri[i] = legal;
                hull.next[n] = n;
                n = q;
            }

            // Fan backward
            if walk_back {
                loop {
                    let q = hull.prev[e];
                    if !is_visible(p, points[q], points[e]) {
                        break;
                    }
                    let t = out.add_triangle(q, i, e, EMPTY, hull.tri[e], hull.tri[q]);
                    out.legalize(t + 2, points, hull, edge_stack);
                    hull.tri[q] = t;
                    hull.next[e] = e;
                    e = q;
                }
            }

            hull.prev[i] = e;
            hull.next[i] = n;
            hull.prev[n] = i;
            hull.next[e] = i;
            hull.start = e;

            hull.hash_edge(p, i);
            hull.hash_edge(points[e], e);
        }

        hull.collect_into(&mut out.hull);

        tracing::debug!(
            points = points.len(),
            usable = order.len(),
            skipped,
            triangles = out.len(),
            hull = out.hull.len(),
            "triangulation built"
        );
    }
}

impl<F: Float> Default for Triangulator<F> {
    fn default() -> Self {
        Self::new(TriangulatorConfig::default())
    }
}

/// Index of the point in `ids` closest to `target` among those accepted by
/// `accept`. Ties go to the earlier (lower) index.
fn closest<F: Float>(
    ids: &[usize],
    points: &[Point2<F>],
    target: Point2<F>,
    accept: impl Fn(usize, F) -> bool,
) -> Option<usize> {
    let mut best = None;
    let mut best_distance = F::infinity();

    for &i in ids {
        let d = target.distance_squared(points[i]);
        if d < best_distance && accept(i, d) {
            best = Some(i);
            best_distance = d;
        }
    }

    best
}

/// Index of the point in `ids` farthest from `target`. Ties go to the
/// earlier (lower) index.
fn farthest<F: Float>(ids: &[usize], points: &[Point2<F>], target: Point2<F>) -> Option<usize> {
    let mut best = None;
    let mut best_distance = F::neg_infinity();

    for &i in ids {
        let d = target.distance_squared(points[i]);
        if d > best_distance {
            best = Some(i);
            best_distance = d;
        }
    }

    best
}

fn by_key_then_index<F: Float>(a: &(F, usize), b: &(F, usize)) -> Ordering {
    a.0.partial_cmp(&b.0)
        .unwrap_or(Ordering::Equal)
        .then(a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::halfedge::edges_of_triangle;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points(n: usize, seed: u64) -> Vec<Point2<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point2::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)))
            .collect()
    }

    fn assert_twins_symmetric(triangulation: &Triangulation) {
        for (e, &twin) in triangulation.halfedges.iter().enumerate() {
            if twin != EMPTY {
                assert_eq!(triangulation.halfedges[twin], e);
                // Twins run in opposite directions
                assert_eq!(triangulation.triangles[e], triangulation.triangles[next_halfedge(twin)]);
            }
        }
    }

    fn assert_ccw(triangulation: &Triangulation, points: &[Point2<f64>]) {
        for t in 0..triangulation.len() {
            let [a, b, c] = triangulation.triangle(t);
            assert!(signed_area2(points[a], points[b], points[c]) > 0.0, "triangle {t} not CCW");
        }
    }

    fn assert_hull_matches_boundary(triangulation: &Triangulation) {
        let mut boundary: Vec<(usize, usize)> = (0..triangulation.halfedges.len())
            .filter(|&e| triangulation.halfedges[e] == EMPTY)
            .map(|e| (triangulation.triangles[e], triangulation.triangles[next_halfedge(e)]))
            .collect();
        let hull = &triangulation.hull;
        let mut expected: Vec<(usize, usize)> = (0..hull.len())
            .map(|k| (hull[k], hull[(k + 1) % hull.len()]))
            .collect();
        boundary.sort_unstable();
        expected.sort_unstable();
        assert_eq!(boundary, expected);
    }

    fn assert_delaunay(triangulation: &Triangulation, points: &[Point2<f64>]) {
        for t in 0..triangulation.len() {
            let [a, b, c] = triangulation.triangle(t);
            let center = circumcenter(points[a], points[b], points[c]).unwrap();
            let r2 = center.distance_squared(points[a]);
            for (i, p) in points.iter().enumerate() {
                if i != a && i != b && i != c {
                    assert!(center.distance_squared(*p) >= r2 * (1.0 - 1e-9), "point {i} inside triangle {t}");
                }
            }
        }
    }

    #[test]
    fn test_single_triangle() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
        let triangulation = Triangulation::build(&points).unwrap();

        assert_eq!(triangulation.triangles, vec![0, 1, 2]);
        assert_eq!(triangulation.halfedges, vec![EMPTY; 3]);
        assert_eq!(triangulation.hull, vec![0, 1, 2]);
    }

    #[test]
    fn test_clockwise_input_is_reoriented() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(1.0, 0.0)];
        let triangulation = Triangulation::build(&points).unwrap();

        assert_eq!(triangulation.len(), 1);
        assert_ccw(&triangulation, &points);
        assert_hull_matches_boundary(&triangulation);
    }

    #[test]
    fn test_convex_quadrilateral() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 2.0),
            Point2::new(0.0, 1.0),
        ];
        let triangulation = Triangulation::build(&points).unwrap();

        assert_eq!(triangulation.len(), 2);
        assert_eq!(triangulation.halfedges.iter().filter(|&&e| e != EMPTY).count(), 2);
        assert_eq!(triangulation.hull.len(), 4);
        assert_twins_symmetric(&triangulation);
        assert_ccw(&triangulation, &points);
        assert_hull_matches_boundary(&triangulation);
        assert_delaunay(&triangulation, &points);
    }

    #[test]
    fn test_interior_point() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(1.0, 1.0),
        ];
        let triangulation = Triangulation::build(&points).unwrap();

        assert_eq!(triangulation.len(), 3);
        assert_eq!(triangulation.hull.len(), 3);
        assert!(!triangulation.hull.contains(&3));
        for t in 0..3 {
            assert!(triangulation.triangle(t).contains(&3));
        }
        assert_twins_symmetric(&triangulation);
        assert_ccw(&triangulation, &points);
    }

    #[test]
    fn test_all_identical() {
        let points = vec![Point2::new(1.0, 1.0); 5];
        let triangulation = Triangulation::build(&points).unwrap();

        assert!(triangulation.is_empty());
        assert!(triangulation.halfedges.is_empty());
        assert_eq!(triangulation.hull, vec![0]);
    }

    #[test]
    fn test_empty_and_tiny_inputs() {
        let empty: Vec<Point2<f64>> = Vec::new();
        let triangulation = Triangulation::build(&empty).unwrap();
        assert!(triangulation.is_empty());
        assert!(triangulation.hull.is_empty());

        let one = vec![Point2::new(3.0, 4.0)];
        assert_eq!(Triangulation::build(&one).unwrap().hull, vec![0]);

        let two = vec![Point2::new(3.0, 4.0), Point2::new(1.0, 4.0)];
        assert_eq!(Triangulation::build(&two).unwrap().hull, vec![1, 0]);
    }

    #[test]
    fn test_collinear() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 1.0),
        ];
        let triangulation = Triangulation::build(&points).unwrap();

        assert!(triangulation.is_empty());
        assert_eq!(triangulation.hull, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_vertical_collinear() {
        let points = vec![Point2::new(1.0, 5.0), Point2::new(1.0, -2.0), Point2::new(1.0, 0.0)];
        let triangulation = Triangulation::build(&points).unwrap();

        assert!(triangulation.is_empty());
        assert_eq!(triangulation.hull, vec![1, 2, 0]);
    }

    #[test]
    fn test_rounded_collinear() {
        // 0.3 * x rounds, so these points are only collinear up to rounding
        let points: Vec<Point2<f64>> = (0..50)
            .map(|i| {
                let x = 0.1 * i as f64;
                Point2::new(x, 0.3 * x)
            })
            .collect();
        let triangulation = Triangulation::build(&points).unwrap();

        assert!(triangulation.is_empty());
        assert_eq!(triangulation.hull, (0..50).collect::<Vec<_>>());

        let config = TriangulatorConfig::default().with_allow_degenerate(false);
        assert_eq!(
            Triangulator::new(config).triangulate(&points),
            Err(DelaunayError::DegenerateInput { usable: 50 })
        );
    }

    #[test]
    fn test_rounded_vertical_line_keeps_its_order() {
        let points: Vec<Point2<f64>> = (0..20)
            .rev()
            .map(|i| {
                // x wobbles by one ulp
                let x = 1.0 + (i % 2) as f64 * f64::EPSILON;
                Point2::new(x, 0.1 * i as f64)
            })
            .collect();
        let triangulation = Triangulation::build(&points).unwrap();

        assert!(triangulation.is_empty());
        assert_eq!(triangulation.hull, (0..20).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_tiny_scale_is_not_collinear() {
        let points: Vec<Point2<f64>> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.4, 0.6)]
            .iter()
            .map(|&(x, y)| Point2::new(x * 1e-7, y * 1e-7))
            .collect();
        let triangulation = Triangulation::build(&points).unwrap();

        assert_eq!(triangulation.len(), 4);
        assert_eq!(triangulation.hull.len(), 4);
        assert_ccw(&triangulation, &points);
        assert_delaunay(&triangulation, &points);
    }

    #[test]
    fn test_duplicates_are_left_out() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
        ];
        let triangulation = Triangulation::build(&points).unwrap();

        // One of each duplicate pair takes part: 5 distinct points, 4 on the hull
        assert_eq!(triangulation.len(), 4);
        assert_eq!(triangulation.hull.len(), 4);

        let used = |i: usize| triangulation.triangles.contains(&i);
        assert!(used(3) ^ used(4));
        assert!(used(5) ^ used(6));
        assert_twins_symmetric(&triangulation);
        assert_ccw(&triangulation, &points);
    }

    #[test]
    fn test_non_finite_rejected() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, f64::NAN),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(
            Triangulation::build(&points),
            Err(DelaunayError::InvalidInput { index: 1 })
        );

        let points = vec![Point2::new(0.0, 0.0), Point2::new(f64::INFINITY, 0.0)];
        assert_eq!(
            Triangulation::build(&points),
            Err(DelaunayError::InvalidInput { index: 1 })
        );
    }

    #[test]
    fn test_non_finite_skipped() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(f64::NEG_INFINITY, 2.0),
        ];
        let config = TriangulatorConfig::default().with_non_finite(NonFinitePolicy::Skip);
        let triangulation = Triangulator::new(config).triangulate(&points).unwrap();

        assert_eq!(triangulation.len(), 1);
        assert!(!triangulation.triangles.contains(&1));
        assert!(!triangulation.hull.contains(&4));
    }

    #[test]
    fn test_degenerate_rejected_when_disallowed() {
        let config = TriangulatorConfig::default().with_allow_degenerate(false);
        let mut triangulator = Triangulator::new(config);

        let collinear = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
        assert_eq!(
            triangulator.triangulate(&collinear),
            Err(DelaunayError::DegenerateInput { usable: 3 })
        );

        let few: Vec<Point2<f64>> = vec![Point2::new(0.0, 0.0)];
        assert_eq!(
            triangulator.triangulate(&few),
            Err(DelaunayError::DegenerateInput { usable: 1 })
        );
    }

    #[test]
    fn test_failed_build_leaves_output_untouched() {
        let mut triangulator = Triangulator::default();
        let mut out = Triangulation::default();

        let good = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
        triangulator.triangulate_into(&good, &mut out).unwrap();
        let before = out.clone();

        let bad = vec![Point2::new(0.0, 0.0), Point2::new(f64::NAN, 0.0)];
        assert!(triangulator.triangulate_into(&bad, &mut out).is_err());
        assert_eq!(out, before);
    }

    #[test]
    fn test_from_flat() {
        let triangulation = Triangulation::from_flat(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(triangulation.len(), 2);

        assert_eq!(
            Triangulation::from_flat(&[0.0, 0.0, 1.0]),
            Err(DelaunayError::OddCoordinateCount { len: 3 })
        );
    }

    #[test]
    fn test_grid() {
        let mut points = Vec::new();
        for y in 0..6 {
            for x in 0..6 {
                points.push(Point2::new(x as f64, y as f64));
            }
        }
        let triangulation = Triangulation::build(&points).unwrap();

        // Every point is used, including collinear boundary points
        let n = points.len();
        let h = triangulation.hull.len();
        assert_eq!(h, 20);
        assert_eq!(triangulation.len(), 2 * n - h - 2);
        assert_twins_symmetric(&triangulation);
        assert_ccw(&triangulation, &points);
        assert_hull_matches_boundary(&triangulation);
        assert_delaunay(&triangulation, &points);
    }

    #[test]
    fn test_random_sets() {
        let mut triangulator = Triangulator::default();
        for seed in 0..5 {
            let points = random_points(200, seed);
            let triangulation = triangulator.triangulate(&points).unwrap();

            assert_eq!(triangulation.len(), 2 * points.len() - triangulation.hull.len() - 2);
            assert_twins_symmetric(&triangulation);
            assert_ccw(&triangulation, &points);
            assert_hull_matches_boundary(&triangulation);
            assert_delaunay(&triangulation, &points);
        }
    }

    #[test]
    fn test_twin() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 2.0),
            Point2::new(0.0, 1.0),
        ];
        let triangulation = Triangulation::build(&points).unwrap();

        let inner = (0..6).find(|&e| triangulation.twin(e).is_some()).unwrap();
        let twin = triangulation.twin(inner).unwrap();
        assert_eq!(triangulation.twin(twin), Some(inner));
        assert_ne!(edges_of_triangle(0).contains(&inner), edges_of_triangle(0).contains(&twin));
    }

    #[test]
    fn test_f32() {
        let points: Vec<Point2<f32>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(1.0, 1.0),
        ];
        let triangulation = Triangulation::build(&points).unwrap();
        assert_eq!(triangulation.len(), 3);
    }
}
