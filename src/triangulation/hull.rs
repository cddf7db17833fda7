//! Advancing convex hull used while sweeping points into the triangulation.
//!
//! The hull is a doubly linked list over point indices, in counter-clockwise
//! order. A small angular hash keyed by the pseudo-angle of each hull point
//! around the seed circumcenter gives a starting edge close to the visible
//! part of the hull for every new point.

use super::halfedge::EMPTY;
use crate::primitives::Point2;
use crate::tolerance::{orient2d, Orientation};
use num_traits::Float;

#[derive(Debug, Clone)]
pub(crate) struct AdvancingHull<F> {
    /// Previous hull point.
    pub prev: Vec<usize>,
    /// Next hull point; `next[i] == i` marks a point removed from the hull.
    pub next: Vec<usize>,
    /// Half-edge `i -> next[i]` inside the triangulation.
    pub tri: Vec<usize>,
    hash: Vec<usize>,
    pub start: usize,
    center: Point2<F>,
}

impl<F: Float> AdvancingHull<F> {
    pub fn new() -> Self {
        Self {
            prev: Vec::new(),
            next: Vec::new(),
            tri: Vec::new(),
            hash: Vec::new(),
            start: EMPTY,
            center: Point2::origin(),
        }
    }

    /// Resets the hull to the seed triangle `seed`, which must be CCW and
    /// occupy half-edges 0, 1 and 2.
    pub fn reset(&mut self, n: usize, center: Point2<F>, seed: [usize; 3], points: &[Point2<F>]) {
        let hash_len = ((n as f64).sqrt().ceil() as usize).max(1);

        for buffer in [&mut self.prev, &mut self.next, &mut self.tri] {
            buffer.clear();
            buffer.resize(n, EMPTY);
        }
        self.hash.clear();
        self.hash.resize(hash_len, EMPTY);
        self.center = center;

        let [i0, i1, i2] = seed;
        self.start = i0;

        self.next[i0] = i1;
        self.prev[i1] = i0;
        self.next[i1] = i2;
        self.prev[i2] = i1;
        self.next[i2] = i0;
        self.prev[i0] = i2;

        self.tri[i0] = 0;
        self.tri[i1] = 1;
        self.tri[i2] = 2;

        for i in seed {
            self.hash_edge(points[i], i);
        }
    }

    /// Monotonic stand-in for the angle of `p` around the center, in `[0, 1)`.
    fn hash_key(&self, p: Point2<F>) -> usize {
        let d = p - self.center;
        let len = self.hash.len();

        let spread = d.x.abs() + d.y.abs();
        if spread == F::zero() {
            return 0;
        }

        let ratio = d.x / spread;
        let four = F::from(4.0).unwrap();
        let angle = if d.y > F::zero() {
            (F::from(3.0).unwrap() - ratio) / four
        } else {
            (F::one() + ratio) / four
        };

        let bucket = (angle * F::from(len).unwrap()).floor();
        bucket.to_usize().unwrap_or(0) % len
    }

    pub fn hash_edge(&mut self, p: Point2<F>, i: usize) {
        let key = self.hash_key(p);
        self.hash[key] = i;
    }

    /// Finds a hull edge `e -> next[e]` visible from `p`.
    ///
    /// The flag is true when the edge found is the first one examined, so
    /// edges before it may be visible as well. Returns `None` when no edge is
    /// visible, which happens for points (nearly) coinciding with the hull.
    pub fn find_visible_edge(&self, p: Point2<F>, points: &[Point2<F>]) -> Option<(usize, bool)> {
        let key = self.hash_key(p);
        let len = self.hash.len();

        let start = (0..len)
            .map(|j| self.hash[(key + j) % len])
            .find(|&i| i != EMPTY && self.next[i] != i)?;

        let start = self.prev[start];
        let mut e = start;
        loop {
            let q = self.next[e];
            if is_visible(p, points[e], points[q]) {
                break;
            }
            e = q;
            if e == start {
                return None;
            }
        }

        Some((e, e == start))
    }

    /// Points the hull edge currently stored as half-edge `old` at `new`.
    pub fn retarget(&mut self, old: usize, new: usize) {
        let mut e = self.start;
        loop {
            if self.tri[e] == old {
                self.tri[e] = new;
                break;
            }
            e = self.prev[e];
            if e == self.start {
                break;
            }
        }
    }

    /// Hull point indices in counter-clockwise order, from the current start.
    pub fn collect_into(&self, out: &mut Vec<usize>) {
        out.clear();
        if self.start == EMPTY {
            return;
        }
        let mut e = self.start;
        loop {
            out.push(e);
            e = self.next[e];
            if e == self.start {
                break;
            }
        }
    }
}

/// True if `p` lies strictly outside (to the right of) the CCW hull edge `a -> b`.
#[inline]
pub(crate) fn is_visible<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>) -> bool {
    orient2d(a, b, p, F::zero()) == Orientation::Clockwise
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_points() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(5.0, 5.0),
        ]
    }

    #[test]
    fn test_reset_links_seed_ccw() {
        let points = seed_points();
        let mut hull = AdvancingHull::new();
        hull.reset(points.len(), Point2::new(2.0, 2.0), [0, 1, 2], &points);

        let mut order = Vec::new();
        hull.collect_into(&mut order);
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(hull.tri[..3], [0, 1, 2]);
        assert_eq!(hull.next[3], EMPTY);
    }

    #[test]
    fn test_hash_key_is_in_range_and_ordered_by_angle() {
        let points = seed_points();
        let mut hull = AdvancingHull::new();
        hull.reset(100, Point2::new(0.0, 0.0), [0, 1, 2], &points);

        // Keys grow with the angle, starting from the negative x axis
        let keys: Vec<usize> = [
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, -1.0),
            Point2::new(1.0, -1e-9),
            Point2::new(0.0, 1.0),
        ]
        .iter()
        .map(|&p| hull.hash_key(p))
        .collect();

        assert_eq!(keys, vec![0, 2, 4, 7]);
        assert_eq!(hull.hash_key(Point2::new(0.0, 0.0)), 0);
    }

    #[test]
    fn test_find_visible_edge() {
        let points = seed_points();
        let mut hull = AdvancingHull::new();
        hull.reset(points.len(), Point2::new(2.0, 2.0), [0, 1, 2], &points);

        // (5, 5) only sees the hypotenuse 1 -> 2
        let (e, _) = hull.find_visible_edge(points[3], &points).unwrap();
        assert_eq!(e, 1);

        // A point inside the hull sees nothing
        assert!(hull.find_visible_edge(Point2::new(1.0, 1.0), &points).is_none());
    }

    #[test]
    fn test_is_visible() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert!(is_visible(Point2::new(0.5, -1.0), a, b));
        assert!(!is_visible(Point2::new(0.5, 1.0), a, b));
        assert!(!is_visible(Point2::new(2.0, 0.0), a, b));
    }
}
