//! Geometric predicates used by the triangulator and the Voronoi builder.

use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Twice the signed area of triangle `abc`.
///
/// Positive when `c` lies to the left of the directed line `a -> b`.
#[inline]
pub fn signed_area2<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    (b - a).cross(c - a)
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`:
/// - `CounterClockwise` if `c` is to the left of the line from `a` to `b`
/// - `Clockwise` if `c` is to the right of the line from `a` to `b`
/// - `Collinear` if `c` is on the line (within `eps` tolerance)
///
/// # Arguments
///
/// * `a`, `b`, `c` - The three points to test
/// * `eps` - Tolerance for collinearity. This is compared against the absolute
///   value of the cross product (twice the signed area).
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = signed_area2(a, b, c);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Multiple of `F::epsilon()` in [`collinear_tolerance`].
const ROUNDING_FACTOR: f64 = 256.0;

/// Bound on the rounding error of [`signed_area2`] for triangle `abc`.
///
/// Scales with the longest edge and with the coordinate magnitude, so a
/// shape classifies the same way at any scale and offset. Triangles whose
/// doubled area is within this bound cannot be told apart from collinear
/// points at the precision of `F`.
#[inline]
pub fn collinear_tolerance<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    let longest = (b - a)
        .magnitude_squared()
        .max((c - b).magnitude_squared())
        .max((a - c).magnitude_squared())
        .sqrt();
    let magnitude = [a, b, c]
        .iter()
        .fold(F::zero(), |m, p| m.max(p.x.abs()).max(p.y.abs()));

    F::epsilon() * F::from(ROUNDING_FACTOR).unwrap() * longest * (longest + magnitude)
}

/// Tests if `abc` is collinear to within [`collinear_tolerance`].
///
/// # Example
///
/// ```
/// use dualmesh::tolerance::is_flat;
/// use dualmesh::Point2;
///
/// // Points on y = 0.3x, each coordinate rounded
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(0.1, 0.3 * 0.1);
/// let c = Point2::new(0.7, 0.3 * 0.7);
/// assert!(is_flat(a, b, c));
///
/// // A right triangle a millionth of a unit across is not
/// assert!(!is_flat(a, Point2::new(1e-6, 0.0), Point2::new(0.0, 1e-6)));
/// ```
#[inline]
pub fn is_flat<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    orient2d(a, b, c, collinear_tolerance(a, b, c)) == Orientation::Collinear
}

/// Tests if a point lies strictly inside the circumcircle of a triangle.
///
/// Uses the determinant test, which avoids computing the circumcenter.
/// The triangle `a`, `b`, `c` must be in counter-clockwise order.
///
/// # Example
///
/// ```
/// use dualmesh::tolerance::in_circumcircle;
/// use dualmesh::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.5, 0.866);
///
/// assert!(in_circumcircle(Point2::new(0.5, 0.29), a, b, c));
/// assert!(!in_circumcircle(Point2::new(10.0, 10.0), a, b, c));
/// ```
#[inline]
pub fn in_circumcircle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    // | ax-px  ay-py  (ax-px)²+(ay-py)² |
    // | bx-px  by-py  (bx-px)²+(by-py)² | > 0  iff p is inside (CCW triangle)
    // | cx-px  cy-py  (cx-px)²+(cy-py)² |
    let d = a - p;
    let e = b - p;
    let f = c - p;

    let ap = d.magnitude_squared();
    let bp = e.magnitude_squared();
    let cp = f.magnitude_squared();

    let det = d.x * (e.y * cp - bp * f.y) - d.y * (e.x * cp - bp * f.x) + ap * (e.x * f.y - e.y * f.x);

    det > F::zero()
}

/// Offset from `a` to the circumcenter of triangle `abc`.
///
/// Non-finite for collinear or coincident points.
#[inline]
fn circumdelta<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Vec2<F> {
    let d = b - a;
    let e = c - a;

    let bl = d.magnitude_squared();
    let cl = e.magnitude_squared();
    let two = F::one() + F::one();
    let inv = F::one() / (two * d.cross(e));

    Vec2::new((e.y * bl - d.y * cl) * inv, (d.x * cl - e.x * bl) * inv)
}

/// Squared circumradius of triangle `abc`.
///
/// Returns infinity when the points are collinear or coincident, so the
/// value can be minimized directly when choosing a seed triangle.
#[inline]
pub fn circumradius_squared<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    let r = circumdelta(a, b, c).magnitude_squared();
    if r.is_finite() {
        r
    } else {
        F::infinity()
    }
}

/// Computes the circumcenter of a triangle.
///
/// Returns `None` when the triangle has no finite circumcenter (collinear
/// or coincident vertices).
///
/// # Example
///
/// ```
/// use dualmesh::tolerance::circumcenter;
/// use dualmesh::Point2;
///
/// // Circumcenter of a right triangle is the midpoint of the hypotenuse
/// let c = circumcenter(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// )
/// .unwrap();
/// assert!((c.x - 0.5).abs() < 1e-12);
/// assert!((c.y - 0.5).abs() < 1e-12);
///
/// assert!(circumcenter(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(2.0, 0.0),
/// )
/// .is_none());
/// ```
#[inline]
pub fn circumcenter<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Option<Point2<F>> {
    let center = a + circumdelta(a, b, c);
    center.is_finite().then_some(center)
}
