//! Polygon clipping against convex regions and half-planes.

use crate::polygon::core::{is_left_or_on, Polygon};
use crate::primitives::Point2;
use num_traits::Float;

/// Clips a polygon against a convex clipping polygon using Sutherland-Hodgman algorithm.
///
/// The subject may be any simple polygon; the clip polygon must be convex and
/// counter-clockwise. The result is a single polygon, empty if the subject is
/// entirely outside the clip region.
///
/// # Example
///
/// ```
/// use dualmesh::polygon::{Polygon, sutherland_hodgman};
/// use dualmesh::Point2;
///
/// let subject = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ]);
///
/// let clip = Polygon::new(vec![
///     Point2::new(1.0, 1.0),
///     Point2::new(3.0, 1.0),
///     Point2::new(3.0, 3.0),
///     Point2::new(1.0, 3.0),
/// ]);
///
/// let result = sutherland_hodgman(&subject, &clip);
/// assert!((result.area() - 1.0_f64).abs() < 1e-10);
/// ```
pub fn sutherland_hodgman<F: Float>(subject: &Polygon<F>, clip: &Polygon<F>) -> Polygon<F> {
    if subject.is_empty() || clip.is_empty() {
        return Polygon::empty();
    }

    let mut output = subject.clone();

    let clip_n = clip.vertices.len();
    for i in 0..clip_n {
        if output.is_empty() {
            break;
        }
        output = clip_half_plane(&output, clip.vertices[i], clip.vertices[(i + 1) % clip_n]);
    }

    output
}

/// Keeps the part of a polygon on the left of (or on) the directed line
/// `edge_start -> edge_end`.
///
/// A zero-length edge defines no line and keeps the polygon unchanged.
///
/// # Example
///
/// ```
/// use dualmesh::polygon::{clip_half_plane, Polygon};
/// use dualmesh::Point2;
///
/// let square = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ]);
///
/// // Keep the half with x <= 1
/// let left = clip_half_plane(&square, Point2::new(1.0, 0.0), Point2::new(1.0, 1.0));
/// assert!((left.area() - 2.0_f64).abs() < 1e-10);
/// ```
pub fn clip_half_plane<F: Float>(
    polygon: &Polygon<F>,
    edge_start: Point2<F>,
    edge_end: Point2<F>,
) -> Polygon<F> {
    let input = &polygon.vertices;
    let mut output = Vec::with_capacity(input.len() + 1);

    let input_n = input.len();
    for j in 0..input_n {
        let current = input[j];
        let next = input[(j + 1) % input_n];

        let current_inside = is_left_or_on(current, edge_start, edge_end);
        let next_inside = is_left_or_on(next, edge_start, edge_end);

        if current_inside {
            output.push(current);
            if !next_inside {
                // Exiting: add intersection
                if let Some(intersection) = line_intersection(current, next, edge_start, edge_end) {
                    output.push(intersection);
                }
            }
        } else if next_inside {
            // Entering: add intersection
            if let Some(intersection) = line_intersection(current, next, edge_start, edge_end) {
                output.push(intersection);
            }
        }
    }

    Polygon::new(output)
}

/// Computes the intersection of segment `p1 -> p2` with the infinite line through `p3`, `p4`.
fn line_intersection<F: Float>(
    p1: Point2<F>,
    p2: Point2<F>,
    p3: Point2<F>,
    p4: Point2<F>,
) -> Option<Point2<F>> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;

    let denom = d1.cross(d2);

    if denom == F::zero() {
        return None; // Parallel
    }

    let t = (p3 - p1).cross(d2) / denom;
    let t = t.max(F::zero()).min(F::one());

    Some(p1 + d1 * t)
}
