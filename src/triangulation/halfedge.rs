//! Index arithmetic over flat half-edge arrays.
//!
//! Triangle `t` owns half-edges `3t`, `3t + 1` and `3t + 2`. Half-edge `e`
//! starts at vertex `triangles[e]` and ends at `triangles[next_halfedge(e)]`.

/// Sentinel for "no half-edge" / "no point": the twin of a hull edge, or the
/// incoming edge of a point that belongs to no triangle.
pub const EMPTY: usize = usize::MAX;

/// Next half-edge in the same triangle (counter-clockwise).
#[inline]
pub fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 {
        e - 2
    } else {
        e + 1
    }
}

/// Previous half-edge in the same triangle.
#[inline]
pub fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 {
        e + 2
    } else {
        e - 1
    }
}

/// Triangle that owns half-edge `e`.
#[inline]
pub fn triangle_of_edge(e: usize) -> usize {
    e / 3
}

/// The three half-edges owned by triangle `t`.
#[inline]
pub fn edges_of_triangle(t: usize) -> [usize; 3] {
    [3 * t, 3 * t + 1, 3 * t + 2]
}

/// Vertex indices of triangle `t` in a flat triangle array.
#[inline]
pub fn points_of_triangle(triangles: &[usize], t: usize) -> [usize; 3] {
    let [a, b, c] = edges_of_triangle(t);
    [triangles[a], triangles[b], triangles[c]]
}
