//! Property-based tests for clipped Voronoi cells.
//!
//! This module uses proptest to verify that:
//! - The cells of all sites tile the viewport
//! - Every site lies in its own counter-clockwise cell
//! - Cells sharing an edge always belong to triangulation neighbors
//!
//! The cell properties are checked on uniform sets, on sets scaled by powers
//! of ten, and on points along a line with and without noise across it.

use dualmesh::{Aabb2, Delaunay, Point2, Viewport, Voronoi};
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for generating finite f64 coordinates
fn finite_coordinate() -> impl Strategy<Value = f64> {
    (-100.0..100.0).prop_filter("must be finite", |x: &f64| x.is_finite())
}

/// Strategy for generating point sets of 3 to 40 points
fn point_set() -> impl Strategy<Value = Vec<Point2<f64>>> {
    prop::collection::vec(
        prop::array::uniform2(finite_coordinate()).prop_map(Point2::from),
        3..=40,
    )
}

/// Strategy for point sets scaled by `10^k`, k in -6..=6
fn scaled_point_set() -> impl Strategy<Value = Vec<Point2<f64>>> {
    (point_set(), -6i32..=6).prop_map(|(points, k)| {
        let scale = 10f64.powi(k);
        points
            .into_iter()
            .map(|p| Point2::new(p.x * scale, p.y * scale))
            .collect()
    })
}

/// Strategy for 3 to 40 evenly spaced points along a line.
///
/// Coordinates carry the rounding of the line equation. Half of the sets
/// also get noise across the line of up to 1% of the spacing.
fn line_point_set() -> impl Strategy<Value = Vec<Point2<f64>>> {
    (
        prop::array::uniform2(finite_coordinate()),
        0.0..std::f64::consts::TAU,
        0.01..10.0f64,
        prop_oneof![Just(0.0), Just(1e-2)],
        prop::collection::vec(-1.0..1.0f64, 3..=40),
    )
        .prop_map(|(origin, angle, spacing, noise, offsets)| {
            let (sin, cos) = angle.sin_cos();
            offsets
                .iter()
                .enumerate()
                .map(|(i, &offset)| {
                    let t = i as f64 * spacing;
                    let n = offset * noise * spacing;
                    Point2::new(origin[0] + t * cos - n * sin, origin[1] + t * sin + n * cos)
                })
                .collect()
        })
}

/// Builds the diagram with a viewport strictly containing every site.
fn voronoi_around(points: &[Point2<f64>]) -> Voronoi<f64> {
    let bounds = Aabb2::from_points(points.iter().copied()).unwrap();
    let margin = bounds.diagonal() * 0.1;
    let viewport = Viewport::from_extents(
        bounds.min.x - margin,
        bounds.min.y - margin,
        bounds.max.x + margin,
        bounds.max.y + margin,
    )
    .unwrap();

    Delaunay::new(points).unwrap().voronoi(viewport).unwrap()
}

/// Cell areas sum to the viewport area.
fn check_tiling(voronoi: &Voronoi<f64>) -> Result<(), TestCaseError> {
    let total: f64 = voronoi.cell_polygons().map(|(_, cell)| cell.area()).sum();
    let expected = voronoi.viewport().area();
    prop_assert!(
        (total - expected).abs() <= expected * 1e-6,
        "cells cover {} of {}",
        total,
        expected
    );
    Ok(())
}

/// Every site has a CCW cell containing it.
fn check_sites_in_own_cells(voronoi: &Voronoi<f64>, points: &[Point2<f64>]) -> Result<(), TestCaseError> {
    for (i, &p) in points.iter().enumerate() {
        let cell = voronoi.cell_polygon(i);
        prop_assert!(cell.is_some(), "site {} has no cell", i);
        prop_assert!(cell.unwrap().signed_area() > 0.0);
        prop_assert!(voronoi.contains(i, p), "site {} outside its cell", i);
    }
    Ok(())
}

// =============================================================================
// CELL PROPERTIES
// =============================================================================

proptest! {
    /// Property: cell areas sum to the viewport area
    #[test]
    fn prop_cells_tile_viewport(points in point_set()) {
        check_tiling(&voronoi_around(&points))?;
    }

    /// Property: every site has a CCW cell containing it
    #[test]
    fn prop_site_in_own_cell(points in point_set()) {
        check_sites_in_own_cells(&voronoi_around(&points), &points)?;
    }

    /// Property: tiling and ownership hold at any scale
    #[test]
    fn prop_cells_at_any_scale(points in scaled_point_set()) {
        let voronoi = voronoi_around(&points);
        check_tiling(&voronoi)?;
        check_sites_in_own_cells(&voronoi, &points)?;
    }

    /// Property: tiling and ownership hold along a rounded or noisy line
    #[test]
    fn prop_cells_along_line(points in line_point_set()) {
        let voronoi = voronoi_around(&points);
        check_tiling(&voronoi)?;
        check_sites_in_own_cells(&voronoi, &points)?;
    }

    /// Property: a shared cell edge implies a shared triangulation edge
    #[test]
    fn prop_shared_edges_are_triangulation_edges(points in point_set()) {
        let voronoi = voronoi_around(&points);

        for i in 0..points.len() {
            let neighbors: Vec<usize> = voronoi.neighbors(i).collect();
            for j in voronoi.shared_edge_neighbors(i) {
                prop_assert!(neighbors.contains(&j));
                prop_assert!(voronoi.shared_edge_neighbors(j).any(|k| k == i));
            }
        }
    }
}
