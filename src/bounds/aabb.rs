//! Axis-aligned bounding box.

use crate::error::DelaunayError;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners. Also serves as the clipping
/// rectangle of a Voronoi diagram, see [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

/// The rectangle Voronoi cells are clipped against.
pub type Viewport<F> = Aabb2<F>;

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates a validated AABB from `(xmin, ymin, xmax, ymax)` extents.
    ///
    /// Fails with [`DelaunayError::InvalidViewport`] if any bound is
    /// non-finite or if a maximum is smaller than its minimum. Zero-width
    /// or zero-height boxes are accepted.
    ///
    /// # Example
    ///
    /// ```
    /// use dualmesh::Viewport;
    ///
    /// let viewport = Viewport::from_extents(0.0_f64, 0.0, 960.0, 500.0).unwrap();
    /// assert_eq!(viewport.width(), 960.0);
    ///
    /// assert!(Viewport::from_extents(10.0_f64, 0.0, 0.0, 1.0).is_err());
    /// ```
    pub fn from_extents(xmin: F, ymin: F, xmax: F, ymax: F) -> Result<Self, DelaunayError> {
        let finite = [xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite());
        if !finite || xmax < xmin || ymax < ymin {
            return Err(DelaunayError::InvalidViewport);
        }
        Ok(Self::new(Point2::new(xmin, ymin), Point2::new(xmax, ymax)))
    }

    /// Creates an AABB containing a single point.
    #[inline]
    pub fn from_point(p: Point2<F>) -> Self {
        Self { min: p, max: p }
    }

    /// Creates an AABB from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut aabb = Self::from_point(first);
        for p in iter {
            aabb = aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    /// Returns the width of the AABB.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the AABB.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the area of the AABB.
    #[inline]
    pub fn area(self) -> F {
        self.width() * self.height()
    }

    /// Returns the length of the diagonal.
    #[inline]
    pub fn diagonal(self) -> F {
        self.min.distance(self.max)
    }

    /// Returns the center point of the AABB.
    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Returns a new AABB expanded to include the given point.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns `true` if this AABB contains the given point (boundary included).
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns the four corners in counter-clockwise order, starting at `min`.
    #[inline]
    pub fn corners(self) -> [Point2<F>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Returns the box as a counter-clockwise polygon.
    pub fn to_polygon(self) -> Polygon<F> {
        Polygon::new(self.corners().to_vec())
    }
}
