//! Build configuration for the triangulator.

/// What to do with points that have NaN or infinite coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Fail the build with [`DelaunayError::InvalidInput`](crate::DelaunayError::InvalidInput).
    #[default]
    Reject,
    /// Leave the point out of the triangulation. It keeps its index but
    /// belongs to no triangle, has no neighbors and no Voronoi cell.
    Skip,
}

/// Options controlling how a triangulation is built.
///
/// # Example
///
/// ```
/// use dualmesh::{NonFinitePolicy, TriangulatorConfig};
///
/// let config = TriangulatorConfig::default()
///     .with_non_finite(NonFinitePolicy::Skip)
///     .with_allow_degenerate(false);
///
/// assert_eq!(config.non_finite, NonFinitePolicy::Skip);
/// assert!(!config.allow_degenerate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangulatorConfig {
    /// Handling of non-finite coordinates.
    pub non_finite: NonFinitePolicy,
    /// When false, a build that forms no triangle fails with
    /// [`DelaunayError::DegenerateInput`](crate::DelaunayError::DegenerateInput)
    /// instead of returning an empty triangulation.
    pub allow_degenerate: bool,
}

impl TriangulatorConfig {
    /// Sets the non-finite coordinate policy.
    #[must_use]
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Sets whether degenerate (triangle-free) results are accepted.
    #[must_use]
    pub fn with_allow_degenerate(mut self, allow: bool) -> Self {
        self.allow_degenerate = allow;
        self
    }
}

impl Default for TriangulatorConfig {
    fn default() -> Self {
        Self {
            non_finite: NonFinitePolicy::Reject,
            allow_degenerate: true,
        }
    }
}
