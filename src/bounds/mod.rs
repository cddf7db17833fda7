//! Bounding boxes and clipping viewports.

mod aabb;

pub use aabb::{Aabb2, Viewport};
