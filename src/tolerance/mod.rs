//! Orientation, incircle and circumcenter predicates.
//!
//! Predicates that classify with a tolerance take it as an explicit
//! parameter. No hidden epsilons are used.

mod predicates;

pub use predicates::{
    circumcenter, circumradius_squared, collinear_tolerance, in_circumcircle, is_flat, orient2d,
    signed_area2, Orientation,
};
