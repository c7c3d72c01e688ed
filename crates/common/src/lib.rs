extern crate nalgebra as na;

pub mod combo;
pub mod domain;
pub mod linalg;

pub use domain::Domain;

pub type Dim = usize;

/// Floating point type of all coordinates, weights and fields.
pub type Scalar = f64;
