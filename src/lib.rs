//! Geometric-numerical core of a Discontinuous Galerkin solver.
//!
//! Elements and their coordinate maps live in [`geometry`], quadrature rules
//! in [`quadrature`]. This crate combines them into integrators over
//! physical elements and the orthonormal bases used to represent fields.

extern crate nalgebra as na;

pub mod basis;
pub mod integrator;
pub mod projection;

pub use common;
pub use geometry;
pub use quadrature;

pub use basis::{OrthoNormal, Taylor};
pub use integrator::{FaceIntegrator, Integrator};
pub use projection::Projection;
