//! Lagrange coordinate elements on the reference cells.
//!
//! A [`CoordElement`] couples a shape tag with the global coordinates of its
//! nodes and provides the forward map, its Jacobian (and, for polynomial
//! shapes, higher derivatives) and the Newton based inverse map.

extern crate nalgebra as na;

pub mod coord;
pub mod element;
pub mod error;
pub mod frame;
pub mod newton;
pub mod poly;
pub mod shape;

pub use common::{Dim, Domain};
pub use coord::{Global, Hessian, Jacobian, Local, Tensor3};
pub use element::CoordElement;
pub use error::{Divergence, Error, Result};
pub use frame::NormalFrame;
pub use newton::NewtonConfig;
pub use shape::{LineShape, Shape, SurfaceShape, VolumeShape};
