//! Gauss-type quadrature on the reference domains.
//!
//! One-dimensional rules are zero-sized types implementing [`Rule1d`], the
//! number of points being a const generic. Only the tabulated counts have
//! an implementation, so asking for an unsupported rule fails to compile.
//! Rules on the reference domains are built from them by tensor products
//! and collapsed (Duffy) coordinates, see [`reference`].

extern crate nalgebra as na;

pub mod jacobi;
pub mod legendre;
pub mod lobatto;
pub mod reference;

pub use jacobi::Jacobi;
pub use legendre::Legendre;
pub use lobatto::Lobatto;
pub use reference::{gauss, RefQuadrature};

/// A quadrature rule on `[-1,1]` for the weight function [`Rule1d::weight_function`].
pub trait Rule1d {
  const NAME: &'static str;
  const NPOINTS: usize;
  /// Highest polynomial degree integrated exactly against the weight function.
  const EXACTNESS: usize;

  /// Abscissas in ascending order.
  fn points() -> &'static [f64];
  fn weights() -> &'static [f64];

  fn weight_function(_x: f64) -> f64 {
    1.0
  }

  /// Approximates `∫_{-1}^{1} w(x) f(x) dx`.
  fn apply(f: impl Fn(f64) -> f64) -> f64 {
    Self::points()
      .iter()
      .zip(Self::weights())
      .map(|(&x, &w)| w * f(x))
      .sum()
  }
}

macro_rules! rule1d {
  ($rule:ident<$q:literal>, exact $deg:literal, points [$($p:expr),* $(,)?], weights [$($w:expr),* $(,)?]) => {
    impl $crate::Rule1d for $rule<$q> {
      const NAME: &'static str = stringify!($rule);
      const NPOINTS: usize = $q;
      const EXACTNESS: usize = $deg;
      fn points() -> &'static [f64] {
        &[$($p),*]
      }
      fn weights() -> &'static [f64] {
        &[$($w),*]
      }
    }
  };
}
pub(crate) use rule1d;

#[cfg(test)]
pub(crate) mod test_util {
  use crate::Rule1d;

  /// Exact `∫_{-1}^{1} x^k dx`.
  pub fn monomial_integral(k: usize) -> f64 {
    if k % 2 == 1 {
      0.0
    } else {
      2.0 / (k + 1) as f64
    }
  }

  pub fn assert_rule<R: Rule1d>() {
    let points = R::points();
    let weights = R::weights();
    assert_eq!(points.len(), R::NPOINTS);
    assert_eq!(weights.len(), R::NPOINTS);
    assert!(points.windows(2).all(|w| w[0] < w[1]), "{} points unsorted", R::NAME);
    assert!(points.iter().all(|x| x.abs() <= 1.0));
    assert!(weights.iter().all(|&w| w > 0.0));
  }
}
