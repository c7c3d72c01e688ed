use crate::integrator::Integrator;

use common::combo::binomial;
use geometry::{Error, Global, Result, Shape};
use itertools::Itertools;

/// Scaled monomials `((x - c)/h)^e` with `|e| <= degree`, ordered by total
/// degree.
#[derive(Debug, Clone)]
pub struct Taylor<const P: usize> {
  degree: usize,
  center: Global<P>,
  scale: f64,
  exponents: Vec<[usize; P]>,
}

impl<const P: usize> Taylor<P> {
  pub fn new(degree: usize, center: Global<P>, scale: f64) -> Self {
    assert!(scale > 0.0);
    let exponents = (0..=degree)
      .flat_map(|total| {
        (0..P)
          .map(|_| 0..=total)
          .multi_cartesian_product()
          .filter(move |e| e.iter().sum::<usize>() == total)
          .sorted_by(|a, b| b.cmp(a))
      })
      .map(|e| std::array::from_fn(|k| e[k]))
      .collect_vec();
    debug_assert_eq!(exponents.len(), Self::count(degree));
    Self {
      degree,
      center,
      scale,
      exponents,
    }
  }

  /// Number of monomials of total degree at most `degree`.
  pub fn count(degree: usize) -> usize {
    binomial(degree + P, P)
  }

  pub fn len(&self) -> usize {
    self.exponents.len()
  }
  pub fn is_empty(&self) -> bool {
    self.exponents.is_empty()
  }
  pub fn degree(&self) -> usize {
    self.degree
  }
  pub fn exponents(&self) -> &[[usize; P]] {
    &self.exponents
  }

  fn scaled(&self, x: &Global<P>) -> Global<P> {
    (x - self.center) / self.scale
  }

  pub fn eval(&self, x: &Global<P>) -> na::DVector<f64> {
    let y = self.scaled(x);
    na::DVector::from_iterator(
      self.len(),
      self
        .exponents
        .iter()
        .map(|e| (0..P).map(|k| y[k].powi(e[k] as i32)).product::<f64>()),
    )
  }

  /// Row `i` is the gradient of the `i`-th monomial.
  pub fn eval_gradients(&self, x: &Global<P>) -> na::DMatrix<f64> {
    let y = self.scaled(x);
    na::DMatrix::from_fn(self.len(), P, |i, d| {
      let e = &self.exponents[i];
      if e[d] == 0 {
        return 0.0;
      }
      let factor = e[d] as f64 / self.scale;
      factor
        * (0..P)
          .map(|k| {
            let ek = if k == d { e[k] - 1 } else { e[k] };
            y[k].powi(ek as i32)
          })
          .product::<f64>()
    })
  }
}

/// Polynomials of total degree at most `degree`, orthonormal in `L2` over
/// one element.
///
/// Obtained from the Taylor basis centered at the element center by the
/// Cholesky factor `L` of its Gram matrix, `φ = L⁻¹ m`.
#[derive(Debug, Clone)]
pub struct OrthoNormal<const P: usize> {
  taylor: Taylor<P>,
  /// Lower triangular, row `i` holds the Taylor coefficients of `φ_i`.
  coefficients: na::DMatrix<f64>,
}

impl<const P: usize> OrthoNormal<P> {
  pub fn new<S: Shape<D>, const D: usize>(degree: usize, integrator: &Integrator<S, D, P>) -> Result<Self> {
    let element = integrator.element();
    let scale = integrator.measure().powf(1.0 / D as f64);
    if !(scale.is_finite() && scale > 0.0) {
      return Err(Error::InvalidArgument(format!(
        "{} has measure {}, no basis can be built on it",
        element.shape().name(),
        integrator.measure()
      )));
    }
    let taylor = Taylor::new(degree, element.center(), scale);

    let n = taylor.len();
    let mut gram = na::DMatrix::zeros(n, n);
    for (x, &w) in integrator.globals().iter().zip(integrator.global_weights()) {
      let m = taylor.eval(x);
      gram.ger(w, &m, &m, 1.0);
    }
    let not_spd = || {
      Error::InvalidArgument(format!(
        "gram matrix of the degree {degree} basis is not positive definite on {}",
        element.shape().name()
      ))
    };
    let cholesky = na::Cholesky::new(gram).ok_or_else(not_spd)?;
    let coefficients = cholesky
      .l()
      .solve_lower_triangular(&na::DMatrix::identity(n, n))
      .ok_or_else(not_spd)?;
    Ok(Self {
      taylor,
      coefficients,
    })
  }

  pub fn len(&self) -> usize {
    self.taylor.len()
  }
  pub fn is_empty(&self) -> bool {
    self.taylor.is_empty()
  }
  pub fn degree(&self) -> usize {
    self.taylor.degree()
  }
  pub fn taylor(&self) -> &Taylor<P> {
    &self.taylor
  }
  pub fn coefficients(&self) -> &na::DMatrix<f64> {
    &self.coefficients
  }

  pub fn eval(&self, x: &Global<P>) -> na::DVector<f64> {
    &self.coefficients * self.taylor.eval(x)
  }
  /// Row `i` is the gradient of `φ_i`.
  pub fn eval_gradients(&self, x: &Global<P>) -> na::DMatrix<f64> {
    &self.coefficients * self.taylor.eval_gradients(x)
  }
}
