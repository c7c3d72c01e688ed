use crate::{basis::OrthoNormal, integrator::Integrator};

use geometry::{Global, Shape};

/// `L2` projection of a `K`-component field onto an orthonormal basis.
#[derive(Debug, Clone)]
pub struct Projection<const P: usize, const K: usize> {
  basis: OrthoNormal<P>,
  /// Column `j` holds the coefficient of `φ_j` for every component.
  coefficients: na::DMatrix<f64>,
  measure: f64,
}

impl<const P: usize, const K: usize> Projection<P, K> {
  pub fn new<S: Shape<D>, const D: usize>(
    f: impl Fn(&Global<P>) -> na::SVector<f64, K>,
    basis: OrthoNormal<P>,
    integrator: &Integrator<S, D, P>,
  ) -> Self {
    let mut coefficients = na::DMatrix::zeros(K, basis.len());
    for (x, &w) in integrator.globals().iter().zip(integrator.global_weights()) {
      let value = na::DVector::from_column_slice(f(x).as_slice());
      coefficients.ger(w, &value, &basis.eval(x), 1.0);
    }
    Self {
      basis,
      coefficients,
      measure: integrator.measure(),
    }
  }

  pub fn basis(&self) -> &OrthoNormal<P> {
    &self.basis
  }
  pub fn coefficients(&self) -> &na::DMatrix<f64> {
    &self.coefficients
  }

  pub fn value(&self, x: &Global<P>) -> na::SVector<f64, K> {
    let value = &self.coefficients * self.basis.eval(x);
    na::SVector::from_column_slice(value.as_slice())
  }

  /// Mean over the element. Only `φ_0`, the normalized constant, has a
  /// nonzero integral.
  pub fn average(&self) -> na::SVector<f64, K> {
    let c0 = self.coefficients.column(0);
    na::SVector::from_fn(|k, _| c0[k] / self.measure.sqrt())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use approx::assert_relative_eq;
  use geometry::{CoordElement, Domain, VolumeShape};
  use quadrature::gauss;

  fn sheared_tetrahedron() -> CoordElement<VolumeShape, 3, 3> {
    let nodes = vec![
      Global::<3>::new(0.0, 0.0, 0.0),
      Global::<3>::new(2.0, 0.0, 0.0),
      Global::<3>::new(0.5, 1.5, 0.0),
      Global::<3>::new(0.3, 0.2, 1.0),
    ];
    CoordElement::new(VolumeShape::Tetrahedron4, nodes).unwrap()
  }

  #[test]
  fn reproduces_polynomials() {
    let element = sheared_tetrahedron();
    let rule = gauss::<4, 3>(Domain::Tetrahedron);
    let integrator = Integrator::new(&element, &rule).unwrap();
    let basis = OrthoNormal::new(2, &integrator).unwrap();

    let f = |x: &Global<3>| na::Vector2::new(1.0 + x.x * x.y - 2.0 * x.z, 3.0 * x.z * x.z);
    let projection = Projection::new(f, basis, &integrator);
    for x in [Global::<3>::new(0.5, 0.3, 0.2), element.center()] {
      assert_relative_eq!(projection.value(&x), f(&x), epsilon = 1e-11);
    }

    let mean = integrator.integrate(f) / integrator.volume();
    assert_relative_eq!(projection.average(), mean, epsilon = 1e-12);
  }

  #[test]
  fn averages_are_exact_for_low_degree() {
    let element = sheared_tetrahedron();
    let rule = gauss::<4, 3>(Domain::Tetrahedron);
    let integrator = Integrator::new(&element, &rule).unwrap();
    let basis = OrthoNormal::new(0, &integrator).unwrap();
    let projection = Projection::new(|x: &Global<3>| na::Vector1::new(x.x.exp()), basis, &integrator);
    let mean = integrator.integrate(|x| x.x.exp()) / integrator.volume();
    assert_relative_eq!(projection.average()[0], mean, epsilon = 1e-12);
    assert_relative_eq!(projection.value(&element.center())[0], mean, epsilon = 1e-12);
  }
}
