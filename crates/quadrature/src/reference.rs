//! Quadrature on the reference domains.
//!
//! Hypercubes use tensor products of 1d rules. Simplices, wedges and
//! pyramids are integrated in collapsed coordinates: a rule on `[-1,1]^d`
//! is mapped onto the domain, the Jacobian of the collapse is folded into
//! the weights. When the rule on a collapsed axis carries a weight function
//! itself (Gauss-Jacobi), the collapse factor is divided by it.

use crate::{Jacobi, Legendre, Rule1d};

use common::{Dim, Domain};
use itertools::iproduct;

pub type RefPoint<const D: usize> = na::SVector<f64, D>;

/// Points and weights of a rule on a reference domain.
///
/// Weights integrate against the plain Lebesgue measure of the reference
/// domain, so they sum to [`Domain::ref_measure`].
#[derive(Debug, Clone)]
pub struct RefQuadrature<const D: usize> {
  domain: Domain,
  points: Vec<RefPoint<D>>,
  weights: Vec<f64>,
}

impl<const D: usize> RefQuadrature<D> {
  pub fn new(domain: Domain, points: Vec<RefPoint<D>>, weights: Vec<f64>) -> Self {
    assert_eq!(domain.dim(), D, "domain {domain} is not {D}-dimensional");
    assert_eq!(points.len(), weights.len());
    Self {
      domain,
      points,
      weights,
    }
  }

  pub fn domain(&self) -> Domain {
    self.domain
  }
  pub fn dim(&self) -> Dim {
    D
  }
  pub fn npoints(&self) -> usize {
    self.points.len()
  }
  pub fn point(&self, i: usize) -> &RefPoint<D> {
    &self.points[i]
  }
  pub fn weight(&self, i: usize) -> f64 {
    self.weights[i]
  }
  pub fn points(&self) -> &[RefPoint<D>] {
    &self.points
  }
  pub fn weights(&self) -> &[f64] {
    &self.weights
  }
  pub fn iter(&self) -> impl Iterator<Item = (&RefPoint<D>, f64)> + '_ {
    self.points.iter().zip(self.weights.iter().copied())
  }

  /// Approximates the integral of `f` over the reference domain.
  pub fn integrate(&self, f: impl Fn(&RefPoint<D>) -> f64) -> f64 {
    self.iter().map(|(x, w)| w * f(x)).sum()
  }

  fn reshape<const E: usize>(self) -> RefQuadrature<E> {
    assert_eq!(D, E);
    let points = self
      .points
      .iter()
      .map(|p| RefPoint::<E>::from_fn(|i, _| p[i]))
      .collect();
    RefQuadrature::new(self.domain, points, self.weights)
  }
}

/// Pairs `(t, w)` of a 1d rule integrating `factor(t) dt` against the plain
/// measure, i.e. with the rule's own weight function divided out.
fn collapsed_axis<R: Rule1d>(factor: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
  R::points()
    .iter()
    .zip(R::weights())
    .map(|(&t, &w)| (t, w * factor(t) / R::weight_function(t)))
    .collect()
}
fn axis<R: Rule1d>() -> Vec<(f64, f64)> {
  collapsed_axis::<R>(|_| 1.0)
}

pub fn line<R: Rule1d>() -> RefQuadrature<1> {
  let (points, weights) = axis::<R>()
    .into_iter()
    .map(|(x, w)| (na::Vector1::new(x), w))
    .unzip();
  RefQuadrature::new(Domain::Line, points, weights)
}

pub fn quadrangle<Rx: Rule1d, Ry: Rule1d>() -> RefQuadrature<2> {
  let (points, weights) = iproduct!(axis::<Rx>(), axis::<Ry>())
    .map(|((x, wx), (y, wy))| (na::Vector2::new(x, y), wx * wy))
    .unzip();
  RefQuadrature::new(Domain::Quadrangle, points, weights)
}

pub fn hexahedron<Rx: Rule1d, Ry: Rule1d, Rz: Rule1d>() -> RefQuadrature<3> {
  let (points, weights) = iproduct!(axis::<Rx>(), axis::<Ry>(), axis::<Rz>())
    .map(|((x, wx), (y, wy), (z, wz))| (na::Vector3::new(x, y, z), wx * wy * wz))
    .unzip();
  RefQuadrature::new(Domain::Hexahedron, points, weights)
}

/// `x = (1+a)(1-b)/4`, `y = (1+b)/2`, `dA = (1-b)/8 da db`.
pub fn triangle<Ra: Rule1d, Rb: Rule1d>() -> RefQuadrature<2> {
  let (points, weights) = iproduct!(axis::<Ra>(), collapsed_axis::<Rb>(|b| (1.0 - b) / 8.0))
    .map(|((a, wa), (b, wb))| {
      let x = (1.0 + a) * (1.0 - b) / 4.0;
      let y = (1.0 + b) / 2.0;
      (na::Vector2::new(x, y), wa * wb)
    })
    .unzip();
  RefQuadrature::new(Domain::Triangle, points, weights)
}

/// `z = (1+c)/2`, `y = (1+b)(1-z)/2`, `x = (1+a)(1-y-z)/2`,
/// `dV = (1-b)(1-c)^2/64 da db dc`.
pub fn tetrahedron<Ra: Rule1d, Rb: Rule1d, Rc: Rule1d>() -> RefQuadrature<3> {
  let (points, weights) = iproduct!(
    axis::<Ra>(),
    collapsed_axis::<Rb>(|b| (1.0 - b) / 8.0),
    collapsed_axis::<Rc>(|c| (1.0 - c).powi(2) / 8.0)
  )
  .map(|((a, wa), (b, wb), (c, wc))| {
    let z = (1.0 + c) / 2.0;
    let y = (1.0 + b) * (1.0 - z) / 2.0;
    let x = (1.0 + a) * (1.0 - y - z) / 2.0;
    (na::Vector3::new(x, y, z), wa * wb * wc)
  })
  .unzip();
  RefQuadrature::new(Domain::Tetrahedron, points, weights)
}

/// Collapsed triangle times a line rule in `z`.
pub fn wedge<Ra: Rule1d, Rb: Rule1d, Rz: Rule1d>() -> RefQuadrature<3> {
  let base = triangle::<Ra, Rb>();
  let (points, weights) = iproduct!(base.iter(), axis::<Rz>())
    .map(|((p, wp), (z, wz))| (na::Vector3::new(p.x, p.y, z), wp * wz))
    .unzip();
  RefQuadrature::new(Domain::Wedge, points, weights)
}

/// `z = (1+c)/2`, `x = a(1-z)`, `y = b(1-z)`, `dV = (1-c)^2/8 da db dc`.
pub fn pyramid<Ra: Rule1d, Rb: Rule1d, Rc: Rule1d>() -> RefQuadrature<3> {
  let (points, weights) = iproduct!(
    axis::<Ra>(),
    axis::<Rb>(),
    collapsed_axis::<Rc>(|c| (1.0 - c).powi(2) / 8.0)
  )
  .map(|((a, wa), (b, wb), (c, wc))| {
    let z = (1.0 + c) / 2.0;
    (na::Vector3::new(a * (1.0 - z), b * (1.0 - z), z), wa * wb * wc)
  })
  .unzip();
  RefQuadrature::new(Domain::Pyramid, points, weights)
}

/// Default Gauss rule with `Q` points per axis on `domain`.
///
/// Gauss-Legendre on all axes, except the collapsed axis of tetrahedra and
/// pyramids which uses Gauss-Jacobi. Exact for polynomials of degree
/// `2Q-1` per axis on hypercubes and of total degree `2Q-2` on simplices.
pub fn gauss<const Q: usize, const D: usize>(domain: Domain) -> RefQuadrature<D>
where
  Legendre<Q>: Rule1d,
  Jacobi<Q>: Rule1d,
{
  assert_eq!(domain.dim(), D, "domain {domain} is not {D}-dimensional");
  match domain {
    Domain::Line => line::<Legendre<Q>>().reshape(),
    Domain::Quadrangle => quadrangle::<Legendre<Q>, Legendre<Q>>().reshape(),
    Domain::Triangle => triangle::<Legendre<Q>, Legendre<Q>>().reshape(),
    Domain::Hexahedron => hexahedron::<Legendre<Q>, Legendre<Q>, Legendre<Q>>().reshape(),
    Domain::Tetrahedron => tetrahedron::<Legendre<Q>, Legendre<Q>, Jacobi<Q>>().reshape(),
    Domain::Wedge => wedge::<Legendre<Q>, Legendre<Q>, Legendre<Q>>().reshape(),
    Domain::Pyramid => pyramid::<Legendre<Q>, Legendre<Q>, Jacobi<Q>>().reshape(),
  }
}
