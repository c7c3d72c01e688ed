use geometry::{
  CoordElement, Error, Global, Local, NormalFrame, Result, Shape, SurfaceShape,
};
use num_traits::Zero;
use quadrature::RefQuadrature;
use std::ops::{Add, Mul};
use tracing::warn;

/// Quadrature points of a rule mapped onto one element.
///
/// Everything is evaluated once at construction; the element is borrowed
/// and must outlive the integrator.
#[derive(Debug, Clone)]
pub struct Integrator<'e, K, const D: usize, const P: usize> {
  element: &'e CoordElement<K, D, P>,
  locals: Vec<Local<D>>,
  globals: Vec<Global<P>>,
  local_weights: Vec<f64>,
  global_weights: Vec<f64>,
  measure: f64,
  ninverted: usize,
}

impl<'e, K: Shape<D>, const D: usize, const P: usize> Integrator<'e, K, D, P> {
  pub fn new(element: &'e CoordElement<K, D, P>, rule: &RefQuadrature<D>) -> Result<Self> {
    let domain = element.shape().domain();
    if rule.domain() != domain {
      return Err(Error::InvalidArgument(format!(
        "{} rule cannot integrate over a {domain}",
        rule.domain()
      )));
    }

    let npoints = rule.npoints();
    let mut locals = Vec::with_capacity(npoints);
    let mut globals = Vec::with_capacity(npoints);
    let mut local_weights = Vec::with_capacity(npoints);
    let mut global_weights = Vec::with_capacity(npoints);
    let mut ninverted = 0;
    let mut min_density = f64::INFINITY;
    for (local, weight) in rule.iter() {
      let density = element.signed_density(local);
      if density <= 0.0 {
        ninverted += 1;
      }
      min_density = min_density.min(density);
      locals.push(*local);
      globals.push(element.local2global(local));
      local_weights.push(weight);
      global_weights.push(weight * density.abs());
    }
    let measure = global_weights.iter().sum();
    if ninverted > 0 {
      warn!(
        "non-positive jacobian density at {ninverted} of {npoints} points on {} (min {min_density:e})",
        element.shape().name()
      );
    }

    Ok(Self {
      element,
      locals,
      globals,
      local_weights,
      global_weights,
      measure,
      ninverted,
    })
  }

  pub fn element(&self) -> &'e CoordElement<K, D, P> {
    self.element
  }
  pub fn npoints(&self) -> usize {
    self.locals.len()
  }
  pub fn local(&self, i: usize) -> &Local<D> {
    &self.locals[i]
  }
  pub fn global(&self, i: usize) -> &Global<P> {
    &self.globals[i]
  }
  pub fn local_weight(&self, i: usize) -> f64 {
    self.local_weights[i]
  }
  pub fn global_weight(&self, i: usize) -> f64 {
    self.global_weights[i]
  }
  pub fn globals(&self) -> &[Global<P>] {
    &self.globals
  }
  pub fn global_weights(&self) -> &[f64] {
    &self.global_weights
  }

  /// Number of quadrature points with a non-positive Jacobian density.
  pub fn ninverted(&self) -> usize {
    self.ninverted
  }

  /// Total measure of the element, the sum of the global weights.
  pub fn measure(&self) -> f64 {
    self.measure
  }

  /// `∫ f` over the element for any `f` valued in a vector space.
  pub fn integrate<T, F>(&self, f: F) -> T
  where
    F: Fn(&Global<P>) -> T,
    T: Zero + Add<Output = T> + Mul<f64, Output = T>,
  {
    self
      .globals
      .iter()
      .zip(&self.global_weights)
      .fold(T::zero(), |sum, (x, &w)| sum + f(x) * w)
  }

  /// Like [`Self::integrate`] with the integrand given in local coordinates.
  pub fn integrate_local<T, F>(&self, f: F) -> T
  where
    F: Fn(&Local<D>) -> T,
    T: Zero + Add<Output = T> + Mul<f64, Output = T>,
  {
    self
      .locals
      .iter()
      .zip(&self.global_weights)
      .fold(T::zero(), |sum, (x, &w)| sum + f(x) * w)
  }

  /// `L2` inner product of two scalar functions.
  pub fn inner_product(&self, f: impl Fn(&Global<P>) -> f64, g: impl Fn(&Global<P>) -> f64) -> f64 {
    self.integrate(|x| f(x) * g(x))
  }
  pub fn norm(&self, f: impl Fn(&Global<P>) -> f64) -> f64 {
    self.integrate(|x| f(x).powi(2)).sqrt()
  }
}

impl<K: Shape<3>> Integrator<'_, K, 3, 3> {
  pub fn volume(&self) -> f64 {
    self.measure
  }
}
impl<K: Shape<2>, const P: usize> Integrator<'_, K, 2, P> {
  pub fn area(&self) -> f64 {
    self.measure
  }
}
impl<K: Shape<1>, const P: usize> Integrator<'_, K, 1, P> {
  pub fn length(&self) -> f64 {
    self.measure
  }
}

/// Integrator over a surface element in 3D that also carries the normal
/// frame at every quadrature point.
#[derive(Debug, Clone)]
pub struct FaceIntegrator<'e> {
  integrator: Integrator<'e, SurfaceShape, 2, 3>,
  frames: Vec<NormalFrame>,
}

impl<'e> FaceIntegrator<'e> {
  pub fn new(face: &'e CoordElement<SurfaceShape, 2, 3>, rule: &RefQuadrature<2>) -> Result<Self> {
    let integrator = Integrator::new(face, rule)?;
    let frames = (0..integrator.npoints())
      .map(|i| face.normal_frame(integrator.local(i)))
      .collect();
    Ok(Self { integrator, frames })
  }

  pub fn integrator(&self) -> &Integrator<'e, SurfaceShape, 2, 3> {
    &self.integrator
  }
  pub fn npoints(&self) -> usize {
    self.integrator.npoints()
  }
  pub fn normal_frame(&self, i: usize) -> &NormalFrame {
    &self.frames[i]
  }
  pub fn area(&self) -> f64 {
    self.integrator.area()
  }

  /// `∫ f(x, n(x))` over the face, `n` being the unit normal.
  pub fn integrate<T, F>(&self, f: F) -> T
  where
    F: Fn(&Global<3>, &na::Vector3<f64>) -> T,
    T: Zero + Add<Output = T> + Mul<f64, Output = T>,
  {
    (0..self.npoints()).fold(T::zero(), |sum, i| {
      let x = self.integrator.global(i);
      sum + f(x, &self.frames[i].normal) * self.integrator.global_weight(i)
    })
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use approx::assert_relative_eq;
  use geometry::VolumeShape;
  use quadrature::gauss;

  #[test]
  fn rule_domain_must_match() {
    let nodes = VolumeShape::Hexahedron8.ref_nodes().to_vec();
    let element = CoordElement::<_, 3, 3>::new(VolumeShape::Hexahedron8, nodes).unwrap();
    let rule = gauss::<2, 3>(geometry::Domain::Tetrahedron);
    assert!(Integrator::new(&element, &rule).is_err());
  }

  #[test]
  fn reference_hexahedron() {
    let nodes = VolumeShape::Hexahedron8.ref_nodes().to_vec();
    let element = CoordElement::<_, 3, 3>::new(VolumeShape::Hexahedron8, nodes).unwrap();
    let rule = gauss::<2, 3>(geometry::Domain::Hexahedron);
    let integrator = Integrator::new(&element, &rule).unwrap();
    assert_eq!(integrator.npoints(), 8);
    assert_relative_eq!(integrator.volume(), 8.0, epsilon = 1e-14);
    for i in 0..integrator.npoints() {
      assert_relative_eq!(integrator.local(i), integrator.global(i));
      assert_relative_eq!(integrator.local_weight(i), integrator.global_weight(i), epsilon = 1e-15);
    }
    let moment: na::Vector3<f64> = integrator.integrate(|x| x.component_mul(x));
    assert_relative_eq!(moment, na::Vector3::repeat(8.0 / 3.0), epsilon = 1e-14);
    assert_relative_eq!(integrator.norm(|x| x.x), (8.0f64 / 3.0).sqrt(), epsilon = 1e-14);
    assert_relative_eq!(integrator.inner_product(|x| x.x, |x| x.y), 0.0, epsilon = 1e-15);
  }

  #[test]
  fn local_integrand_on_curved_quadrangle() {
    let mut nodes: Vec<Global<2>> = SurfaceShape::Quadrangle9.ref_nodes().to_vec();
    nodes[6] += Global::<2>::new(0.1, 0.3);
    nodes[8] += Global::<2>::new(-0.05, 0.1);
    let element = CoordElement::<_, 2, 2>::new(SurfaceShape::Quadrangle9, nodes).unwrap();
    let rule = gauss::<4, 2>(geometry::Domain::Quadrangle);
    let integrator = Integrator::new(&element, &rule).unwrap();
    assert_eq!(integrator.ninverted(), 0);
    assert!(integrator.area() > 4.0);
    assert_relative_eq!(integrator.integrate_local(|_| 1.0), integrator.measure(), epsilon = 1e-14);
    // local and global integrands agree through the coordinate map
    let global: Global<2> = integrator.integrate(|x| *x);
    let local: Global<2> = integrator.integrate_local(|l| element.local2global(l));
    assert_relative_eq!(local, global, epsilon = 1e-14);
  }

  #[test]
  fn inverted_points_are_counted() {
    let mut nodes = VolumeShape::Hexahedron8.ref_nodes().to_vec();
    nodes.swap(1, 3);
    nodes.swap(5, 7);
    let element = CoordElement::<_, 3, 3>::new(VolumeShape::Hexahedron8, nodes).unwrap();
    let rule = gauss::<2, 3>(geometry::Domain::Hexahedron);
    let integrator = Integrator::new(&element, &rule).unwrap();
    assert_eq!(integrator.ninverted(), integrator.npoints());
    assert_relative_eq!(integrator.volume(), 8.0, epsilon = 1e-14);
  }
}
