//! Multivariate polynomials in monomial form.
//!
//! Shape functions of all polynomial shapes are assembled symbolically once
//! and differentiated exactly, so values, gradients, Hessians and third
//! derivatives all come out of the same construction.

use crate::coord::{Hessian, Local, Tensor3};

use indexmap::IndexMap;
use std::ops::{Add, Mul, Neg, Sub};

type Exponents<const D: usize> = [u8; D];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Poly<const D: usize> {
  terms: IndexMap<Exponents<D>, f64>,
}

impl<const D: usize> Poly<D> {
  pub fn zero() -> Self {
    Self::default()
  }
  pub fn constant(c: f64) -> Self {
    let mut p = Self::zero();
    p.add_term([0; D], c);
    p
  }
  /// The coordinate `x_axis`.
  pub fn var(axis: usize) -> Self {
    assert!(axis < D);
    let mut exps = [0; D];
    exps[axis] = 1;
    let mut p = Self::zero();
    p.add_term(exps, 1.0);
    p
  }
  /// `c0 + Σ c_k x_k`
  pub fn affine(c0: f64, coeffs: [f64; D]) -> Self {
    coeffs
      .into_iter()
      .enumerate()
      .fold(Self::constant(c0), |p, (k, c)| p + Self::var(k) * c)
  }

  fn add_term(&mut self, exps: Exponents<D>, coeff: f64) {
    if coeff == 0.0 {
      return;
    }
    let entry = self.terms.entry(exps).or_insert(0.0);
    *entry += coeff;
    if *entry == 0.0 {
      self.terms.swap_remove(&exps);
    }
  }

  pub fn nterms(&self) -> usize {
    self.terms.len()
  }
  pub fn is_zero(&self) -> bool {
    self.terms.is_empty()
  }
  /// Total degree. The zero polynomial has degree 0.
  pub fn degree(&self) -> usize {
    self
      .terms
      .keys()
      .map(|exps| exps.iter().map(|&e| e as usize).sum())
      .max()
      .unwrap_or(0)
  }

  pub fn eval(&self, x: &Local<D>) -> f64 {
    self
      .terms
      .iter()
      .map(|(exps, c)| {
        let monomial: f64 = exps
          .iter()
          .zip(x.iter())
          .map(|(&e, &xi)| xi.powi(e as i32))
          .product();
        c * monomial
      })
      .sum()
  }

  pub fn derivative(&self, axis: usize) -> Self {
    let mut d = Self::zero();
    for (exps, &c) in &self.terms {
      let e = exps[axis];
      if e == 0 {
        continue;
      }
      let mut dexps = *exps;
      dexps[axis] -= 1;
      d.add_term(dexps, c * e as f64);
    }
    d
  }
}

impl<const D: usize> Add for Poly<D> {
  type Output = Self;
  fn add(mut self, other: Self) -> Self {
    for (exps, c) in other.terms {
      self.add_term(exps, c);
    }
    self
  }
}
impl<const D: usize> Neg for Poly<D> {
  type Output = Self;
  fn neg(self) -> Self {
    self * -1.0
  }
}
impl<const D: usize> Sub for Poly<D> {
  type Output = Self;
  fn sub(self, other: Self) -> Self {
    self + (-other)
  }
}
impl<const D: usize> Mul<f64> for Poly<D> {
  type Output = Self;
  fn mul(mut self, s: f64) -> Self {
    if s == 0.0 {
      return Self::zero();
    }
    self.terms.values_mut().for_each(|c| *c *= s);
    self
  }
}
impl<const D: usize> Mul for Poly<D> {
  type Output = Self;
  fn mul(self, other: Self) -> Self {
    let mut prod = Self::zero();
    for (ea, &ca) in &self.terms {
      for (eb, &cb) in &other.terms {
        let exps = std::array::from_fn(|k| ea[k] + eb[k]);
        prod.add_term(exps, ca * cb);
      }
    }
    prod
  }
}

/// Shape functions together with their symbolic derivatives up to third order.
#[derive(Debug, Clone)]
pub struct PolyBasis<const D: usize> {
  values: Vec<Poly<D>>,
  gradients: Vec<[Poly<D>; D]>,
  hessians: Vec<[[Poly<D>; D]; D]>,
  third_derivatives: Vec<[[[Poly<D>; D]; D]; D]>,
}

impl<const D: usize> PolyBasis<D> {
  pub fn new(values: Vec<Poly<D>>) -> Self {
    let gradients: Vec<[Poly<D>; D]> = values
      .iter()
      .map(|p| std::array::from_fn(|k| p.derivative(k)))
      .collect();
    let hessians: Vec<[[Poly<D>; D]; D]> = gradients
      .iter()
      .map(|g| std::array::from_fn(|k| std::array::from_fn(|l| g[k].derivative(l))))
      .collect();
    let third_derivatives = hessians
      .iter()
      .map(|h| {
        std::array::from_fn(|k| std::array::from_fn(|l| std::array::from_fn(|m| h[k][l].derivative(m))))
      })
      .collect();
    Self {
      values,
      gradients,
      hessians,
      third_derivatives,
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
  pub fn polys(&self) -> &[Poly<D>] {
    &self.values
  }

  pub fn eval_values(&self, x: &Local<D>) -> Vec<f64> {
    self.values.iter().map(|p| p.eval(x)).collect()
  }
  pub fn eval_gradients(&self, x: &Local<D>) -> Vec<Local<D>> {
    self
      .gradients
      .iter()
      .map(|g| Local::from_fn(|k, _| g[k].eval(x)))
      .collect()
  }
  pub fn eval_hessians(&self, x: &Local<D>) -> Vec<Hessian<D>> {
    self
      .hessians
      .iter()
      .map(|h| Hessian::from_fn(|k, l| h[k][l].eval(x)))
      .collect()
  }
  pub fn eval_third_derivatives(&self, x: &Local<D>) -> Vec<Tensor3<D>> {
    self
      .third_derivatives
      .iter()
      .map(|t| std::array::from_fn(|k| Hessian::from_fn(|l, m| t[k][l][m].eval(x))))
      .collect()
  }
}
