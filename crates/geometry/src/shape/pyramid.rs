//! Rational bases of the pyramid family.
//!
//! In collapsed coordinates `s = 1 - z`, `a = x/s`, `b = y/s` the functions
//! take the form `h(a, b) q(z)` with `q` vanishing like `s` at the apex.
//! They are not polynomials, so only values and gradients are provided.

use super::{enrich, Shape, VolumeShape};
use crate::coord::Local;

use std::sync::LazyLock;

const APEX_EPS: f64 = 1e-12;

/// `(ξ, η)` of the base corners.
const BASE_CORNERS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

fn collapse(x: &Local<3>) -> (f64, f64, f64) {
  let s = 1.0 - x.z;
  if s.abs() < APEX_EPS {
    (0.0, 0.0, s)
  } else {
    (x.x / s, x.y / s, s)
  }
}

/// Gradient of `h(a, b) q(z)` given `h`, `∂h/∂a`, `∂h/∂b`, `q/s` and `q'`.
fn collapsed_gradient(h: f64, ha: f64, hb: f64, a: f64, b: f64, q_over_s: f64, dq: f64) -> Local<3> {
  Local::<3>::new(
    ha * q_over_s,
    hb * q_over_s,
    (ha * a + hb * b) * q_over_s + h * dq,
  )
}

/// `1 + v t` for `v = ±1`, `1 - t^2` for `v = 0`, with its derivative.
fn edge_factor(t: f64, v: f64) -> (f64, f64) {
  if v == 0.0 {
    (1.0 - t * t, -2.0 * t)
  } else {
    (1.0 + v * t, v)
  }
}

pub(crate) fn values5(x: &Local<3>) -> Vec<f64> {
  let (a, b, s) = collapse(x);
  let mut values: Vec<f64> = BASE_CORNERS
    .iter()
    .map(|&(xi, eta)| s * (1.0 + xi * a) * (1.0 + eta * b) / 4.0)
    .collect();
  values.push(x.z);
  values
}

pub(crate) fn gradients5(x: &Local<3>) -> Vec<Local<3>> {
  let (a, b, _) = collapse(x);
  let mut gradients: Vec<Local<3>> = BASE_CORNERS
    .iter()
    .map(|&(xi, eta)| {
      let h = (1.0 + xi * a) * (1.0 + eta * b) / 4.0;
      let ha = xi * (1.0 + eta * b) / 4.0;
      let hb = eta * (1.0 + xi * a) / 4.0;
      collapsed_gradient(h, ha, hb, a, b, 1.0, -1.0)
    })
    .collect();
  gradients.push(Local::<3>::new(0.0, 0.0, 1.0));
  gradients
}

/// Edge functions of `Pyramid13`: base edges `h(a,b) s/2`, lateral edges
/// `(1 + ξ a)(1 + η b) z s`.
fn edge_functions(x: &Local<3>) -> (Vec<f64>, Vec<Local<3>>) {
  let (a, b, s) = collapse(x);
  let z = x.z;
  let mut values = Vec::with_capacity(8);
  let mut gradients = Vec::with_capacity(8);

  let base_mids = [(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];
  for (xi, eta) in base_mids {
    let (fa, dfa) = edge_factor(a, xi);
    let (fb, dfb) = edge_factor(b, eta);
    let h = fa * fb / 2.0;
    values.push(h * s);
    gradients.push(collapsed_gradient(h, dfa * fb / 2.0, fa * dfb / 2.0, a, b, 1.0, -1.0));
  }
  for (xi, eta) in BASE_CORNERS {
    let h = (1.0 + xi * a) * (1.0 + eta * b);
    let ha = xi * (1.0 + eta * b);
    let hb = eta * (1.0 + xi * a);
    values.push(h * z * s);
    gradients.push(collapsed_gradient(h, ha, hb, a, b, z, 1.0 - 2.0 * z));
  }
  (values, gradients)
}

/// Base face bubble `(1 - a^2)(1 - b^2) s`.
fn base_bubble(x: &Local<3>) -> (f64, Local<3>) {
  let (a, b, s) = collapse(x);
  let h = (1.0 - a * a) * (1.0 - b * b);
  let gradient = collapsed_gradient(h, -2.0 * a * (1.0 - b * b), -2.0 * b * (1.0 - a * a), a, b, 1.0, -1.0);
  (h * s, gradient)
}

/// Values of the lower order basis at the nodes added by the next stage,
/// indexed `[old function][new node]`.
fn stage_coefficients(values: fn(&Local<3>) -> Vec<f64>, new_nodes: &[Local<3>]) -> Vec<Vec<f64>> {
  let at_nodes: Vec<Vec<f64>> = new_nodes.iter().map(values).collect();
  let nold = at_nodes.first().map_or(0, Vec::len);
  (0..nold)
    .map(|i| at_nodes.iter().map(|v| v[i]).collect())
    .collect()
}

static COEFFS13: LazyLock<Vec<Vec<f64>>> =
  LazyLock::new(|| stage_coefficients(values5, &VolumeShape::Pyramid13.ref_nodes()[5..]));
static COEFFS14: LazyLock<Vec<Vec<f64>>> =
  LazyLock::new(|| stage_coefficients(values13, &VolumeShape::Pyramid14.ref_nodes()[13..]));

pub(crate) fn values13(x: &Local<3>) -> Vec<f64> {
  let (extra, _) = edge_functions(x);
  enrich(values5(x), extra, |i, j| COEFFS13[i][j])
}
pub(crate) fn gradients13(x: &Local<3>) -> Vec<Local<3>> {
  let (_, extra) = edge_functions(x);
  enrich(gradients5(x), extra, |i, j| COEFFS13[i][j])
}

pub(crate) fn values14(x: &Local<3>) -> Vec<f64> {
  let (bubble, _) = base_bubble(x);
  enrich(values13(x), vec![bubble], |i, j| COEFFS14[i][j])
}
pub(crate) fn gradients14(x: &Local<3>) -> Vec<Local<3>> {
  let (_, bubble) = base_bubble(x);
  enrich(gradients13(x), vec![bubble], |i, j| COEFFS14[i][j])
}
