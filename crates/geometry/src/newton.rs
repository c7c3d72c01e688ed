//! Damped Newton iteration for inverting coordinate maps.

use crate::{Divergence, Error, Result};

use common::linalg::lu_solve;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
  /// Steps longer than this are scaled down to it.
  pub max_step_norm: f64,
  pub max_iterations: usize,
  /// Converged once a step is no longer than this.
  pub tolerance: f64,
}

impl Default for NewtonConfig {
  fn default() -> Self {
    Self {
      max_step_norm: 0.5,
      max_iterations: 128,
      tolerance: 1e-5,
    }
  }
}

impl NewtonConfig {
  pub fn with_max_step_norm(mut self, max_step_norm: f64) -> Self {
    self.max_step_norm = max_step_norm;
    self
  }
  pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
    self.max_iterations = max_iterations;
    self
  }
  pub fn with_tolerance(mut self, tolerance: f64) -> Self {
    self.tolerance = tolerance;
    self
  }
}

/// Finds a root of `residual` starting from `initial`.
///
/// `jacobian` returns the derivative with row `l` holding `∂residual/∂x_l`,
/// the layout of [`crate::Jacobian`]. A singular Jacobian yields a NaN step.
pub fn solve<const N: usize>(
  residual: impl Fn(&na::SVector<f64, N>) -> na::SVector<f64, N>,
  jacobian: impl Fn(&na::SVector<f64, N>) -> na::SMatrix<f64, N, N>,
  initial: na::SVector<f64, N>,
  config: &NewtonConfig,
) -> Result<na::SVector<f64, N>> {
  let mut x = initial;
  let mut history = Vec::new();
  let failure = |reason, history: Vec<na::SVector<f64, N>>| {
    debug!("newton iteration failed ({reason}) at {:?}", history.last());
    Error::ConvergenceFailure {
      reason,
      history: history
        .iter()
        .map(|x| na::DVector::from_column_slice(x.as_slice()))
        .collect(),
    }
  };

  for iteration in 0..config.max_iterations {
    let rhs = residual(&x);
    let mut step = lu_solve(&jacobian(&x).transpose(), &rhs)
      .unwrap_or_else(|| na::SVector::from_element(f64::NAN));
    let mut step_norm = step.norm();
    if step_norm > config.max_step_norm {
      step *= config.max_step_norm / step_norm;
      step_norm = config.max_step_norm;
    }
    x -= step;
    history.push(x);
    trace!(iteration, step_norm, "newton step");

    if step_norm.is_nan() {
      return Err(failure(Divergence::NotANumber, history));
    }
    if step_norm <= config.tolerance {
      debug!(iterations = iteration + 1, "newton iteration converged");
      return Ok(x);
    }
  }
  Err(failure(Divergence::BudgetExhausted, history))
}
