use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a Newton iteration gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
  BudgetExhausted,
  NotANumber,
}

impl std::fmt::Display for Divergence {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::BudgetExhausted => write!(f, "iteration budget exhausted"),
      Self::NotANumber => write!(f, "step is not a number"),
    }
  }
}

#[derive(Error, Debug)]
pub enum Error {
  /// The inverse coordinate map has no (reachable) solution.
  #[error("newton iteration failed: {reason} after {} iterates", .history.len())]
  ConvergenceFailure {
    reason: Divergence,
    /// Every iterate, in order.
    history: Vec<na::DVector<f64>>,
  },

  #[error("invalid argument: {0}")]
  InvalidArgument(String),
}

impl Error {
  pub fn divergence(&self) -> Option<Divergence> {
    match self {
      Self::ConvergenceFailure { reason, .. } => Some(*reason),
      Self::InvalidArgument(_) => None,
    }
  }
}
