use itertools::Itertools;

pub fn binomial(n: usize, k: usize) -> usize {
  num_integer::binomial(n, k)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
  #[default]
  Pos = 1,
  Neg = -1,
}

impl Sign {
  /// permutation parity
  pub fn from_parity(n: usize) -> Self {
    match n % 2 {
      0 => Self::Pos,
      1 => Self::Neg,
      _ => unreachable!(),
    }
  }

  pub fn as_f64(self) -> f64 {
    self as i32 as f64
  }
}

/// Number of pairs `i < j` with `perm[i] > perm[j]`.
pub fn ninversions(perm: &[usize]) -> usize {
  perm
    .iter()
    .tuple_combinations()
    .filter(|(a, b)| a > b)
    .count()
}

/// All permutations of `0..n` together with their sign.
pub fn signed_permutations(n: usize) -> Vec<(Vec<usize>, Sign)> {
  (0..n)
    .permutations(n)
    .map(|perm| {
      let sign = Sign::from_parity(ninversions(&perm));
      (perm, sign)
    })
    .collect()
}
