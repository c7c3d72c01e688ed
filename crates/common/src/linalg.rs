//! Small dense helpers on statically sized matrices.
//!
//! Factorizations go through `DMatrix`, determinants and their
//! derivatives are expanded with the Leibniz formula.

use crate::combo::signed_permutations;

pub fn to_dynamic<const R: usize, const C: usize>(m: &na::SMatrix<f64, R, C>) -> na::DMatrix<f64> {
  na::DMatrix::from_iterator(R, C, m.iter().copied())
}

/// Solves `a x = b` with an LU decomposition. `None` if `a` is singular.
pub fn lu_solve<const N: usize>(
  a: &na::SMatrix<f64, N, N>,
  b: &na::SVector<f64, N>,
) -> Option<na::SVector<f64, N>> {
  let b = na::DVector::from_column_slice(b.as_slice());
  let x = to_dynamic(a).lu().solve(&b)?;
  Some(na::SVector::from_column_slice(x.as_slice()))
}

pub fn det<const N: usize>(a: &na::SMatrix<f64, N, N>) -> f64 {
  signed_permutations(N)
    .into_iter()
    .map(|(perm, sign)| sign.as_f64() * (0..N).map(|r| a[(r, perm[r])]).product::<f64>())
    .sum()
}

/// Derivative of `det(a(s))` given `a` and `da = ∂a/∂s`.
pub fn det_derivative<const N: usize>(a: &na::SMatrix<f64, N, N>, da: &na::SMatrix<f64, N, N>) -> f64 {
  signed_permutations(N)
    .into_iter()
    .map(|(perm, sign)| {
      let term: f64 = (0..N)
        .map(|m| {
          (0..N)
            .map(|r| if r == m { da[(r, perm[r])] } else { a[(r, perm[r])] })
            .product::<f64>()
        })
        .sum();
      sign.as_f64() * term
    })
    .sum()
}

/// Mixed second derivative `∂²det(a)/∂s∂t` given `a`, `∂a/∂s`, `∂a/∂t`
/// and `∂²a/∂s∂t`.
pub fn det_second_derivative<const N: usize>(
  a: &na::SMatrix<f64, N, N>,
  da_s: &na::SMatrix<f64, N, N>,
  da_t: &na::SMatrix<f64, N, N>,
  dda: &na::SMatrix<f64, N, N>,
) -> f64 {
  signed_permutations(N)
    .into_iter()
    .map(|(perm, sign)| {
      let entry = |m: &na::SMatrix<f64, N, N>, r: usize| m[(r, perm[r])];
      let mut term = 0.0;
      for m in 0..N {
        term += (0..N)
          .map(|r| if r == m { entry(dda, r) } else { entry(a, r) })
          .product::<f64>();
        for n in (0..N).filter(|&n| n != m) {
          term += (0..N)
            .map(|r| match r {
              _ if r == m => entry(da_s, r),
              _ if r == n => entry(da_t, r),
              _ => entry(a, r),
            })
            .product::<f64>();
        }
      }
      sign.as_f64() * term
    })
    .sum()
}

/// Square root of the Gram determinant of the rows of `m`.
pub fn gram_det_sqrt<const R: usize, const C: usize>(m: &na::SMatrix<f64, R, C>) -> f64 {
  let gram: na::SMatrix<f64, R, R> = m * m.transpose();
  det(&gram).max(0.0).sqrt()
}
