use crate::rule1d;

/// Gauss-Legendre rule with `Q` points, exact up to degree `2Q-1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legendre<const Q: usize>;

rule1d!(Legendre<1>, exact 1, points [0.0], weights [2.0]);
// ±1/√3
rule1d!(
  Legendre<2>, exact 3,
  points [-0.5773502691896257, 0.5773502691896257],
  weights [1.0, 1.0]
);
// ±√(3/5), 0 with 5/9, 8/9
rule1d!(
  Legendre<3>, exact 5,
  points [-0.7745966692414834, 0.0, 0.7745966692414834],
  weights [0.5555555555555556, 0.8888888888888888, 0.5555555555555556]
);
rule1d!(
  Legendre<4>, exact 7,
  points [-0.8611363115940526, -0.33998104358485626, 0.33998104358485626, 0.8611363115940526],
  weights [0.34785484513745385, 0.6521451548625461, 0.6521451548625461, 0.34785484513745385]
);
rule1d!(
  Legendre<5>, exact 9,
  points [-0.906179845938664, -0.5384693101056831, 0.0, 0.5384693101056831, 0.906179845938664],
  weights [
    0.23692688505618908,
    0.47862867049936647,
    0.5688888888888889,
    0.47862867049936647,
    0.23692688505618908,
  ]
);
rule1d!(
  Legendre<6>, exact 11,
  points [
    -0.932469514203152,
    -0.6612093864662645,
    -0.2386191860831969,
    0.2386191860831969,
    0.6612093864662645,
    0.932469514203152,
  ],
  weights [
    0.17132449237917036,
    0.3607615730481386,
    0.46791393457269104,
    0.46791393457269104,
    0.3607615730481386,
    0.17132449237917036,
  ]
);

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    test_util::{assert_rule, monomial_integral},
    Rule1d,
  };
  use approx::assert_relative_eq;

  fn check<R: Rule1d>() {
    assert_rule::<R>();
    for k in 0..=R::EXACTNESS {
      let approx = R::apply(|x| x.powi(k as i32));
      assert_relative_eq!(approx, monomial_integral(k), epsilon = 1e-14);
    }
    let k = R::EXACTNESS + 1;
    let approx = R::apply(|x| x.powi(k as i32));
    assert!((approx - monomial_integral(k)).abs() > 1e-6);
  }

  #[test]
  fn exactness() {
    check::<Legendre<1>>();
    check::<Legendre<2>>();
    check::<Legendre<3>>();
    check::<Legendre<4>>();
    check::<Legendre<5>>();
    check::<Legendre<6>>();
  }
}
