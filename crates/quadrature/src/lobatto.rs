use crate::rule1d;

/// Gauss-Lobatto rule with `Q >= 2` points including both endpoints,
/// exact up to degree `2Q-3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lobatto<const Q: usize>;

rule1d!(Lobatto<2>, exact 1, points [-1.0, 1.0], weights [1.0, 1.0]);
rule1d!(
  Lobatto<3>, exact 3,
  points [-1.0, 0.0, 1.0],
  weights [0.3333333333333333, 1.3333333333333333, 0.3333333333333333]
);
// ±1/√5
rule1d!(
  Lobatto<4>, exact 5,
  points [-1.0, -0.4472135954999579, 0.4472135954999579, 1.0],
  weights [0.16666666666666666, 0.8333333333333334, 0.8333333333333334, 0.16666666666666666]
);
rule1d!(
  Lobatto<5>, exact 7,
  points [-1.0, -0.6546536707079772, 0.0, 0.6546536707079772, 1.0],
  weights [0.1, 0.5444444444444444, 0.7111111111111111, 0.5444444444444444, 0.1]
);
rule1d!(
  Lobatto<6>, exact 9,
  points [
    -1.0,
    -0.7650553239294647,
    -0.2852315164806451,
    0.2852315164806451,
    0.7650553239294647,
    1.0,
  ],
  weights [
    0.06666666666666667,
    0.378474956297847,
    0.5548583770354863,
    0.5548583770354863,
    0.378474956297847,
    0.06666666666666667,
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
    assert_eq!(R::points().first(), Some(&-1.0));
    assert_eq!(R::points().last(), Some(&1.0));
    for k in 0..=R::EXACTNESS {
      let approx = R::apply(|x| x.powi(k as i32));
      assert_relative_eq!(approx, monomial_integral(k), epsilon = 1e-14);
    }
  }

  #[test]
  fn exactness() {
    check::<Lobatto<2>>();
    check::<Lobatto<3>>();
    check::<Lobatto<4>>();
    check::<Lobatto<5>>();
    check::<Lobatto<6>>();
  }
}
