/// Gauss-Jacobi rule with `Q` points for the weight `(1-x)^2` (α=2, β=0).
///
/// Used on the collapsed axis of pyramids and tetrahedra, where it absorbs
/// the `(1-x)^2` factor of the Duffy transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jacobi<const Q: usize>;

macro_rules! jacobi_rule {
  (Jacobi<$q:literal>, exact $deg:literal, points [$($p:expr),* $(,)?], weights [$($w:expr),* $(,)?]) => {
    impl $crate::Rule1d for Jacobi<$q> {
      const NAME: &'static str = "Jacobi";
      const NPOINTS: usize = $q;
      const EXACTNESS: usize = $deg;
      fn points() -> &'static [f64] {
        &[$($p),*]
      }
      fn weights() -> &'static [f64] {
        &[$($w),*]
      }
      fn weight_function(x: f64) -> f64 {
        (1.0 - x).powi(2)
      }
    }
  };
}

jacobi_rule!(Jacobi<1>, exact 1, points [-0.5], weights [2.6666666666666665]);
jacobi_rule!(
  Jacobi<2>, exact 3,
  points [-0.7549703546891172, 0.08830368802245057],
  weights [1.8603796100280632, 0.8062870566386034]
);
jacobi_rule!(
  Jacobi<3>, exact 5,
  points [-0.8540119518537005, -0.3059924679232962, 0.41000441977699675],
  weights [1.257090888519093, 1.1699701540789282, 0.23960562406864558]
);
jacobi_rule!(
  Jacobi<4>, exact 7,
  points [-0.9029989011060053, -0.5227985248962754, 0.034094590208735, 0.5917028357935458],
  weights [0.8871073248902238, 1.1476703183937136, 0.5490710973833846, 0.08281792599934452]
);
jacobi_rule!(
  Jacobi<5>, exact 9,
  points [
    -0.9308421201635698,
    -0.6530393584566085,
    -0.22022722586896135,
    0.26866694526177354,
    0.7021084258940329,
  ],
  weights [
    0.6541182742861673,
    1.0095916951992918,
    0.71360128977272,
    0.25644480578369533,
    0.03291060162479206,
  ]
);
