use crate::Dim;

/// Reference domains of the supported cell families.
///
/// Conventions: `Line` is `[-1,1]`, `Quadrangle` and `Hexahedron` are
/// `[-1,1]^d`, `Triangle` and `Tetrahedron` are the unit simplices with a
/// vertex at the origin, `Wedge` is the unit triangle times `[-1,1]` and
/// `Pyramid` has the base `[-1,1]^2` at `z = 0` and its apex at `(0,0,1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
  Line,
  Triangle,
  Quadrangle,
  Tetrahedron,
  Hexahedron,
  Wedge,
  Pyramid,
}

impl Domain {
  pub fn dim(self) -> Dim {
    match self {
      Self::Line => 1,
      Self::Triangle | Self::Quadrangle => 2,
      Self::Tetrahedron | Self::Hexahedron | Self::Wedge | Self::Pyramid => 3,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::Line => "line",
      Self::Triangle => "triangle",
      Self::Quadrangle => "quadrangle",
      Self::Tetrahedron => "tetrahedron",
      Self::Hexahedron => "hexahedron",
      Self::Wedge => "wedge",
      Self::Pyramid => "pyramid",
    }
  }

  /// Measure of the reference domain.
  pub fn ref_measure(self) -> f64 {
    match self {
      Self::Line => 2.0,
      Self::Triangle => 0.5,
      Self::Quadrangle => 4.0,
      Self::Tetrahedron => 1.0 / 6.0,
      Self::Hexahedron => 8.0,
      Self::Wedge => 1.0,
      Self::Pyramid => 4.0 / 3.0,
    }
  }

  /// Centroid of the reference domain. Only the first `dim` entries are used.
  pub fn ref_center(self) -> [f64; 3] {
    match self {
      Self::Line | Self::Quadrangle | Self::Hexahedron => [0.0; 3],
      Self::Triangle => [1.0 / 3.0, 1.0 / 3.0, 0.0],
      Self::Tetrahedron => [0.25; 3],
      Self::Wedge => [1.0 / 3.0, 1.0 / 3.0, 0.0],
      Self::Pyramid => [0.0, 0.0, 0.25],
    }
  }

  /// Whether a local point lies in the closed reference domain, up to `eps`.
  pub fn contains(self, local: &[f64], eps: f64) -> bool {
    assert_eq!(local.len(), self.dim());
    let in_interval = |x: f64| x.abs() <= 1.0 + eps;
    let in_simplex = |x: &[f64]| x.iter().all(|&xi| xi >= -eps) && x.iter().sum::<f64>() <= 1.0 + eps;
    match self {
      Self::Line | Self::Quadrangle | Self::Hexahedron => local.iter().all(|&x| in_interval(x)),
      Self::Triangle | Self::Tetrahedron => in_simplex(local),
      Self::Wedge => in_simplex(&local[..2]) && in_interval(local[2]),
      Self::Pyramid => {
        let z = local[2];
        let half = 1.0 - z + eps;
        z >= -eps && z <= 1.0 + eps && local[0].abs() <= half && local[1].abs() <= half
      }
    }
  }
}

impl std::fmt::Display for Domain {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}
