use super::{hypercube_lagrange, simplex_lagrange, LineShape, Shape, ShapeBuilder, ShapeTable};

use common::Domain;
use std::sync::LazyLock;

/// Two dimensional shapes. Triangles live on the unit simplex, quadrangles
/// on `[-1,1]^2`; edge nodes follow the corners edge by edge, the center
/// node of `Quadrangle9` comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceShape {
  Triangle3,
  Triangle6,
  Quadrangle4,
  Quadrangle8,
  Quadrangle9,
}

const TRIANGLE_EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];
const QUADRANGLE_EDGES: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

fn triangle3() -> ShapeBuilder<2> {
  ShapeBuilder::new(
    "Triangle3",
    Domain::Triangle,
    &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
    &TRIANGLE_EDGES,
    &[&[0, 1], &[1, 2], &[2, 0]],
    Some(simplex_lagrange::<2>),
  )
}
fn quadrangle4() -> ShapeBuilder<2> {
  ShapeBuilder::new(
    "Quadrangle4",
    Domain::Quadrangle,
    &[[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]],
    &QUADRANGLE_EDGES,
    &[&[0, 1], &[1, 2], &[2, 3], &[3, 0]],
    Some(hypercube_lagrange::<2>),
  )
}

static TRIANGLE3: LazyLock<ShapeTable<2>> = LazyLock::new(|| triangle3().polynomial());
static TRIANGLE6: LazyLock<ShapeTable<2>> =
  LazyLock::new(|| triangle3().named("Triangle6").edge_nodes().polynomial());
static QUADRANGLE4: LazyLock<ShapeTable<2>> = LazyLock::new(|| quadrangle4().polynomial());
static QUADRANGLE8: LazyLock<ShapeTable<2>> =
  LazyLock::new(|| quadrangle4().named("Quadrangle8").edge_nodes().polynomial());
static QUADRANGLE9: LazyLock<ShapeTable<2>> = LazyLock::new(|| {
  quadrangle4()
    .named("Quadrangle9")
    .edge_nodes()
    .interior_node([0.0, 0.0])
    .polynomial()
});

impl Shape<2> for SurfaceShape {
  fn table(self) -> &'static ShapeTable<2> {
    match self {
      Self::Triangle3 => &TRIANGLE3,
      Self::Triangle6 => &TRIANGLE6,
      Self::Quadrangle4 => &QUADRANGLE4,
      Self::Quadrangle8 => &QUADRANGLE8,
      Self::Quadrangle9 => &QUADRANGLE9,
    }
  }
}

impl SurfaceShape {
  pub const ALL: [Self; 5] = [
    Self::Triangle3,
    Self::Triangle6,
    Self::Quadrangle4,
    Self::Quadrangle8,
    Self::Quadrangle9,
  ];

  /// Shape of the `iface`-th edge.
  pub fn face_shape(self, iface: usize) -> LineShape {
    match self.faces()[iface].nnodes() {
      2 => LineShape::Line2,
      _ => LineShape::Line3,
    }
  }

  /// Shape of a face with `nnodes` nodes.
  pub fn from_nnodes(nnodes: usize, triangle: bool) -> Option<Self> {
    let shape = match (nnodes, triangle) {
      (3, true) => Self::Triangle3,
      (6, true) => Self::Triangle6,
      (4, false) => Self::Quadrangle4,
      (8, false) => Self::Quadrangle8,
      (9, false) => Self::Quadrangle9,
      _ => return None,
    };
    Some(shape)
  }
}
