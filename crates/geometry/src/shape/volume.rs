use super::{
  hypercube_lagrange, pyramid, simplex_lagrange, wedge_lagrange, Shape, ShapeBuilder, ShapeTable,
  SurfaceShape,
};

use common::Domain;
use std::sync::LazyLock;

/// Three dimensional shapes.
///
/// Corner order follows the usual CGNS conventions; edge nodes follow in
/// the order of the edge tables below, face centers in face order and a
/// cell center (`Hexahedron27`) comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeShape {
  Tetrahedron4,
  Tetrahedron10,
  Hexahedron8,
  Hexahedron20,
  Hexahedron27,
  Wedge6,
  Wedge15,
  Wedge18,
  Pyramid5,
  Pyramid13,
  Pyramid14,
}

const TETRAHEDRON_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];
const HEXAHEDRON_EDGES: [[usize; 2]; 12] = [
  [0, 1],
  [1, 2],
  [2, 3],
  [3, 0],
  [0, 4],
  [1, 5],
  [2, 6],
  [3, 7],
  [4, 5],
  [5, 6],
  [6, 7],
  [7, 4],
];
const WEDGE_EDGES: [[usize; 2]; 9] = [
  [0, 1],
  [1, 2],
  [2, 0],
  [0, 3],
  [1, 4],
  [2, 5],
  [3, 4],
  [4, 5],
  [5, 3],
];
const PYRAMID_EDGES: [[usize; 2]; 8] = [
  [0, 1],
  [1, 2],
  [2, 3],
  [3, 0],
  [0, 4],
  [1, 4],
  [2, 4],
  [3, 4],
];

fn tetrahedron4() -> ShapeBuilder<3> {
  ShapeBuilder::new(
    "Tetrahedron4",
    Domain::Tetrahedron,
    &[
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [0.0, 1.0, 0.0],
      [0.0, 0.0, 1.0],
    ],
    &TETRAHEDRON_EDGES,
    &[&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]],
    Some(simplex_lagrange::<3>),
  )
}

fn hexahedron8() -> ShapeBuilder<3> {
  ShapeBuilder::new(
    "Hexahedron8",
    Domain::Hexahedron,
    &[
      [-1.0, -1.0, -1.0],
      [1.0, -1.0, -1.0],
      [1.0, 1.0, -1.0],
      [-1.0, 1.0, -1.0],
      [-1.0, -1.0, 1.0],
      [1.0, -1.0, 1.0],
      [1.0, 1.0, 1.0],
      [-1.0, 1.0, 1.0],
    ],
    &HEXAHEDRON_EDGES,
    &[
      &[0, 3, 2, 1],
      &[0, 1, 5, 4],
      &[1, 2, 6, 5],
      &[2, 3, 7, 6],
      &[0, 4, 7, 3],
      &[4, 5, 6, 7],
    ],
    Some(hypercube_lagrange::<3>),
  )
}

fn wedge6() -> ShapeBuilder<3> {
  ShapeBuilder::new(
    "Wedge6",
    Domain::Wedge,
    &[
      [0.0, 0.0, -1.0],
      [1.0, 0.0, -1.0],
      [0.0, 1.0, -1.0],
      [0.0, 0.0, 1.0],
      [1.0, 0.0, 1.0],
      [0.0, 1.0, 1.0],
    ],
    &WEDGE_EDGES,
    &[&[0, 1, 4, 3], &[1, 2, 5, 4], &[2, 0, 3, 5], &[0, 2, 1], &[3, 4, 5]],
    Some(wedge_lagrange),
  )
}

fn pyramid5() -> ShapeBuilder<3> {
  ShapeBuilder::new(
    "Pyramid5",
    Domain::Pyramid,
    &[
      [-1.0, -1.0, 0.0],
      [1.0, -1.0, 0.0],
      [1.0, 1.0, 0.0],
      [-1.0, 1.0, 0.0],
      [0.0, 0.0, 1.0],
    ],
    &PYRAMID_EDGES,
    &[&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]],
    None,
  )
}

static TETRAHEDRON4: LazyLock<ShapeTable<3>> = LazyLock::new(|| tetrahedron4().polynomial());
static TETRAHEDRON10: LazyLock<ShapeTable<3>> =
  LazyLock::new(|| tetrahedron4().named("Tetrahedron10").edge_nodes().polynomial());

static HEXAHEDRON8: LazyLock<ShapeTable<3>> = LazyLock::new(|| hexahedron8().polynomial());
static HEXAHEDRON20: LazyLock<ShapeTable<3>> =
  LazyLock::new(|| hexahedron8().named("Hexahedron20").edge_nodes().polynomial());
static HEXAHEDRON27: LazyLock<ShapeTable<3>> = LazyLock::new(|| {
  hexahedron8()
    .named("Hexahedron27")
    .edge_nodes()
    .face_nodes(&[0, 1, 2, 3, 4, 5])
    .interior_node([0.0, 0.0, 0.0])
    .polynomial()
});

static WEDGE6: LazyLock<ShapeTable<3>> = LazyLock::new(|| wedge6().polynomial());
static WEDGE15: LazyLock<ShapeTable<3>> =
  LazyLock::new(|| wedge6().named("Wedge15").edge_nodes().polynomial());
static WEDGE18: LazyLock<ShapeTable<3>> = LazyLock::new(|| {
  wedge6()
    .named("Wedge18")
    .edge_nodes()
    .face_nodes(&[0, 1, 2])
    .polynomial()
});

static PYRAMID5: LazyLock<ShapeTable<3>> =
  LazyLock::new(|| pyramid5().rational(pyramid::values5, pyramid::gradients5));
static PYRAMID13: LazyLock<ShapeTable<3>> = LazyLock::new(|| {
  pyramid5()
    .named("Pyramid13")
    .edge_nodes()
    .rational(pyramid::values13, pyramid::gradients13)
});
static PYRAMID14: LazyLock<ShapeTable<3>> = LazyLock::new(|| {
  pyramid5()
    .named("Pyramid14")
    .edge_nodes()
    .face_nodes(&[0])
    .rational(pyramid::values14, pyramid::gradients14)
});

impl Shape<3> for VolumeShape {
  fn table(self) -> &'static ShapeTable<3> {
    match self {
      Self::Tetrahedron4 => &TETRAHEDRON4,
      Self::Tetrahedron10 => &TETRAHEDRON10,
      Self::Hexahedron8 => &HEXAHEDRON8,
      Self::Hexahedron20 => &HEXAHEDRON20,
      Self::Hexahedron27 => &HEXAHEDRON27,
      Self::Wedge6 => &WEDGE6,
      Self::Wedge15 => &WEDGE15,
      Self::Wedge18 => &WEDGE18,
      Self::Pyramid5 => &PYRAMID5,
      Self::Pyramid13 => &PYRAMID13,
      Self::Pyramid14 => &PYRAMID14,
    }
  }
}

impl VolumeShape {
  pub const ALL: [Self; 11] = [
    Self::Tetrahedron4,
    Self::Tetrahedron10,
    Self::Hexahedron8,
    Self::Hexahedron20,
    Self::Hexahedron27,
    Self::Wedge6,
    Self::Wedge15,
    Self::Wedge18,
    Self::Pyramid5,
    Self::Pyramid13,
    Self::Pyramid14,
  ];

  /// Shape of the `iface`-th face.
  pub fn face_shape(self, iface: usize) -> SurfaceShape {
    let face = &self.faces()[iface];
    let triangle = face.corners().len() == 3;
    SurfaceShape::from_nnodes(face.nnodes(), triangle)
      .unwrap_or_else(|| unreachable!("face tables only hold triangles and quadrangles"))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{coord::Local, shape::test_util::*};
  use approx::assert_relative_eq;

  fn samples(shape: VolumeShape) -> Vec<Local<3>> {
    match shape.domain() {
      Domain::Tetrahedron => vec![
        Local::<3>::new(0.1, 0.2, 0.3),
        Local::<3>::new(0.6, 0.1, 0.1),
        Local::<3>::new(0.0, 0.0, 0.0),
      ],
      Domain::Hexahedron => vec![
        Local::<3>::new(0.1, -0.2, 0.3),
        Local::<3>::new(-0.9, 0.7, 0.5),
        Local::<3>::new(1.0, 1.0, -1.0),
      ],
      Domain::Wedge => vec![
        Local::<3>::new(0.1, 0.2, 0.3),
        Local::<3>::new(0.5, 0.4, -0.8),
        Local::<3>::new(0.0, 1.0, 1.0),
      ],
      _ => vec![
        Local::<3>::new(0.1, -0.2, 0.3),
        Local::<3>::new(-0.3, 0.35, 0.6),
        Local::<3>::new(0.05, 0.02, 0.9),
      ],
    }
  }

  #[test]
  fn nodal_bases() {
    for shape in VolumeShape::ALL {
      assert_kronecker(shape);
      assert_partition_of_unity(shape, &samples(shape));
      assert_gradients_match_fd(shape, &samples(shape));
      if shape.domain() != Domain::Pyramid {
        assert_hessians_match_fd(shape, &samples(shape));
      }
    }
  }

  #[test]
  fn pyramids_have_no_hessians() {
    let x = Local::<3>::new(0.0, 0.0, 0.5);
    assert!(VolumeShape::Pyramid13.shape_hessians(&x).is_none());
    assert!(VolumeShape::Pyramid5.shape_third_derivatives(&x).is_none());
    assert!(VolumeShape::Hexahedron8.shape_hessians(&x).is_some());
  }

  #[test]
  fn outward_faces() {
    for shape in VolumeShape::ALL {
      assert_faces_outward(shape);
    }
  }

  #[test]
  fn node_counts() {
    let counts = [4, 10, 8, 20, 27, 6, 15, 18, 5, 13, 14];
    for (shape, n) in VolumeShape::ALL.into_iter().zip(counts) {
      assert_eq!(shape.nnodes(), n, "{}", shape.name());
    }
  }

  #[test]
  fn high_order_node_positions() {
    let hex = VolumeShape::Hexahedron27.ref_nodes();
    assert_relative_eq!(hex[8], Local::<3>::new(0.0, -1.0, -1.0));
    assert_relative_eq!(hex[19], Local::<3>::new(-1.0, 0.0, 1.0));
    assert_relative_eq!(hex[20], Local::<3>::new(0.0, 0.0, -1.0));
    assert_relative_eq!(hex[22], Local::<3>::new(1.0, 0.0, 0.0));
    assert_relative_eq!(hex[26], Local::<3>::new(0.0, 0.0, 0.0));

    let wedge = VolumeShape::Wedge18.ref_nodes();
    assert_relative_eq!(wedge[9], Local::<3>::new(0.0, 0.0, 0.0));
    assert_relative_eq!(wedge[15], Local::<3>::new(0.5, 0.0, 0.0));
    assert_relative_eq!(wedge[17], Local::<3>::new(0.0, 0.5, 0.0));

    let pyramid = VolumeShape::Pyramid14.ref_nodes();
    assert_relative_eq!(pyramid[9], Local::<3>::new(-0.5, -0.5, 0.5));
    assert_relative_eq!(pyramid[13], Local::<3>::new(0.0, 0.0, 0.0));
  }

  #[test]
  fn face_node_tables() {
    let faces = VolumeShape::Hexahedron27.faces();
    assert_eq!(faces[0].nodes(), &[0, 3, 2, 1, 11, 10, 9, 8, 20]);
    assert_eq!(faces[5].nodes(), &[4, 5, 6, 7, 16, 17, 18, 19, 25]);
    let faces = VolumeShape::Tetrahedron10.faces();
    assert_eq!(faces[0].nodes(), &[0, 2, 1, 6, 5, 4]);
    let faces = VolumeShape::Pyramid13.faces();
    assert_eq!(faces[1].nodes(), &[0, 1, 4, 5, 10, 9]);
    assert_eq!(VolumeShape::Wedge15.face_shape(0), SurfaceShape::Quadrangle8);
    assert_eq!(VolumeShape::Wedge18.face_shape(1), SurfaceShape::Quadrangle9);
    assert_eq!(VolumeShape::Wedge18.face_shape(4), SurfaceShape::Triangle6);
    assert_eq!(VolumeShape::Pyramid14.face_shape(0), SurfaceShape::Quadrangle9);
    assert_eq!(VolumeShape::Pyramid14.face_shape(2), SurfaceShape::Triangle6);
  }

  #[test]
  fn sort_face_nodes() {
    let cell: Vec<usize> = (100..108).collect();
    // top face given in arbitrary order
    let mut face = [107, 105, 104, 106];
    let iface = VolumeShape::Hexahedron8.sort_nodes_on_face(&cell, &mut face).unwrap();
    assert_eq!(iface, 5);
    assert_eq!(face, [104, 105, 106, 107]);

    let cell = [7, 3, 9, 1];
    let mut face = [1, 3, 7];
    VolumeShape::Tetrahedron4.sort_nodes_on_face(&cell, &mut face).unwrap();
    assert_eq!(face, [7, 3, 1]);

    let mut not_a_face = [7, 3];
    assert!(VolumeShape::Tetrahedron4.sort_nodes_on_face(&cell, &mut not_a_face).is_err());
  }

  #[test]
  fn triquadratic_center_function() {
    let x = Local::<3>::new(0.3, -0.2, 0.5);
    let values = VolumeShape::Hexahedron27.shape_values(&x);
    let expected = (1.0 - 0.09) * (1.0 - 0.04) * (1.0 - 0.25);
    assert_relative_eq!(values[26], expected, epsilon = 1e-14);
    // a corner function is the product of 1d quadratic Lagrange functions
    let lagrange = |t: f64| t * (t + 1.0) / 2.0;
    let expected = lagrange(0.3) * lagrange(-0.2) * lagrange(0.5);
    assert_relative_eq!(values[6], expected, epsilon = 1e-14);
  }
}
