use super::{hypercube_lagrange, Shape, ShapeBuilder, ShapeTable};

use common::Domain;
use std::sync::LazyLock;

/// Lines on `[-1,1]`. `Line3` has its third node at the midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
  Line2,
  Line3,
}

fn line2() -> ShapeBuilder<1> {
  ShapeBuilder::new(
    "Line2",
    Domain::Line,
    &[[-1.0], [1.0]],
    &[[0, 1]],
    &[&[0], &[1]],
    Some(hypercube_lagrange::<1>),
  )
}

static LINE2: LazyLock<ShapeTable<1>> = LazyLock::new(|| line2().polynomial());
static LINE3: LazyLock<ShapeTable<1>> =
  LazyLock::new(|| line2().named("Line3").edge_nodes().polynomial());

impl Shape<1> for LineShape {
  fn table(self) -> &'static ShapeTable<1> {
    match self {
      Self::Line2 => &LINE2,
      Self::Line3 => &LINE3,
    }
  }
}
