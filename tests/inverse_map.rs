extern crate nalgebra as na;

use approx::assert_relative_eq;
use minidg::geometry::{
  CoordElement, Global, Local, NewtonConfig, Shape, SurfaceShape, VolumeShape,
};

/// Sheared and rotated map with a mild quadratic bend.
fn warp3(x: &Local<3>) -> Global<3> {
  let a = na::Matrix3::new(1.2, 0.3, 0.0, -0.2, 0.9, 0.1, 0.1, 0.0, 1.5);
  let bend = Global::<3>::new(x.y * x.y, x.x * x.z, x.x * x.x) * 0.05;
  a * x + Global::<3>::new(3.0, -1.0, 2.0) + bend
}

fn warp2(x: &Local<2>) -> Global<2> {
  let a = na::Matrix2::new(1.1, 0.4, -0.3, 0.8);
  a * x + Global::<2>::new(-2.0, 5.0) + Global::<2>::new(x.y * x.y, x.x * x.y) * 0.05
}

fn interior_points<const D: usize>(shape: impl Shape<D>) -> Vec<Local<D>> {
  let center = shape.ref_center();
  shape
    .ref_nodes()
    .iter()
    .map(|node| center * 0.6 + node * 0.4)
    .chain([center])
    .collect()
}

#[test]
fn volume_round_trips() {
  let config = NewtonConfig::default().with_tolerance(1e-12);
  for shape in VolumeShape::ALL {
    let nodes = shape.ref_nodes().iter().map(warp3).collect();
    let element = CoordElement::<_, 3, 3>::new(shape, nodes).unwrap();
    for local in interior_points(shape) {
      let global = element.local2global(&local);
      let found = element
        .global2local_with(&global, &element.local_center(), &config)
        .unwrap();
      assert_relative_eq!(found, local, epsilon = 1e-10);
      assert!(element.contains(&global, 1e-8).unwrap(), "{}", shape.name());
    }
  }
}

#[test]
fn surface_round_trips() {
  let config = NewtonConfig::default().with_tolerance(1e-12);
  for shape in SurfaceShape::ALL {
    let nodes = shape.ref_nodes().iter().map(warp2).collect();
    let element = CoordElement::<_, 2, 2>::new(shape, nodes).unwrap();
    for local in interior_points(shape) {
      let global = element.local2global(&local);
      let found = element
        .global2local_with(&global, &element.local_center(), &config)
        .unwrap();
      assert_relative_eq!(found, local, epsilon = 1e-10);
    }
  }
}

#[test]
fn outside_points_are_rejected() {
  let shape = VolumeShape::Tetrahedron4;
  let nodes = shape.ref_nodes().iter().map(warp3).collect();
  let element = CoordElement::<_, 3, 3>::new(shape, nodes).unwrap();
  let outside = element.local2global(&Local::<3>::new(0.6, 0.6, 0.2));
  assert!(!element.contains(&outside, 1e-8).unwrap());
  let vertex = element.local2global(&Local::<3>::new(0.0, 0.0, 1.0));
  assert!(element.contains(&vertex, 1e-8).unwrap());
}
