extern crate nalgebra as na;

use approx::assert_relative_eq;
use minidg::{
  geometry::{CoordElement, Domain, Global, LineShape, Local, Shape, SurfaceShape, VolumeShape},
  quadrature::{gauss, reference, Jacobi, Legendre},
  FaceIntegrator, Integrator,
};

fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn pyramid_volume() {
  let (a, b, h) = (1.5, 0.75, 2.0);
  let base = [(-a, -b), (a, -b), (a, b), (-a, b)];
  for apex in [Global::<3>::new(0.0, 0.0, h), Global::<3>::new(0.4, -0.3, h)] {
    let mut nodes: Vec<Global<3>> = base.iter().map(|&(x, y)| Global::<3>::new(x, y, 0.0)).collect();
    nodes.push(apex);
    let element = CoordElement::<_, 3, 3>::new(VolumeShape::Pyramid5, nodes).unwrap();
    let rule = gauss::<3, 3>(Domain::Pyramid);
    let integrator = Integrator::new(&element, &rule).unwrap();
    assert_relative_eq!(integrator.volume(), (2.0 * a) * (2.0 * b) * h / 3.0, epsilon = 1e-13);
  }
}

#[test]
fn straight_quadratic_pyramid_volume() {
  let (a, b, h) = (1.0, 2.0, 0.5);
  let nodes: Vec<Global<3>> = VolumeShape::Pyramid14
    .ref_nodes()
    .iter()
    .map(|x| Global::<3>::new(a * x.x, b * x.y, h * x.z))
    .collect();
  let element = CoordElement::<_, 3, 3>::new(VolumeShape::Pyramid14, nodes).unwrap();
  let rule = reference::pyramid::<Legendre<4>, Legendre<4>, Jacobi<4>>();
  let integrator = Integrator::new(&element, &rule).unwrap();
  assert_relative_eq!(integrator.volume(), 4.0 * a * b * h / 3.0, epsilon = 1e-13);
  // centroid of a pyramid sits at a quarter of its height
  let centroid = integrator.integrate(|x| *x) / integrator.volume();
  assert_relative_eq!(centroid, Global::<3>::new(0.0, 0.0, h / 4.0), epsilon = 1e-13);
}

#[test]
fn bowed_tetrahedron_volume() {
  let mut nodes = VolumeShape::Tetrahedron10.ref_nodes().to_vec();
  let rule = gauss::<3, 3>(Domain::Tetrahedron);

  let element = CoordElement::<_, 3, 3>::new(VolumeShape::Tetrahedron10, nodes.clone()).unwrap();
  let straight = Integrator::new(&element, &rule).unwrap().volume();
  assert_relative_eq!(straight, 1.0 / 6.0, epsilon = 1e-14);

  // bow the edge 0-1 out of the face y = 0
  nodes[4].y -= 0.1;
  let element = CoordElement::<_, 3, 3>::new(VolumeShape::Tetrahedron10, nodes).unwrap();
  let curved = Integrator::new(&element, &rule).unwrap().volume();
  assert_relative_eq!(curved, 11.0 / 60.0, epsilon = 1e-14);
}

#[test]
fn reference_measures() {
  let volumes = [
    (VolumeShape::Tetrahedron4, 1.0 / 6.0),
    (VolumeShape::Hexahedron27, 8.0),
    (VolumeShape::Wedge18, 1.0),
    (VolumeShape::Pyramid13, 4.0 / 3.0),
  ];
  for (shape, expected) in volumes {
    let element = CoordElement::<_, 3, 3>::new(shape, shape.ref_nodes().to_vec()).unwrap();
    let rule = gauss::<2, 3>(shape.domain());
    let integrator = Integrator::new(&element, &rule).unwrap();
    assert_relative_eq!(integrator.volume(), expected, epsilon = 1e-14);
    assert_relative_eq!(
      integrator.global_weights().iter().sum::<f64>(),
      integrator.measure(),
      epsilon = 1e-15
    );
  }
}

/// Hexahedron with every corner moved.
fn distorted_hexahedron() -> CoordElement<VolumeShape, 3, 3> {
  let shifts = [
    [0.1, 0.0, -0.05],
    [0.0, 0.1, 0.0],
    [-0.1, 0.05, 0.1],
    [0.05, -0.1, 0.0],
    [0.0, 0.0, 0.1],
    [0.1, 0.1, -0.1],
    [-0.05, 0.0, 0.05],
    [0.0, -0.05, -0.1],
  ];
  let nodes = VolumeShape::Hexahedron8
    .ref_nodes()
    .iter()
    .zip(shifts)
    .map(|(x, s)| x + Global::<3>::from(s))
    .collect();
  CoordElement::new(VolumeShape::Hexahedron8, nodes).unwrap()
}

#[test]
fn divergence_theorem_on_distorted_hexahedron() {
  init_tracing();
  let element = distorted_hexahedron();
  let field = |x: &Global<3>| Global::<3>::new(x.x * x.x, x.y * x.z, x.z);
  let divergence = |x: &Global<3>| 2.0 * x.x + x.z + 1.0;

  let rule = gauss::<3, 3>(Domain::Hexahedron);
  let integrator = Integrator::new(&element, &rule).unwrap();
  let volume_integral = integrator.integrate(divergence);

  let face_rule = gauss::<3, 2>(Domain::Quadrangle);
  let mut flux = 0.0;
  for iface in 0..element.shape().faces().len() {
    let face = element.face(iface).unwrap();
    let integrator = FaceIntegrator::new(&face, &face_rule).unwrap();
    flux += integrator.integrate(|x, n| field(x).dot(n));
  }
  assert_relative_eq!(flux, volume_integral, epsilon = 1e-12);
}

#[test]
fn closed_surface_has_zero_net_normal() {
  let element = distorted_hexahedron();
  let rule = gauss::<2, 2>(Domain::Quadrangle);
  let mut total = na::Vector3::zeros();
  let mut area = 0.0;
  for iface in 0..element.shape().faces().len() {
    let face = element.face(iface).unwrap();
    let integrator = FaceIntegrator::new(&face, &rule).unwrap();
    total += integrator.integrate(|_, n| *n);
    area += integrator.area();
    for i in 0..integrator.npoints() {
      let frame = integrator.normal_frame(i);
      assert_relative_eq!(frame.normal.norm(), 1.0, epsilon = 1e-15);
      assert_relative_eq!(frame.normal.dot(&frame.tangent), 0.0, epsilon = 1e-15);
    }
  }
  assert_relative_eq!(total, na::Vector3::zeros(), epsilon = 1e-13);
  assert!(area > 20.0);
}

#[test]
fn tilted_square_face() {
  let e1 = na::Vector3::new(1.0, -1.0, 0.0).normalize();
  let e2 = na::Vector3::new(1.0, 1.0, -2.0).normalize();
  let nodes = SurfaceShape::Quadrangle4
    .ref_nodes()
    .iter()
    .map(|x| e1 * (x.x / 2.0) + e2 * (x.y / 2.0))
    .collect();
  let face = CoordElement::<_, 2, 3>::new(SurfaceShape::Quadrangle4, nodes).unwrap();
  let rule = gauss::<2, 2>(Domain::Quadrangle);
  let integrator = FaceIntegrator::new(&face, &rule).unwrap();
  assert_relative_eq!(integrator.area(), 1.0, epsilon = 1e-14);
  let expected = na::Vector3::new(1.0, 1.0, 1.0) / 3f64.sqrt();
  for i in 0..integrator.npoints() {
    assert_relative_eq!(integrator.normal_frame(i).normal, expected, epsilon = 1e-15);
  }
}

#[test]
fn inverted_element_still_integrates() {
  init_tracing();
  let mut nodes = VolumeShape::Tetrahedron4.ref_nodes().to_vec();
  nodes.swap(1, 2);
  let element = CoordElement::<_, 3, 3>::new(VolumeShape::Tetrahedron4, nodes).unwrap();
  assert!(element.jacobian_determinant(&element.local_center()) < 0.0);
  let rule = gauss::<1, 3>(Domain::Tetrahedron);
  let integrator = Integrator::new(&element, &rule).unwrap();
  assert_relative_eq!(integrator.volume(), 1.0 / 6.0, epsilon = 1e-15);
  assert_eq!(integrator.ninverted(), integrator.npoints());
}

#[test]
fn line_in_plane() {
  let nodes = vec![
    Global::<2>::new(0.0, 0.0),
    Global::<2>::new(2.0, 0.0),
    Global::<2>::new(1.0, 0.5),
  ];
  let element = CoordElement::<_, 1, 2>::new(LineShape::Line3, nodes).unwrap();
  let rule = gauss::<5, 1>(Domain::Line);
  let integrator = Integrator::new(&element, &rule).unwrap();
  // parabola y = x(2 - x)/2
  let arc = 2f64.sqrt() + 1f64.asinh();
  assert_relative_eq!(integrator.length(), arc, epsilon = 1e-4);
  let n = element.normal(&Local::<1>::new(0.0));
  assert_relative_eq!(n, Global::<2>::new(0.0, -1.0), epsilon = 1e-15);
}
