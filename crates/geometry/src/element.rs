use crate::{
  coord::{Global, Hessian, Jacobian, Local},
  frame::NormalFrame,
  newton::{self, NewtonConfig},
  shape::{LineShape, Shape, SurfaceShape, VolumeShape},
  Error, Result,
};

use common::linalg::{det, det_derivative, det_second_derivative, gram_det_sqrt, to_dynamic};

/// A `D`-dimensional Lagrange element embedded in `P`-dimensional space.
#[derive(Debug, Clone)]
pub struct CoordElement<K, const D: usize, const P: usize> {
  shape: K,
  nodes: Vec<Global<P>>,
}

impl<K: Shape<D>, const D: usize, const P: usize> CoordElement<K, D, P> {
  const DIMS_OK: () = assert!(D <= P && P <= 3, "a D-dimensional element needs D <= P <= 3");

  /// `nodes` in the canonical node order of `shape`.
  pub fn new(shape: K, nodes: Vec<Global<P>>) -> Result<Self> {
    #[allow(clippy::let_unit_value)]
    let () = Self::DIMS_OK;
    if nodes.len() != shape.nnodes() {
      return Err(Error::InvalidArgument(format!(
        "{} needs {} nodes, got {}",
        shape.name(),
        shape.nnodes(),
        nodes.len()
      )));
    }
    Ok(Self { shape, nodes })
  }

  /// Gathers the node coordinates of a cell from a mesh node array.
  pub fn from_connectivity(shape: K, node_ids: &[usize], coords: &[Global<P>]) -> Result<Self> {
    let nodes = node_ids
      .iter()
      .map(|&id| {
        coords.get(id).copied().ok_or_else(|| {
          Error::InvalidArgument(format!("node id {id} out of range ({} nodes)", coords.len()))
        })
      })
      .collect::<Result<Vec<_>>>()?;
    Self::new(shape, nodes)
  }

  pub fn shape(&self) -> K {
    self.shape
  }
  pub fn nnodes(&self) -> usize {
    self.nodes.len()
  }
  pub fn node(&self, i: usize) -> &Global<P> {
    &self.nodes[i]
  }
  pub fn nodes(&self) -> &[Global<P>] {
    &self.nodes
  }

  pub fn local2global(&self, local: &Local<D>) -> Global<P> {
    self
      .shape
      .shape_values(local)
      .into_iter()
      .zip(&self.nodes)
      .map(|(n, x)| x * n)
      .sum()
  }

  pub fn jacobian(&self, local: &Local<D>) -> Jacobian<D, P> {
    self
      .shape
      .shape_gradients(local)
      .into_iter()
      .zip(&self.nodes)
      .fold(Jacobian::zeros(), |j, (g, x)| j + g * x.transpose())
  }

  /// `∂J/∂local_k` for every `k`, if the shape has Hessians.
  pub fn jacobian_gradient(&self, local: &Local<D>) -> Option<[Jacobian<D, P>; D]> {
    let hessians = self.shape.shape_hessians(local)?;
    Some(std::array::from_fn(|k| {
      hessians
        .iter()
        .zip(&self.nodes)
        .fold(Jacobian::zeros(), |dj, (h, x)| dj + h.row(k).transpose() * x.transpose())
    }))
  }

  /// `∂²J/∂local_k∂local_m`, if the shape has third derivatives.
  pub fn jacobian_hessian(&self, local: &Local<D>) -> Option<[[Jacobian<D, P>; D]; D]> {
    let thirds = self.shape.shape_third_derivatives(local)?;
    Some(std::array::from_fn(|k| {
      std::array::from_fn(|m| {
        thirds
          .iter()
          .zip(&self.nodes)
          .fold(Jacobian::zeros(), |ddj, (t, x)| ddj + t[k].row(m).transpose() * x.transpose())
      })
    }))
  }

  /// `sqrt(det(J Jᵀ))`, equal to `|det J|` for `D == P`.
  pub fn measure_density(&self, local: &Local<D>) -> f64 {
    gram_det_sqrt(&self.jacobian(local))
  }

  /// `det J` for `D == P`, otherwise the (non-negative) measure density.
  pub fn signed_density(&self, local: &Local<D>) -> f64 {
    let j = self.jacobian(local);
    if D == P {
      to_dynamic(&j).determinant()
    } else {
      gram_det_sqrt(&j)
    }
  }

  pub fn local_center(&self) -> Local<D> {
    self.shape.ref_center()
  }
  /// Global image of the reference center.
  pub fn center(&self) -> Global<P> {
    self.local2global(&self.local_center())
  }

  /// Global coordinates of the nodes of the `iface`-th face, in the face's
  /// outward canonical order.
  pub fn face_nodes(&self, iface: usize) -> Vec<Global<P>> {
    self.shape.faces()[iface]
      .nodes()
      .iter()
      .map(|&k| self.nodes[k])
      .collect()
  }
}

impl<K: Shape<D>, const D: usize> CoordElement<K, D, D> {
  /// Inverse map, seeded at the reference center.
  pub fn global2local(&self, global: &Global<D>) -> Result<Local<D>> {
    self.global2local_with(global, &self.local_center(), &NewtonConfig::default())
  }

  pub fn global2local_with(
    &self,
    global: &Global<D>,
    hint: &Local<D>,
    config: &NewtonConfig,
  ) -> Result<Local<D>> {
    newton::solve(
      |local| self.local2global(local) - global,
      |local| self.jacobian(local),
      *hint,
      config,
    )
  }

  /// Whether `global` lies in the element, up to `eps` in local coordinates.
  pub fn contains(&self, global: &Global<D>, eps: f64) -> Result<bool> {
    let local = self.global2local(global)?;
    Ok(self.shape.domain().contains(local.as_slice(), eps))
  }

  pub fn jacobian_determinant(&self, local: &Local<D>) -> f64 {
    det(&self.jacobian(local))
  }

  pub fn jacobian_determinant_gradient(&self, local: &Local<D>) -> Option<Local<D>> {
    let j = self.jacobian(local);
    let dj = self.jacobian_gradient(local)?;
    Some(Local::from_fn(|k, _| det_derivative(&j, &dj[k])))
  }

  pub fn jacobian_determinant_hessian(&self, local: &Local<D>) -> Option<Hessian<D>> {
    let j = self.jacobian(local);
    let dj = self.jacobian_gradient(local)?;
    let ddj = self.jacobian_hessian(local)?;
    Some(Hessian::from_fn(|k, m| det_second_derivative(&j, &dj[k], &dj[m], &ddj[k][m])))
  }
}

impl<K: Shape<2>> CoordElement<K, 2, 3> {
  pub fn normal_frame(&self, local: &Local<2>) -> NormalFrame {
    let j = self.jacobian(local);
    NormalFrame::from_tangents(&j.row(0).transpose(), &j.row(1).transpose())
  }
}

impl<K: Shape<1>> CoordElement<K, 1, 2> {
  /// Unit normal, the tangent rotated clockwise.
  pub fn normal(&self, local: &Local<1>) -> Global<2> {
    let t = self.jacobian(local);
    Global::<2>::new(t[(0, 1)], -t[(0, 0)]).normalize()
  }
}

impl CoordElement<VolumeShape, 3, 3> {
  /// The `iface`-th face as a surface element with outward normal.
  pub fn face(&self, iface: usize) -> Result<CoordElement<SurfaceShape, 2, 3>> {
    CoordElement::new(self.shape.face_shape(iface), self.face_nodes(iface))
  }
}

impl CoordElement<SurfaceShape, 2, 2> {
  /// The `iface`-th edge as a line element with outward normal.
  pub fn face(&self, iface: usize) -> Result<CoordElement<LineShape, 1, 2>> {
    CoordElement::new(self.shape.face_shape(iface), self.face_nodes(iface))
  }
}
