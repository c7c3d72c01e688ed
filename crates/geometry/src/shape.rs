//! Reference shapes and their nodal bases.
//!
//! Every shape is a variant of a closed enum per manifold dimension
//! ([`LineShape`], [`SurfaceShape`], [`VolumeShape`]). Each variant resolves
//! to a process-wide [`ShapeTable`] holding reference nodes, face topology and
//! the basis, built lazily on first use.
//!
//! Higher order bases are derived from lower order ones by enrichment: new
//! nodes come with bubble functions `B_j`, the existing functions are
//! corrected to `N_i - Σ_j N_i(x_j) B_j` so the basis stays nodal.

pub mod line;
pub mod pyramid;
pub mod surface;
pub mod volume;

pub use line::LineShape;
pub use surface::SurfaceShape;
pub use volume::VolumeShape;

use crate::{
  coord::{Hessian, Local, Tensor3},
  poly::{Poly, PolyBasis},
  Error, Result,
};

use common::Domain;
use itertools::Itertools;
use std::{
  fmt::Debug,
  hash::Hash,
  ops::{Mul, Sub},
};

const NODE_EPS: f64 = 1e-12;

/// Nodes of one face of a cell, as local node indices of the cell.
///
/// Corners come first, in right-hand-rule order with the normal pointing
/// out of the cell, followed by the higher order nodes in the canonical
/// order of the face's own shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
  ncorners: usize,
  nodes: Vec<usize>,
}
impl Face {
  pub fn corners(&self) -> &[usize] {
    &self.nodes[..self.ncorners]
  }
  pub fn nodes(&self) -> &[usize] {
    &self.nodes
  }
  pub fn nnodes(&self) -> usize {
    self.nodes.len()
  }
}

#[derive(Debug)]
pub enum Basis<const D: usize> {
  Polynomial(PolyBasis<D>),
  /// Non-polynomial bases only expose values and gradients.
  Rational {
    values: fn(&Local<D>) -> Vec<f64>,
    gradients: fn(&Local<D>) -> Vec<Local<D>>,
  },
}

#[derive(Debug)]
pub struct ShapeTable<const D: usize> {
  name: &'static str,
  domain: Domain,
  nodes: Vec<Local<D>>,
  edges: Vec<[usize; 2]>,
  faces: Vec<Face>,
  basis: Basis<D>,
}

pub trait Shape<const D: usize>: Copy + Eq + Hash + Debug + Send + Sync + 'static {
  fn table(self) -> &'static ShapeTable<D>;

  fn name(self) -> &'static str {
    self.table().name
  }
  fn domain(self) -> Domain {
    self.table().domain
  }
  fn nnodes(self) -> usize {
    self.table().nodes.len()
  }
  /// Reference coordinates of the nodes, in canonical order.
  fn ref_nodes(self) -> &'static [Local<D>] {
    &self.table().nodes
  }
  fn ref_center(self) -> Local<D> {
    let center = self.domain().ref_center();
    Local::from_fn(|i, _| center[i])
  }
  /// Corner pairs of the edges.
  fn edges(self) -> &'static [[usize; 2]] {
    &self.table().edges
  }
  fn faces(self) -> &'static [Face] {
    &self.table().faces
  }

  fn shape_values(self, local: &Local<D>) -> Vec<f64> {
    match &self.table().basis {
      Basis::Polynomial(basis) => basis.eval_values(local),
      Basis::Rational { values, .. } => values(local),
    }
  }
  fn shape_gradients(self, local: &Local<D>) -> Vec<Local<D>> {
    match &self.table().basis {
      Basis::Polynomial(basis) => basis.eval_gradients(local),
      Basis::Rational { gradients, .. } => gradients(local),
    }
  }
  fn shape_hessians(self, local: &Local<D>) -> Option<Vec<Hessian<D>>> {
    match &self.table().basis {
      Basis::Polynomial(basis) => Some(basis.eval_hessians(local)),
      Basis::Rational { .. } => None,
    }
  }
  fn shape_third_derivatives(self, local: &Local<D>) -> Option<Vec<Tensor3<D>>> {
    match &self.table().basis {
      Basis::Polynomial(basis) => Some(basis.eval_third_derivatives(local)),
      Basis::Rational { .. } => None,
    }
  }

  /// Reorders `face_ids`, a set of global node ids of one face of a cell
  /// with node ids `cell_ids`, into the outward oriented canonical order of
  /// that face. Returns the index of the face.
  fn sort_nodes_on_face(self, cell_ids: &[usize], face_ids: &mut [usize]) -> Result<usize> {
    if cell_ids.len() != self.nnodes() {
      return Err(Error::InvalidArgument(format!(
        "{} has {} nodes, got {} ids",
        self.name(),
        self.nnodes(),
        cell_ids.len()
      )));
    }
    let wanted = face_ids.iter().copied().sorted_unstable().collect_vec();
    let (iface, face) = self
      .faces()
      .iter()
      .enumerate()
      .find(|(_, face)| {
        face
          .nodes()
          .iter()
          .map(|&k| cell_ids[k])
          .sorted_unstable()
          .eq(wanted.iter().copied())
      })
      .ok_or_else(|| {
        Error::InvalidArgument(format!("nodes {face_ids:?} are not a face of this {}", self.name()))
      })?;
    for (id, &k) in face_ids.iter_mut().zip(face.nodes()) {
      *id = cell_ids[k];
    }
    Ok(iface)
  }
}

/// Corrects `base` against the new functions `extra` and appends them.
/// `coeff(i, j)` is the value of `base[i]` at the node of `extra[j]`.
pub(crate) fn enrich<T>(base: Vec<T>, extra: Vec<T>, coeff: impl Fn(usize, usize) -> f64) -> Vec<T>
where
  T: Clone + Sub<Output = T> + Mul<f64, Output = T>,
{
  let mut enriched: Vec<T> = base
    .into_iter()
    .enumerate()
    .map(|(i, mut f)| {
      for (j, b) in extra.iter().enumerate() {
        let c = coeff(i, j);
        if c != 0.0 {
          f = f - b.clone() * c;
        }
      }
      f
    })
    .collect();
  enriched.extend(extra);
  enriched
}

/// `(1 + v x)/2` for a node at `v = ±1`, the bubble `1 - x^2` for `v = 0`.
fn interval_factor<const D: usize>(axis: usize, v: f64) -> Poly<D> {
  let x = Poly::var(axis);
  if v.abs() < NODE_EPS {
    Poly::constant(1.0) - x.clone() * x
  } else {
    (Poly::constant(1.0) + x * v) * 0.5
  }
}

/// Product over the barycentric coordinates of the first `dim` axes that do
/// not vanish at `node`, each scaled to one there.
fn simplex_factor<const D: usize>(node: &Local<D>, dim: usize) -> Poly<D> {
  let mut lambdas = vec![Poly::affine(1.0, std::array::from_fn(|k| if k < dim { -1.0 } else { 0.0 }))];
  lambdas.extend((0..dim).map(Poly::var));
  let mut at_node = vec![1.0 - node.iter().take(dim).sum::<f64>()];
  at_node.extend(node.iter().take(dim).copied());

  lambdas
    .into_iter()
    .zip(at_node)
    .filter(|(_, b)| *b > NODE_EPS)
    .fold(Poly::constant(1.0), |acc, (lambda, b)| acc * lambda * (1.0 / b))
}

/// Lagrange-type function of a node of `[-1,1]^D` on the hypercube grid.
pub(crate) fn hypercube_lagrange<const D: usize>(node: &Local<D>) -> Poly<D> {
  (0..D).fold(Poly::constant(1.0), |acc, k| acc * interval_factor::<D>(k, node[k]))
}
/// Lagrange-type function of a node on the unit simplex, `4 L_a L_b` on edges.
pub(crate) fn simplex_lagrange<const D: usize>(node: &Local<D>) -> Poly<D> {
  simplex_factor(node, D)
}
/// Triangle factor times interval factor in `z`.
pub(crate) fn wedge_lagrange(node: &Local<3>) -> Poly<3> {
  simplex_factor(node, 2) * interval_factor::<3>(2, node[2])
}

/// Stages the construction of a [`ShapeTable`].
pub(crate) struct ShapeBuilder<const D: usize> {
  name: &'static str,
  domain: Domain,
  nodes: Vec<Local<D>>,
  edges: Vec<[usize; 2]>,
  faces: Vec<Face>,
  lagrange: Option<fn(&Local<D>) -> Poly<D>>,
  polys: Vec<Poly<D>>,
}

impl<const D: usize> ShapeBuilder<D> {
  /// Linear shape on `corners`. Without a `lagrange` map only the topology
  /// is tracked and the basis must be supplied by [`Self::rational`].
  pub fn new(
    name: &'static str,
    domain: Domain,
    corners: &[[f64; D]],
    edges: &[[usize; 2]],
    faces: &[&[usize]],
    lagrange: Option<fn(&Local<D>) -> Poly<D>>,
  ) -> Self {
    let nodes: Vec<Local<D>> = corners.iter().map(|&c| Local::from(c)).collect();
    let polys: Vec<Poly<D>> = lagrange
      .map(|f| nodes.iter().map(f).collect())
      .unwrap_or_default();
    let faces = faces
      .iter()
      .map(|f| Face {
        ncorners: f.len(),
        nodes: f.to_vec(),
      })
      .collect();
    Self {
      name,
      domain,
      nodes,
      edges: edges.to_vec(),
      faces,
      lagrange,
      polys,
    }
  }

  pub fn named(mut self, name: &'static str) -> Self {
    self.name = name;
    self
  }

  /// One new node at the midpoint of every edge.
  pub fn edge_nodes(mut self) -> Self {
    let first = self.nodes.len();
    let new_nodes = self
      .edges
      .iter()
      .map(|&[a, b]| (self.nodes[a] + self.nodes[b]) / 2.0)
      .collect();
    for face in &mut self.faces {
      let corners = face.corners().to_vec();
      let nc = corners.len();
      // a face with two corners is a single edge, not a cycle
      let nsides = if nc <= 2 { nc - 1 } else { nc };
      for k in 0..nsides {
        let (a, b) = (corners[k], corners[(k + 1) % nc]);
        let iedge = self
          .edges
          .iter()
          .position(|&[p, q]| (p, q) == (a, b) || (p, q) == (b, a));
        if let Some(iedge) = iedge {
          face.nodes.push(first + iedge);
        }
      }
    }
    self.append(new_nodes)
  }

  /// One new node at the centroid of the corners of each listed face.
  pub fn face_nodes(mut self, faces: &[usize]) -> Self {
    let first = self.nodes.len();
    let new_nodes = faces
      .iter()
      .map(|&f| {
        let corners = self.faces[f].corners();
        corners.iter().map(|&c| self.nodes[c]).sum::<Local<D>>() / corners.len() as f64
      })
      .collect();
    for (k, &f) in faces.iter().enumerate() {
      self.faces[f].nodes.push(first + k);
    }
    self.append(new_nodes)
  }

  pub fn interior_node(self, node: [f64; D]) -> Self {
    self.append(vec![Local::from(node)])
  }

  fn append(mut self, new_nodes: Vec<Local<D>>) -> Self {
    if let Some(lagrange) = self.lagrange {
      let extra = new_nodes.iter().map(lagrange).collect();
      let base = std::mem::take(&mut self.polys);
      let coeffs: Vec<Vec<f64>> = base
        .iter()
        .map(|p| new_nodes.iter().map(|x| p.eval(x)).collect())
        .collect();
      self.polys = enrich(base, extra, |i, j| coeffs[i][j]);
    }
    self.nodes.extend(new_nodes);
    self
  }

  fn table(self, basis: Basis<D>) -> ShapeTable<D> {
    ShapeTable {
      name: self.name,
      domain: self.domain,
      nodes: self.nodes,
      edges: self.edges,
      faces: self.faces,
      basis,
    }
  }

  pub fn polynomial(mut self) -> ShapeTable<D> {
    let polys = std::mem::take(&mut self.polys);
    debug_assert_eq!(polys.len(), self.nodes.len());
    self.table(Basis::Polynomial(PolyBasis::new(polys)))
  }

  pub fn rational(
    self,
    values: fn(&Local<D>) -> Vec<f64>,
    gradients: fn(&Local<D>) -> Vec<Local<D>>,
  ) -> ShapeTable<D> {
    self.table(Basis::Rational { values, gradients })
  }
}
