/// Orthonormal frame attached to a point of a surface in 3D.
///
/// `normal = tangent × bitangent`, the tangent follows the first local
/// direction of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalFrame {
  pub normal: na::Vector3<f64>,
  pub tangent: na::Vector3<f64>,
  pub bitangent: na::Vector3<f64>,
}

impl NormalFrame {
  /// Frame of the surface spanned by the tangents `t1`, `t2`.
  pub fn from_tangents(t1: &na::Vector3<f64>, t2: &na::Vector3<f64>) -> Self {
    let normal = t1.cross(t2).normalize();
    let tangent = t1.normalize();
    let bitangent = normal.cross(&tangent);
    Self {
      normal,
      tangent,
      bitangent,
    }
  }

  /// Rows are normal, tangent and bitangent.
  pub fn matrix(&self) -> na::Matrix3<f64> {
    na::Matrix3::from_rows(&[
      self.normal.transpose(),
      self.tangent.transpose(),
      self.bitangent.transpose(),
    ])
  }

  /// Components of a global vector in this frame.
  pub fn global_to_frame(&self, v: &na::Vector3<f64>) -> na::Vector3<f64> {
    self.matrix() * v
  }
  pub fn frame_to_global(&self, v: &na::Vector3<f64>) -> na::Vector3<f64> {
    self.matrix().transpose() * v
  }
}
