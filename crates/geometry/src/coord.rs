/// Coordinate in the reference domain of a shape.
pub type Local<const D: usize> = na::SVector<f64, D>;
/// Coordinate in the ambient space.
pub type Global<const P: usize> = na::SVector<f64, P>;

/// Row `l` holds `∂global/∂local_l`.
pub type Jacobian<const D: usize, const P: usize> = na::SMatrix<f64, D, P>;
pub type Hessian<const D: usize> = na::SMatrix<f64, D, D>;
/// Entry `[k][(l, m)]` is `∂³/∂k∂l∂m`.
pub type Tensor3<const D: usize> = [Hessian<D>; D];
