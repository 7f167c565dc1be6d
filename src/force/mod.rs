pub mod accumulator;
pub mod component;
pub mod constant;

pub use accumulator::ForceAccumulator;
pub use component::{ForceComponent, ForceRef};
pub use constant::Constant;

use enum_dispatch::enum_dispatch;

use crate::Error;

#[enum_dispatch]
pub enum ForceBackend {
    Constant,
}

#[enum_dispatch(ForceBackend)]
/// Trait for additive per-particle force terms
pub trait ForceBackendTrait {
    /// Number of particles the backend was bound to at allocation
    fn num_particles(&self) -> usize;

    /// Number of scalar parameters the backend accepts
    fn arity(&self) -> usize;

    /// Replace the parameter state in place. The caller has already
    /// validated arity and finiteness. Takes effect on the next query.
    fn set_params(&mut self, params: &[f64]);

    /// Force contribution on one particle for the given configuration
    fn force(&self, idx: usize, positions: &[[f64; 3]]) -> [f64; 3];

    /// Add this backend's contribution to a total-force buffer
    fn add_forces(&self, positions: &[[f64; 3]], forces: &mut [[f64; 3]]);
}

/// Check a parameter vector for arity and finiteness
pub(crate) fn validate_params(params: &[f64], arity: usize) -> Result<(), Error> {
    if params.len() != arity {
        return Err(Error::Configuration(format!(
            "expected {} force parameters, found {}",
            arity,
            params.len(),
        )));
    }
    if params.iter().any(|p| !p.is_finite()) {
        return Err(Error::Configuration(format!(
            "force parameters should be finite, found {:?}",
            params,
        )));
    }
    Ok(())
}
