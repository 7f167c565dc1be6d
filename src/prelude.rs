pub use super::error::Error;
pub use super::force::{ForceAccumulator, ForceBackendTrait, ForceComponent, ForceRef};
pub use super::particles::Particles;
pub use super::simulation::Simulation;
