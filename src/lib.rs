pub mod error;
pub mod force;
pub mod particles;
pub mod prelude;
pub mod simulation;

pub use error::Error;
pub use force::*;
pub use particles::Particles;
pub use simulation::Simulation;
