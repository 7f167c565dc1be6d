use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::{
    force::{ForceAccumulator, ForceComponent, ForceRef},
    Error, Particles,
};

/// The main simulation driver: owns the particle set, the force
/// accumulator, and the force components attached to it.
///
/// One force accumulation runs per step; the total is held in `forces`
/// for whatever consumes it next. Tearing the simulation down releases
/// every attached component, so stale handles kept by user code fail
/// cleanly instead of touching a dead backend.
pub struct Simulation {
    pub particles: Particles,
    accumulator: Rc<RefCell<ForceAccumulator>>,
    components: Vec<ForceRef>,
    forces: Vec<[f64; 3]>,
    step: usize,
}
impl Simulation {
    /// Create a new simulation over a particle set
    pub fn new(particles: Particles) -> Self {
        Self {
            particles,
            accumulator: Rc::new(RefCell::new(ForceAccumulator::new())),
            components: Vec::new(),
            forces: Vec::new(),
            step: 0,
        }
    }

    // Getters
    pub fn num_particles(&self) -> usize {
        self.particles.num_particles()
    }
    pub fn accumulator(&self) -> &Rc<RefCell<ForceAccumulator>> {
        &self.accumulator
    }
    pub fn num_forces(&self) -> usize {
        self.accumulator.borrow().len()
    }
    pub fn current_step(&self) -> usize {
        self.step
    }
    /// Total per-particle forces from the most recent step
    pub fn forces(&self) -> &Vec<[f64; 3]> {
        &self.forces
    }

    /// Attach a constant force term bound to the current particle set and
    /// register it with the accumulator. Returns a shared handle; the
    /// simulation retains ownership for teardown.
    pub fn constant_force(&mut self, fx: f64, fy: f64, fz: f64) -> Result<ForceRef, Error> {
        let component =
            ForceComponent::attach_constant(self.particles.num_particles(), fx, fy, fz)?;
        let component = Rc::new(RefCell::new(component));
        ForceAccumulator::register(&self.accumulator, &component);
        self.components.push(Rc::clone(&component));
        Ok(component)
    }

    /// Register an existing component with the active accumulator. The
    /// membership change takes effect on the next step; no restart needed.
    pub fn add_force(&mut self, component: &ForceRef) {
        ForceAccumulator::register(&self.accumulator, component);
    }
    /// Remove a component from the active accumulator without detaching it
    pub fn remove_force(&mut self, component: &ForceRef) {
        ForceAccumulator::unregister(&self.accumulator, component);
    }

    /// Step the simulation forward, accumulating forces once per step
    pub fn run(&mut self, num_steps: usize) {
        for _ in 0..num_steps {
            self.forces = self
                .accumulator
                .borrow()
                .accumulate(self.particles.positions());
            self.step += 1;
        }
    }

    /// Release every attached force component. Called on teardown; safe to
    /// call again since release is idempotent.
    pub fn release_all(&mut self) {
        if !self.components.is_empty() {
            debug!("releasing {} force components", self.components.len());
        }
        for component in &self.components {
            component.borrow_mut().release();
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.release_all();
    }
}
