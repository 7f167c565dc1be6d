use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use super::{validate_params, Constant, ForceAccumulator, ForceBackend, ForceBackendTrait};
use crate::Error;

/// Shared handle to a force component. Components are owned by the
/// simulation or user scope; accumulators only hold references.
pub type ForceRef = Rc<RefCell<ForceComponent>>;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Backing compute resource slot. `Detached` is terminal: once the backend
/// is dropped, every mutating or activating operation on the component
/// fails with [`Error::InvalidState`].
enum BackendHandle {
    Attached(ForceBackend),
    Detached,
}

/// A single additive force term and its lifecycle state.
///
/// Owns exactly one backend while attached, plus the user-facing parameter
/// vector and the enabled flag. Disabling keeps the backend allocated and
/// only excludes the term from accumulation; `release` drops the backend
/// and removes the component from every accumulator it is registered with.
pub struct ForceComponent {
    id: u64,
    params: Vec<f64>,
    backend: BackendHandle,
    enabled: bool,
    registered_in: Vec<Weak<RefCell<ForceAccumulator>>>,
}
impl ForceComponent {
    /// Attach a constant force term bound to the current particle count.
    pub fn attach_constant(
        num_particles: usize,
        fx: f64,
        fy: f64,
        fz: f64,
    ) -> Result<Self, Error> {
        if num_particles == 0 {
            return Err(Error::Configuration(String::from(
                "cannot attach a force to an empty particle set",
            )));
        }
        let params = vec![fx, fy, fz];
        validate_params(&params, 3)?;

        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!(
            "attached constant force {} ({}, {}, {}) over {} particles",
            id, fx, fy, fz, num_particles,
        );
        Ok(Self {
            id,
            params,
            backend: BackendHandle::Attached(ForceBackend::from(Constant::new(
                num_particles,
                fx,
                fy,
                fz,
            ))),
            enabled: true,
            registered_in: Vec::new(),
        })
    }

    // Getters
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn is_attached(&self) -> bool {
        matches!(self.backend, BackendHandle::Attached(_))
    }
    /// Whether the term takes part in accumulation. Only meaningful while
    /// attached.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
    pub fn parameters(&self) -> &Vec<f64> {
        &self.params
    }

    // Setters
    /// Replace the parameter state in place; the next accumulation reflects
    /// the new values. Fails from the detached state, and on wrong arity or
    /// non-finite values.
    pub fn set_parameters(&mut self, params: &[f64]) -> Result<(), Error> {
        let backend = match &mut self.backend {
            BackendHandle::Attached(backend) => backend,
            BackendHandle::Detached => return Err(Error::InvalidState("set_parameters")),
        };
        validate_params(params, backend.arity())?;
        self.params.clear();
        self.params.extend_from_slice(params);
        backend.set_params(params);
        Ok(())
    }
    /// Include the term in accumulation again, with its last parameters.
    pub fn enable(&mut self) -> Result<(), Error> {
        if !self.is_attached() {
            return Err(Error::InvalidState("enable"));
        }
        self.enabled = true;
        Ok(())
    }
    /// Exclude the term from accumulation. The backend stays allocated and
    /// the component remains valid to mutate.
    pub fn disable(&mut self) -> Result<(), Error> {
        if !self.is_attached() {
            return Err(Error::InvalidState("disable"));
        }
        self.enabled = false;
        Ok(())
    }

    /// Drop the backend and unregister from every accumulator. Idempotent:
    /// teardown paths may call this more than once.
    pub fn release(&mut self) {
        if !self.is_attached() {
            return;
        }
        debug!("releasing force component {}", self.id);
        self.backend = BackendHandle::Detached;
        for accumulator in std::mem::take(&mut self.registered_in) {
            if let Some(accumulator) = accumulator.upgrade() {
                accumulator.borrow_mut().remove_member(self.id);
            }
        }
    }

    /// Add this component's contribution to a total-force buffer. Callers
    /// check the enabled flag; a detached component must have been
    /// unregistered before it could be seen here.
    pub(crate) fn add_contribution(&self, positions: &[[f64; 3]], forces: &mut [[f64; 3]]) {
        match &self.backend {
            BackendHandle::Attached(backend) => backend.add_forces(positions, forces),
            BackendHandle::Detached => {
                panic!("detached force component {} left in an accumulator", self.id)
            }
        }
    }

    // Registration bookkeeping, driven by the accumulator
    pub(crate) fn note_registration(&mut self, accumulator: Weak<RefCell<ForceAccumulator>>) {
        self.registered_in.push(accumulator);
    }
    pub(crate) fn forget_registration(&mut self, accumulator: &Weak<RefCell<ForceAccumulator>>) {
        self.registered_in.retain(|w| !w.ptr_eq(accumulator));
    }
}
