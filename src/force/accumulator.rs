use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::ForceRef;

struct Member {
    id: u64,
    component: ForceRef,
}

/// Ordered collection of registered force components, summed into the total
/// per-particle force once per step.
///
/// Members are iterated in registration order so that per-step totals are
/// reproducible under finite-precision arithmetic. The accumulator does not
/// own its members.
pub struct ForceAccumulator {
    members: Vec<Member>,
}
impl ForceAccumulator {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append a component if not already registered. Registering twice is a
    /// no-op, so a term is never double counted.
    pub fn register(accumulator: &Rc<RefCell<Self>>, component: &ForceRef) {
        let id = {
            let c = component.borrow();
            assert!(
                c.is_attached(),
                "cannot register a detached force component"
            );
            c.id()
        };
        {
            let mut acc = accumulator.borrow_mut();
            if acc.members.iter().any(|m| m.id == id) {
                return;
            }
            acc.members.push(Member {
                id,
                component: Rc::clone(component),
            });
        }
        component
            .borrow_mut()
            .note_registration(Rc::downgrade(accumulator));
        debug!("registered force component {}", id);
    }

    /// Remove a component if present; no-op otherwise.
    pub fn unregister(accumulator: &Rc<RefCell<Self>>, component: &ForceRef) {
        let id = component.borrow().id();
        accumulator.borrow_mut().remove_member(id);
        component
            .borrow_mut()
            .forget_registration(&Rc::downgrade(accumulator));
    }

    /// Sum the contributions of all enabled members, in registration order,
    /// into a fresh total-force buffer.
    pub fn accumulate(&self, positions: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let mut forces = vec![[0.0, 0.0, 0.0]; positions.len()];
        for member in &self.members {
            let component = member.component.borrow();
            if !component.is_enabled() {
                continue;
            }
            component.add_contribution(positions, &mut forces);
        }
        forces
    }

    pub(crate) fn remove_member(&mut self, id: u64) {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        if self.members.len() < before {
            debug!("unregistered force component {}", id);
        }
    }
}
