use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

/// At most one save in flight, independent of render timing
#[derive(Debug, Default)]
pub struct InFlight(bool);

impl InFlight {
    /// Claim the slot. `false` while a save is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.0 {
            return false;
        }
        self.0 = true;
        true
    }

    pub fn finish(&mut self) {
        self.0 = false;
    }

    pub fn is_pending(&self) -> bool {
        self.0
    }
}

/// Pending flag of a modal form. The `RefCell` is read by every submit
/// handler, the state handle only drives rendering.
#[derive(Clone)]
pub struct SubmitGuard {
    in_flight: Rc<RefCell<InFlight>>,
    saving: UseStateHandle<bool>,
}

impl SubmitGuard {
    pub fn begin(&self) -> bool {
        let started = self.in_flight.borrow_mut().try_begin();
        if started {
            self.saving.set(true);
        }
        started
    }

    pub fn finish(&self) {
        self.in_flight.borrow_mut().finish();
        self.saving.set(false);
    }

    pub fn is_saving(&self) -> bool {
        *self.saving
    }
}

#[hook]
pub fn use_submit_guard() -> SubmitGuard {
    let in_flight = use_mut_ref(InFlight::default);
    let saving = use_state(|| false);
    SubmitGuard { in_flight, saving }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_refused_until_finish() {
        let mut flight = InFlight::default();
        assert!(!flight.is_pending());
        assert!(flight.try_begin());
        assert!(!flight.try_begin());
        assert!(flight.is_pending());

        flight.finish();
        assert!(!flight.is_pending());
        assert!(flight.try_begin());
    }
}
