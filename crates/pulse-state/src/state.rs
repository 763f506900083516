//! State capability contract
//!
//! A state is one independent unit of the application (menu, gameplay,
//! pause overlay, ...) driven once per frame by the registry. Concrete
//! states live outside this crate; the registry depends only on the
//! trait below.

use pulse_core::StateKey;
use pulse_wire::EventStream;

/// Status returned by `State::update`
///
/// The registry never interprets it; it is reserved for state
/// implementations and their owners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UpdateStatus(pub i32);

impl UpdateStatus {
    pub const OK: UpdateStatus = UpdateStatus(0);
}

/// Frame-loop state unit
///
/// `update` runs only while the state is active. It may read records
/// appended earlier in the same frame and append records for states
/// registered after it - same-frame, order-dependent visibility is the
/// point of the shared stream.
pub trait State {
    /// Name-derived identity, fixed at construction
    fn key(&self) -> StateKey;

    /// Active flag; only active states receive update/render calls
    fn is_active(&self) -> bool;

    /// Set the active flag (idempotent)
    fn activate(&mut self);

    /// Clear the active flag (idempotent)
    fn deactivate(&mut self);

    /// Advance the state by `dt` seconds
    fn update(&mut self, dt: f32, events: &mut EventStream) -> UpdateStatus;

    /// Draw the state
    fn render(&mut self);
}

/// Key/active plumbing shared by state implementations
///
/// Implementors embed one and delegate `key`, `is_active`, `activate`
/// and `deactivate` to it. Starts inactive.
#[derive(Clone, Copy, Debug)]
pub struct StateLabel {
    key: StateKey,
    active: bool,
}

impl StateLabel {
    /// Inactive label for a named state
    pub fn from_name(name: &str) -> Self {
        StateLabel {
            key: StateKey::from_name(name),
            active: false,
        }
    }

    #[inline]
    pub fn key(&self) -> StateKey {
        self.key
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn activate(&mut self) {
        self.active = true;
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_label_starts_inactive() {
        let label = StateLabel::from_name("Menu");
        assert!(!label.is_active());
        assert_eq!(label.key(), StateKey::from_name("Menu"));
    }

    #[test]
    fn test_label_toggles_idempotent() {
        let mut label = StateLabel::from_name("Menu");

        label.activate();
        label.activate();
        assert!(label.is_active());

        label.deactivate();
        label.deactivate();
        assert!(!label.is_active());
    }

    proptest! {
        #[test]
        fn prop_last_toggle_wins(toggles in prop::collection::vec(any::<bool>(), 1..32)) {
            let mut label = StateLabel::from_name("Menu");
            for &on in &toggles {
                if on {
                    label.activate();
                } else {
                    label.deactivate();
                }
            }
            prop_assert_eq!(label.is_active(), *toggles.last().unwrap());
        }
    }
}
