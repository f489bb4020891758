//! Render model for the apply toggle.
//!
//! # Design
//! - Derive every visual attribute from a single [`ToggleSnapshot`].
//! - Keep class names and labels here so the view stays declarative.

use jobtrack_core::{Phase, ToggleSnapshot};

/// Base CSS class of the toggle button.
pub const BASE_CLASS: &str = "heart-button";
/// CSS class added while an application exists.
pub const ACTIVE_CLASS: &str = "active";
/// CSS class added while a remote call is outstanding.
pub const BUSY_CLASS: &str = "busy";

/// Visual state of the apply toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplyButtonModel {
    /// Whether the user has applied (heart filled).
    pub active: bool,
    /// Whether the button ignores clicks.
    pub disabled: bool,
    /// Accessible label describing the next action.
    pub label: &'static str,
}

impl ApplyButtonModel {
    /// Derive the model from a controller snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &ToggleSnapshot) -> Self {
        let active = snapshot.state.is_present();
        let label = match snapshot.phase() {
            Phase::Busy => "Saving application",
            Phase::IdlePresent => "Withdraw application",
            Phase::IdleAbsent => "Mark as applied",
        };
        Self {
            active,
            disabled: snapshot.busy,
            label,
        }
    }

    /// CSS classes for the button element.
    #[must_use]
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut classes = vec![BASE_CLASS];
        if self.active {
            classes.push(ACTIVE_CLASS);
        }
        if self.disabled {
            classes.push(BUSY_CLASS);
        }
        classes
    }

    /// Whether the heart icon renders filled.
    #[must_use]
    pub const fn icon_filled(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_api_models::JobId;
    use jobtrack_core::ToggleState;
    use jobtrack_test_support::fixtures::bare_application;

    fn snapshot(applied: bool, busy: bool) -> ToggleSnapshot {
        ToggleSnapshot {
            job_id: JobId(42),
            state: ToggleState::from_option(applied.then(|| bare_application(7, 42))),
            busy,
        }
    }

    #[test]
    fn absent_renders_outline_and_enabled() {
        let model = ApplyButtonModel::from_snapshot(&snapshot(false, false));
        assert!(!model.icon_filled());
        assert!(!model.disabled);
        assert_eq!(model.class_names(), vec![BASE_CLASS]);
        assert_eq!(model.label, "Mark as applied");
    }

    #[test]
    fn present_renders_filled_and_active() {
        let model = ApplyButtonModel::from_snapshot(&snapshot(true, false));
        assert!(model.icon_filled());
        assert_eq!(model.class_names(), vec![BASE_CLASS, ACTIVE_CLASS]);
        assert_eq!(model.label, "Withdraw application");
    }

    #[test]
    fn busy_disables_and_keeps_committed_state() {
        let model = ApplyButtonModel::from_snapshot(&snapshot(true, true));
        assert!(model.disabled);
        assert!(model.icon_filled());
        assert_eq!(
            model.class_names(),
            vec![BASE_CLASS, ACTIVE_CLASS, BUSY_CLASS]
        );
        assert_eq!(model.label, "Saving application");
    }
}
