//! Deletion protection policy.
//!
//! Only enforced on DELETE operations. A Workload labelled
//! `admission.example.com/protected: "true"` cannot be deleted until the
//! label is removed.

use crate::admission::{ValidationError, ValidationOutcome};
use crate::crd::{PROTECTED_LABEL, Workload};
use kube::ResourceExt;

/// Validate that `old` may be deleted
pub fn validate(old: &Workload) -> ValidationOutcome {
    if old.is_protected() {
        return ValidationOutcome::denied(ValidationError::plain(format!(
            "workload {:?} is protected; remove the {} label before deleting it",
            old.name_any(),
            PROTECTED_LABEL
        )));
    }

    ValidationOutcome::allowed()
}
