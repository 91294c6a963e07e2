//! Immutability validation policy.
//!
//! Tier 2 (Update): Only enforced on UPDATE operations
//!
//! Validates:
//! - spec.storageClass cannot be changed once set
//! - Prevents scaling to zero from a running state

use super::ValidationContext;
use crate::admission::{StatusError, ValidationOutcome};

/// Validate immutability constraints on UPDATE operations
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    let old = match ctx.old_resource {
        Some(r) => r,
        None => return ValidationOutcome::allowed(), // Not an UPDATE
    };

    let new = ctx.resource;

    if old.spec.storage_class.is_some() && old.spec.storage_class != new.spec.storage_class {
        return ValidationOutcome::denied(StatusError::invalid(format!(
            "spec.storageClass is immutable (was {:?}, got {:?})",
            old.spec.storage_class, new.spec.storage_class
        )));
    }

    // Prevent scaling from non-zero to zero
    if old.spec.replicas > 0 && new.spec.replicas == 0 {
        return ValidationOutcome::denied(StatusError::forbidden(
            "Cannot scale down from a running state to 0 replicas. Delete the resource instead.",
        ));
    }

    ValidationOutcome::allowed()
}
