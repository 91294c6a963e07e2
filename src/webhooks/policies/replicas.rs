//! Replica count validation policy.
//!
//! Tier 1 (Critical): Always enforced
//!
//! Validates:
//! - Replicas is at least MIN_REPLICAS
//! - Replicas does not exceed MAX_REPLICAS
//! - Warns when a single replica leaves no redundancy

use super::ValidationContext;
use crate::admission::{StatusError, ValidationOutcome};

/// Minimum number of replicas
pub const MIN_REPLICAS: i32 = 1;

/// Maximum number of replicas
pub const MAX_REPLICAS: i32 = 50;

/// Validate the replica count
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    let replicas = ctx.resource.spec.replicas;

    if replicas < MIN_REPLICAS {
        return ValidationOutcome::denied(StatusError::invalid(format!(
            "spec.replicas must be at least {} (got {})",
            MIN_REPLICAS, replicas
        )));
    }

    if replicas > MAX_REPLICAS {
        return ValidationOutcome::denied(StatusError::invalid(format!(
            "spec.replicas cannot exceed {} (got {})",
            MAX_REPLICAS, replicas
        )));
    }

    if replicas == 1 {
        return ValidationOutcome::allowed()
            .with_warnings(["spec.replicas is 1; workload has no redundancy"]);
    }

    ValidationOutcome::allowed()
}
