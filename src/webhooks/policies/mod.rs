//! Validation policies for Workload admission.
//!
//! Policies are organized into tiers:
//! - Tier 1 (Critical): enforced on CREATE and UPDATE (replicas, image)
//! - Tier 2 (Update): only enforced on UPDATE operations (immutability),
//!   evaluated before tier 1
//! - Deletion: only enforced on DELETE operations (protection)
//!
//! Warnings from passing policies accumulate in evaluation order. The first
//! failing policy stops evaluation.

pub mod image;
pub mod immutability;
pub mod protection;
pub mod replicas;

use crate::admission::{ValidationOutcome, Validator};
use crate::crd::Workload;

/// Context for validation
pub struct ValidationContext<'a> {
    /// The resource being validated
    pub resource: &'a Workload,
    /// The old resource (for UPDATE operations)
    pub old_resource: Option<&'a Workload>,
}

impl<'a> ValidationContext<'a> {
    pub fn create(resource: &'a Workload) -> Self {
        Self {
            resource,
            old_resource: None,
        }
    }

    pub fn update(resource: &'a Workload, old_resource: &'a Workload) -> Self {
        Self {
            resource,
            old_resource: Some(old_resource),
        }
    }

    /// Check if this is an UPDATE operation
    pub fn is_update(&self) -> bool {
        self.old_resource.is_some()
    }
}

/// Run `policies` in order, merging warnings until one fails.
fn run_policies(
    ctx: &ValidationContext<'_>,
    policies: &[fn(&ValidationContext<'_>) -> ValidationOutcome],
) -> ValidationOutcome {
    let mut merged = ValidationOutcome::allowed();
    for policy in policies {
        let outcome = policy(ctx);
        merged.warnings.extend(outcome.warnings);
        if let Err(e) = outcome.result {
            merged.result = Err(e);
            return merged;
        }
    }
    merged
}

/// Run all CREATE/UPDATE validation policies
pub fn validate_all(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    // Tier 2 runs ahead of tier 1 on UPDATE so a forbidden transition is
    // reported as such rather than as an out-of-range field.
    if ctx.is_update() {
        run_policies(ctx, &[immutability::validate, replicas::validate, image::validate])
    } else {
        run_policies(ctx, &[replicas::validate, image::validate])
    }
}

/// The Workload validator wired into the admission handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkloadValidator;

impl Validator<Workload> for WorkloadValidator {
    fn validate_create(&self, object: &Workload) -> ValidationOutcome {
        validate_all(&ValidationContext::create(object))
    }

    fn validate_update(&self, new: &Workload, old: &Workload) -> ValidationOutcome {
        validate_all(&ValidationContext::update(new, old))
    }

    fn validate_delete(&self, old: &Workload) -> ValidationOutcome {
        protection::validate(old)
    }
}
