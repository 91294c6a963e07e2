//! Container image validation policy.
//!
//! Tier 1 (Critical): Always enforced
//!
//! Validates:
//! - An image is set
//! - Warns when the image is not pinned to a tag or digest

use super::ValidationContext;
use crate::admission::{StatusError, ValidationOutcome};
use crate::crd::image_is_pinned;

/// Validate the container image reference
pub fn validate(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    let image = ctx.resource.spec.image.trim();

    if image.is_empty() {
        return ValidationOutcome::denied(StatusError::invalid("spec.image is required"));
    }

    if !image_is_pinned(image) {
        return ValidationOutcome::allowed().with_warnings([format!(
            "spec.image {:?} is not pinned to a tag or digest",
            image
        )]);
    }

    ValidationOutcome::allowed()
}
