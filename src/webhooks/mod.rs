//! Webhook module for validating Workload admission requests.
//!
//! This module provides the Workload validator with tiered validation policies:
//! - Tier 1 (Critical): Always enforced (replicas, image)
//! - Tier 2 (Update): Only on UPDATE operations (immutability), checked first
//! - Deletion protection on DELETE operations

pub mod policies;

use crate::admission::ValidatingHandler;
use crate::crd::Workload;

pub use policies::{ValidationContext, WorkloadValidator};

/// Handler for Workload admission requests.
pub type WorkloadHandler = ValidatingHandler<Workload, WorkloadValidator>;

/// Create the Workload admission handler with the default decoder.
pub fn workload_handler() -> WorkloadHandler {
    ValidatingHandler::new(WorkloadValidator)
}
