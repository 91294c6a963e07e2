//! validating-webhook library crate
//!
//! The decode, dispatch and translate core of a Kubernetes validating
//! admission webhook, plus the Workload custom resource and its validator.

pub mod admission;
pub mod crd;
pub mod webhooks;

pub use admission::{
    AdmissionRequest, AdmissionResponse, Decoder, Operation, Status, StatusError,
    ValidatingHandler, ValidationError, ValidationOutcome, Validator, handle_review,
};
pub use webhooks::{WorkloadHandler, WorkloadValidator, workload_handler};
