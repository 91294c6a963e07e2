//! Validating admission core.
//!
//! Request → decode object(s) → validator hook → response. Every piece is
//! request-scoped; nothing is shared between requests except read-only
//! configuration (the decoder mode and the validator).

pub mod decoder;
pub mod handler;
pub mod request;
pub mod response;
pub mod review;
pub mod validator;

pub use decoder::{DecodeError, Decoder};
pub use handler::{ObjectDecodeError, RequestError, ValidatingHandler};
pub use request::{AdmissionRequest, Operation, RawObject};
pub use response::{
    AdmissionResponse, REASON_BAD_REQUEST, REASON_FORBIDDEN, REASON_INVALID, Status,
};
pub use review::{ReviewError, handle_review, to_kube_response};
pub use validator::{StatusError, ValidationError, ValidationOutcome, Validator, Warnings};
