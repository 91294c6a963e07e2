//! Validating admission handler.
//!
//! Decodes the objects a request carries, calls the matching [`Validator`]
//! hook and turns the [`ValidationOutcome`] into an [`AdmissionResponse`].
//!
//! Translation rules:
//! - success: allowed, 200, warnings kept
//! - [`ValidationError::Status`]: denied, status copied verbatim, warnings dropped
//! - [`ValidationError::Plain`]: denied, 403 `Forbidden`, warnings kept
//! - undecodable object: denied, 400 `BadRequest`, validator not called
//! - declared kind other than `K`: denied, 400 `BadRequest`, validator not called

use std::marker::PhantomData;

use kube::Resource;
use kube::core::GroupVersionKind;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::decoder::{DecodeError, Decoder};
use super::request::{AdmissionRequest, Operation, RawObject};
use super::response::AdmissionResponse;
use super::validator::{ValidationError, ValidationOutcome, Validator};

/// A required object in the request could not be decoded.
#[derive(Debug, Error)]
#[error("failed to decode {field} as {kind}: {source}")]
pub struct ObjectDecodeError {
    /// `object` or `oldObject`
    pub field: &'static str,
    pub kind: String,
    #[source]
    pub source: DecodeError,
}

/// Why a request was rejected before reaching the validator.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request declares a kind the handler does not serve
    #[error("request kind {found} does not match {expected}")]
    KindMismatch { expected: String, found: String },

    #[error(transparent)]
    Decode(#[from] ObjectDecodeError),
}

/// Handles admission requests for resources of kind `K` with validator `V`.
///
/// Holds no mutable state; share it behind an `Arc` across concurrent
/// requests.
pub struct ValidatingHandler<K, V> {
    validator: V,
    decoder: Decoder,
    _kind: PhantomData<fn() -> K>,
}

impl<K, V> ValidatingHandler<K, V>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
    V: Validator<K>,
{
    /// Create a handler using the default, kind-checking decoder.
    pub fn new(validator: V) -> Self {
        Self::with_decoder(validator, Decoder::new())
    }

    pub fn with_decoder(validator: V, decoder: Decoder) -> Self {
        Self {
            validator,
            decoder,
            _kind: PhantomData,
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Handle one request. Every failure is mapped to a denied response.
    pub fn handle(&self, request: &AdmissionRequest) -> AdmissionResponse {
        let uid = &request.uid;
        debug!(
            uid = %uid,
            operation = %request.operation,
            kind = %K::kind(&()),
            namespace = ?request.namespace,
            name = %request.name,
            dry_run = request.dry_run,
            "Processing admission request"
        );

        let response = match self.dispatch(request) {
            Ok(outcome) => AdmissionResponse::from(outcome),
            Err(e) => {
                error!(uid = %uid, error = %e, "Rejected admission request before validation");
                AdmissionResponse::bad_request(e.to_string())
            }
        };

        if response.allowed {
            info!(
                uid = %uid,
                warnings = response.warnings.len(),
                "Admission request allowed"
            );
        } else {
            warn!(
                uid = %uid,
                code = response.result.code,
                reason = %response.result.reason,
                message = %response.result.message,
                "Admission request denied"
            );
        }

        response.with_uid(uid.clone())
    }

    fn dispatch(&self, request: &AdmissionRequest) -> Result<ValidationOutcome, RequestError> {
        if request.operation != Operation::Connect {
            self.check_kind(request.kind.as_ref())?;
        }

        match request.operation {
            Operation::Create => {
                let object = self.decode("object", request.object.as_ref())?;
                Ok(self.validator.validate_create(&object))
            }
            Operation::Update => {
                let object = self.decode("object", request.object.as_ref())?;
                let old_object = self.decode("oldObject", request.old_object.as_ref())?;
                Ok(self.validator.validate_update(&object, &old_object))
            }
            Operation::Delete => {
                let old_object = self.decode("oldObject", request.old_object.as_ref())?;
                Ok(self.validator.validate_delete(&old_object))
            }
            // No validator hook exists for connect.
            Operation::Connect => Ok(ValidationOutcome::allowed()),
        }
    }

    /// A request without a declared kind is checked against the payload only.
    fn check_kind(&self, declared: Option<&GroupVersionKind>) -> Result<(), RequestError> {
        let Some(declared) = declared else {
            return Ok(());
        };
        if !self.decoder.checks_kind() {
            return Ok(());
        }

        let expected = GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&()));
        if *declared == expected {
            return Ok(());
        }
        Err(RequestError::KindMismatch {
            expected: format_gvk(&expected),
            found: format_gvk(declared),
        })
    }

    fn decode(&self, field: &'static str, raw: Option<&RawObject>) -> Result<K, ObjectDecodeError> {
        let result = match raw {
            Some(raw) => self.decoder.decode::<K>(raw),
            None => Err(DecodeError::Empty),
        };
        result.map_err(|source| ObjectDecodeError {
            field,
            kind: K::kind(&()).into_owned(),
            source,
        })
    }
}

fn format_gvk(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        format!("{}, Kind={}", gvk.version, gvk.kind)
    } else {
        format!("{}/{}, Kind={}", gvk.group, gvk.version, gvk.kind)
    }
}

impl From<ValidationOutcome> for AdmissionResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        let ValidationOutcome { warnings, result } = outcome;
        match result {
            Ok(()) => AdmissionResponse::allowed().with_warnings(warnings),
            // A structured status replaces the warnings entirely.
            Err(ValidationError::Status(e)) => AdmissionResponse::from_status(false, e.status),
            Err(ValidationError::Plain(message)) => {
                AdmissionResponse::denied(message).with_warnings(warnings)
            }
        }
    }
}
