//! Conversion between the Kubernetes `AdmissionReview` envelope and the
//! handler's request and response types.
//!
//! Serving the review over HTTPS is left to the embedding binary; these
//! functions only build values.

use kube::Resource;
use kube::core::DynamicObject;
use kube::core::Status as KubeStatus;
use kube::core::admission::{
    AdmissionRequest as KubeRequest, AdmissionResponse as KubeResponse, AdmissionReview,
    ConvertAdmissionReviewError,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

use super::handler::ValidatingHandler;
use super::request::{AdmissionRequest, RawObject};
use super::response::{AdmissionResponse, Status};
use super::validator::Validator;

/// Errors converting an incoming review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The review had no request in it
    #[error("invalid AdmissionReview: {0}")]
    Envelope(#[from] ConvertAdmissionReviewError),

    /// An embedded object could not be re-encoded as JSON
    #[error("failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn to_raw(
    field: &'static str,
    object: Option<&DynamicObject>,
) -> Result<Option<RawObject>, ReviewError> {
    object
        .map(|o| serde_json::to_vec(o).map(RawObject::from))
        .transpose()
        .map_err(|source| ReviewError::Encode { field, source })
}

impl TryFrom<&KubeRequest<DynamicObject>> for AdmissionRequest {
    type Error = ReviewError;

    fn try_from(request: &KubeRequest<DynamicObject>) -> Result<Self, Self::Error> {
        Ok(AdmissionRequest {
            uid: request.uid.clone(),
            kind: Some(request.kind.clone()),
            operation: request.operation.clone().into(),
            name: request.name.clone(),
            namespace: request.namespace.clone(),
            dry_run: request.dry_run,
            object: to_raw("object", request.object.as_ref())?,
            old_object: to_raw("oldObject", request.old_object.as_ref())?,
        })
    }
}

impl From<Status> for KubeStatus {
    fn from(status: Status) -> Self {
        let summary = if status.is_success() {
            KubeStatus::success()
        } else {
            KubeStatus::failure(&status.message, &status.reason)
        };
        summary.with_code(status.code)
    }
}

/// Attach `response` to the envelope answering `request`.
pub fn to_kube_response(
    response: AdmissionResponse,
    request: &KubeRequest<DynamicObject>,
) -> KubeResponse {
    let mut out = KubeResponse::from(request);
    out.allowed = response.allowed;
    out.result = response.result.into();
    if !response.warnings.is_empty() {
        out.warnings = Some(response.warnings);
    }
    out
}

/// Run `handler` over a whole review and produce the review to send back.
///
/// A review that cannot be converted is answered with kube's invalid
/// response and never reaches the validator.
pub fn handle_review<K, V>(
    handler: &ValidatingHandler<K, V>,
    review: AdmissionReview<DynamicObject>,
) -> AdmissionReview<DynamicObject>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
    V: Validator<K>,
{
    let request: KubeRequest<DynamicObject> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            let e = ReviewError::from(e);
            error!(error = %e, "Failed to extract admission request");
            return KubeResponse::invalid(e.to_string()).into_review();
        }
    };

    let response = match AdmissionRequest::try_from(&request) {
        Ok(req) => handler.handle(&req),
        Err(e) => {
            error!(uid = %request.uid, error = %e, "Failed to convert admission request");
            AdmissionResponse::bad_request(e.to_string()).with_uid(request.uid.clone())
        }
    };

    to_kube_response(response, &request).into_review()
}
