//! Workload Custom Resource Definition.

use std::collections::BTreeMap;

use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Label that marks a Workload as protected from deletion.
pub const PROTECTED_LABEL: &str = "admission.example.com/protected";

/// Workload is a replicated container workload.
///
/// Example:
/// ```yaml
/// apiVersion: admission.example.com/v1
/// kind: Workload
/// metadata:
///   name: web
///   labels:
///     admission.example.com/protected: "true"
/// spec:
///   replicas: 3
///   image: nginx:1.27
///   storageClass: fast-ssd
/// ```
#[derive(CustomResource, Clone, Debug, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "admission.example.com",
    version = "v1",
    kind = "Workload",
    plural = "workloads",
    shortname = "wl",
    namespaced,
    printcolumn = r#"{"name":"Replicas", "type":"integer", "jsonPath":".spec.replicas"}"#,
    printcolumn = r#"{"name":"Image", "type":"string", "jsonPath":".spec.image"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    /// Number of pods to run (default 1).
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    /// Container image, e.g. `nginx:1.27` or `repo/app@sha256:...`.
    pub image: String,

    /// Storage class for the workload's volumes. Immutable once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Additional labels to apply to the pods.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

fn default_replicas() -> i32 {
    1
}

impl Workload {
    /// Whether the object carries `PROTECTED_LABEL=true`.
    pub fn is_protected(&self) -> bool {
        self.labels()
            .get(PROTECTED_LABEL)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Whether `image` names an explicit tag other than `latest`, or a digest.
pub fn image_is_pinned(image: &str) -> bool {
    if let Some((_, digest)) = image.split_once('@') {
        return !digest.is_empty();
    }
    // A ':' before the last '/' belongs to a registry port, not a tag.
    let name = image.rsplit('/').next().unwrap_or(image);
    match name.rsplit_once(':') {
        Some((_, tag)) => !tag.is_empty() && tag != "latest",
        None => false,
    }
}
