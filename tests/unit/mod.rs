// Test code is allowed to panic on failure
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for validating-webhook.
//!
//! These tests run without a Kubernetes cluster and test individual
//! components in isolation.

mod crd_tests {
    use kube::{CustomResourceExt, Resource};
    use validating_webhook::crd::{PROTECTED_LABEL, Workload, WorkloadSpec};

    #[test]
    fn test_workload_type_meta() {
        assert_eq!(Workload::kind(&()), "Workload");
        assert_eq!(Workload::api_version(&()), "admission.example.com/v1");
        assert_eq!(Workload::plural(&()), "workloads");
    }

    #[test]
    fn test_workload_crd() {
        let crd = Workload::crd();
        assert_eq!(crd.spec.group, "admission.example.com");
        assert_eq!(crd.spec.names.kind, "Workload");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.names.short_names, Some(vec!["wl".to_string()]));
    }

    #[test]
    fn test_spec_defaults() {
        let spec: WorkloadSpec = serde_json::from_str(r#"{"image": "nginx:1.27"}"#).unwrap();
        assert_eq!(spec.replicas, 1);
        assert_eq!(spec.storage_class, None);
        assert!(spec.labels.is_empty());
    }

    #[test]
    fn test_is_protected() {
        let mut workload = Workload::new(
            "web",
            serde_json::from_str(r#"{"image": "nginx:1.27"}"#).unwrap(),
        );
        assert!(!workload.is_protected());

        workload
            .meta_mut()
            .labels
            .get_or_insert_with(Default::default)
            .insert(PROTECTED_LABEL.to_string(), "TRUE".to_string());
        assert!(workload.is_protected());
    }
}

mod request_tests {
    use validating_webhook::admission::{AdmissionRequest, RawObject};

    #[test]
    fn test_builders() {
        let request = AdmissionRequest::create("{}")
            .with_uid("abc")
            .with_name("web")
            .with_namespace("default")
            .with_dry_run(true);
        assert_eq!(request.uid, "abc");
        assert_eq!(request.name, "web");
        assert_eq!(request.namespace.as_deref(), Some("default"));
        assert!(request.dry_run);
    }

    #[test]
    fn test_raw_object_debug_hides_payload() {
        let raw = RawObject::from(r#"{"secret": "value"}"#);
        assert_eq!(format!("{raw:?}"), "RawObject(19 bytes)");
        assert_eq!(raw.len(), 19);
    }
}

mod response_tests {
    use validating_webhook::admission::{
        AdmissionResponse, REASON_INVALID, Status, StatusError, ValidationError,
        ValidationOutcome,
    };

    #[test]
    fn test_status_error_helpers() {
        let invalid = StatusError::invalid("bad field");
        assert_eq!(invalid.status().code, 422);
        assert_eq!(invalid.status().reason, REASON_INVALID);

        let forbidden = StatusError::forbidden("locked");
        assert_eq!(forbidden.status().code, 403);
    }

    #[test]
    fn test_status_error_from_status() {
        let status = Status::new(http::StatusCode::CONFLICT, "AlreadyExists", "taken");
        let error = StatusError::from(status.clone());
        assert_eq!(error.status, status);
        assert_eq!(error.to_string(), "taken");
    }

    #[test]
    fn test_outcome_default_is_allowed() {
        let outcome = ValidationOutcome::default();
        assert!(outcome.is_allowed());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_outcome_into_response() {
        let response = AdmissionResponse::from(
            ValidationOutcome::denied(ValidationError::plain("nope")).with_warnings(["w1"]),
        );
        assert_eq!(response, AdmissionResponse::denied("nope").with_warnings(["w1"]));
    }

    #[test]
    fn test_response_deserializes() {
        let response: AdmissionResponse = serde_json::from_str(
            r#"{"uid": "abc", "allowed": true, "result": {"code": 200}}"#,
        )
        .unwrap();
        assert_eq!(response, AdmissionResponse::allowed().with_uid("abc"));
    }
}
