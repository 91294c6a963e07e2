//! Admission request types.
//!
//! An [`AdmissionRequest`] is what the transport layer hands to the handler:
//! the operation tag plus the raw, still undecoded object payloads.

use std::fmt;

use kube::core::GroupVersionKind;
use kube::core::admission::Operation as KubeOperation;
use serde::{Deserialize, Serialize};

/// The kind of mutation being admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// A new object is being created.
    Create,
    /// An existing object is being replaced.
    Update,
    /// An existing object is being removed.
    Delete,
    /// A connect subresource (exec, attach, proxy) is being opened.
    Connect,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Connect => write!(f, "CONNECT"),
        }
    }
}

impl From<KubeOperation> for Operation {
    fn from(op: KubeOperation) -> Self {
        match op {
            KubeOperation::Create => Operation::Create,
            KubeOperation::Update => Operation::Update,
            KubeOperation::Delete => Operation::Delete,
            KubeOperation::Connect => Operation::Connect,
        }
    }
}

/// Raw JSON encoding of an object as it arrived on the wire.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawObject(Vec<u8>);

impl RawObject {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for RawObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads can be large; the length is enough for logs.
        write!(f, "RawObject({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for RawObject {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for RawObject {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for RawObject {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

/// A single admission request.
///
/// Create carries `object` only, Delete carries `old_object` only and Update
/// carries both. The handler never mutates a request it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionRequest {
    /// Identifier echoed back in the response.
    pub uid: String,
    /// Kind the caller declared for the objects, if any. A handler rejects
    /// requests declaring a kind other than the one it serves.
    pub kind: Option<GroupVersionKind>,
    pub operation: Operation,
    pub name: String,
    pub namespace: Option<String>,
    pub dry_run: bool,
    /// The proposed object (Create, Update).
    pub object: Option<RawObject>,
    /// The existing object (Update, Delete).
    pub old_object: Option<RawObject>,
}

impl AdmissionRequest {
    fn with_operation(operation: Operation) -> Self {
        Self {
            uid: String::new(),
            kind: None,
            operation,
            name: String::new(),
            namespace: None,
            dry_run: false,
            object: None,
            old_object: None,
        }
    }

    /// Request to create `object`.
    pub fn create(object: impl Into<RawObject>) -> Self {
        Self {
            object: Some(object.into()),
            ..Self::with_operation(Operation::Create)
        }
    }

    /// Request to replace `old_object` with `object`.
    pub fn update(object: impl Into<RawObject>, old_object: impl Into<RawObject>) -> Self {
        Self {
            object: Some(object.into()),
            old_object: Some(old_object.into()),
            ..Self::with_operation(Operation::Update)
        }
    }

    /// Request to delete `old_object`.
    pub fn delete(old_object: impl Into<RawObject>) -> Self {
        Self {
            old_object: Some(old_object.into()),
            ..Self::with_operation(Operation::Delete)
        }
    }

    /// Request to open a connect subresource.
    pub fn connect() -> Self {
        Self::with_operation(Operation::Connect)
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn with_kind(mut self, kind: GroupVersionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
