//! Custom Resource Definitions validated by this webhook.
//!
//! - `Workload`: a replicated container workload

mod workload;

pub use workload::*;
