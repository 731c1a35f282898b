//! # Verdant Mount Errors
//!
//! Failures of the mount orchestrator and the host document. None of these
//! roll back earlier pipeline steps: the instance keeps its state and its
//! last reached lifecycle phase.
use thiserror::Error;

use crate::dom::ElementId;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("Mount target {target} did not match any element")]
    TargetNotFound { target: String },

    #[error("Instance {uid} of '{component}' is already mounted")]
    AlreadyMounted { component: String, uid: u64 },

    #[error("{element} is no longer attached to the document")]
    DetachedElement { element: ElementId },

    #[error("Patch failed: {reason}")]
    Patch { reason: String },
}
