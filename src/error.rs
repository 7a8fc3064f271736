use thiserror::Error;

use crate::toolkit::{NodeHandle, ObjectClass};

/// Failures reported by a [`Toolkit`](crate::toolkit::Toolkit) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("handle {0} is stale or was never allocated")]
    StaleHandle(NodeHandle),

    #[error("toolkit could not allocate a {0:?} object")]
    OutOfMemory(ObjectClass),

    #[error("no room for another event subscription on {0}")]
    SubscriptionLimit(NodeHandle),

    #[error("{handle} is a {actual:?} object, expected {expected:?}")]
    WrongClass {
        handle: NodeHandle,
        expected: ObjectClass,
        actual: ObjectClass,
    },

    #[error("cannot parent {0} under itself or one of its descendants")]
    CyclicParent(NodeHandle),
}

/// Errors surfaced by the view layer.
#[derive(Debug, Error)]
pub enum DuiError {
    #[error("no toolkit is installed on this thread")]
    NoToolkit,

    #[error("a toolkit is already installed on this thread")]
    AlreadyInstalled,

    #[error("toolkit is already borrowed; re-entrant toolkit access")]
    ToolkitBusy,

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

pub type Result<T, E = DuiError> = std::result::Result<T, E>;
