//! Error types surfaced to the host.

use thiserror::Error;

use crate::element::ElementTag;

/// Errors reported by engine and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown page: {name}")]
    UnknownPage { name: String },

    #[error("unknown element: {kind:?} named {name:?}")]
    UnknownElement { kind: ElementTag, name: String },

    #[error("no active page")]
    NoActivePage,
}
