//! Error types for prepress operations.

use thiserror::Error;

use crate::model::NodeId;

/// Errors that can occur while building or preprocessing a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("span {start}..{end} does not fit a source text of {len} bytes")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("{kind} node {parent:?} cannot have children")]
    NotAContainer { parent: NodeId, kind: &'static str },

    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("unknown {option}: {value:?}")]
    UnknownOption { option: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
