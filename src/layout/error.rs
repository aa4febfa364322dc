//! Errors raised while building a [`Graph`](super::Graph).

use thiserror::Error;

/// Failure of a graph construction operation.
///
/// Both variants are caller mistakes: nothing is retried and the graph is left
/// unchanged. Numeric trouble during simulation is never reported through here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// The value handed to the graph is not a usable node.
	#[error("invalid node: {0}")]
	InvalidArgument(String),

	/// No node with this label is registered.
	#[error("no node labelled `{0}`")]
	NotFound(String),
}
