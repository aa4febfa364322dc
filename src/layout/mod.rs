//! Force-directed layout engine.
//!
//! Pure computation with no browser dependency: build a [`Graph`], call
//! [`Graph::init`] once with the drawing surface size, then [`Graph::step`]
//! once per frame and read back node positions.

mod error;
mod graph;
mod params;
mod simulation;
mod vector;

pub use error::GraphError;
pub use graph::{Edge, Graph, Node, NodeId};
pub use params::{CENTERING_COEFFICIENT, ForceParams, RepulsionMode, VELOCITY_DAMPING};
pub use simulation::{MAX_FRAME_DT, clamp_frame_dt};
pub use vector::Vector;
