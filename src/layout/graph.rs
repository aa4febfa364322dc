//! Graph model: labelled nodes carrying kinematic state, and the edges between them.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::error::GraphError;
use super::params::ForceParams;
use super::vector::Vector;

/// Handle to a node instance owned by a [`Graph`].
///
/// Handles compare equal only when they name the same instance. Re-adding a
/// label creates a new instance with a new handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the instance in the graph's arena.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Node({})", self.0)
	}
}

/// A labelled point mass.
#[derive(Clone, Debug)]
pub struct Node {
	label: String,
	pub(crate) pos: Vector,
	pub(crate) vel: Vector,
	pub(crate) acel: Vector,
	pub(crate) peers: Vec<NodeId>,
	pub(crate) pinned: bool,
}

impl Node {
	/// A node at rest at the origin with no peers.
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			pos: Vector::ZERO,
			vel: Vector::ZERO,
			acel: Vector::ZERO,
			peers: Vec::new(),
			pinned: false,
		}
	}

	/// Same as [`Node::new`] but starting at `pos`.
	pub fn at(label: impl Into<String>, pos: Vector) -> Self {
		Self {
			pos,
			..Self::new(label)
		}
	}

	/// Identity of the node within its graph.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Current position.
	pub fn pos(&self) -> Vector {
		self.pos
	}

	/// Current velocity.
	pub fn vel(&self) -> Vector {
		self.vel
	}

	/// Acceleration computed by the last step.
	pub fn acel(&self) -> Vector {
		self.acel
	}

	/// Neighbours reachable through incident edges, in connection order.
	pub fn peers(&self) -> &[NodeId] {
		&self.peers
	}

	/// Whether integration is suspended for this node.
	pub fn is_pinned(&self) -> bool {
		self.pinned
	}

	/// Move the node, e.g. while it is being dragged.
	pub fn set_pos(&mut self, pos: Vector) {
		self.pos = pos;
	}

	/// Suspend or resume integration. A pinned node still takes part in
	/// force computation but neither moves nor keeps velocity.
	pub fn set_pinned(&mut self, pinned: bool) {
		self.pinned = pinned;
		if pinned {
			self.vel = Vector::ZERO;
		}
	}
}

/// Connection between two node instances.
///
/// Equality is over the whole triple, so two edges are duplicates only when
/// they join the very same instances with the same directedness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// Tail of the edge.
	pub start: NodeId,
	/// Head of the edge.
	pub end: NodeId,
	/// Whether only `start` sees `end` as a peer.
	pub is_directed: bool,
}

/// Owner of all nodes, edges and force parameters.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Every instance ever added. Replaced instances stay here so edges that
	/// still reference them remain valid.
	arena: Vec<Node>,
	/// Live instances in label first-insertion order.
	registry: Vec<NodeId>,
	/// Label to slot in `registry`.
	slots: HashMap<String, usize>,
	edges: Vec<Edge>,
	params: ForceParams,
}

impl Graph {
	/// An empty graph with default force parameters.
	pub fn new() -> Self {
		Self::default()
	}

	/// An empty graph with the given force parameters.
	pub fn with_params(params: ForceParams) -> Self {
		Self {
			params,
			..Self::default()
		}
	}

	/// Force parameters used by [`Graph::step`].
	pub fn params(&self) -> &ForceParams {
		&self.params
	}

	/// Mutable access to the force parameters.
	pub fn params_mut(&mut self) -> &mut ForceParams {
		&mut self.params
	}

	/// Register `node` under its label.
	///
	/// A label that is already present is overwritten in place: the old
	/// instance keeps its edges but leaves the registry and the simulation.
	pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
		if node.label.trim().is_empty() {
			return Err(GraphError::InvalidArgument(format!(
				"node label must not be empty (got {:?})",
				node.label
			)));
		}

		let id = NodeId(self.arena.len());
		match self.slots.get(&node.label) {
			Some(&slot) => {
				debug!(
					"replacing node `{}`: {} -> {}",
					node.label, self.registry[slot], id
				);
				self.registry[slot] = id;
			}
			None => {
				debug!("adding node `{}` as {}", node.label, id);
				self.slots.insert(node.label.clone(), self.registry.len());
				self.registry.push(id);
			}
		}
		self.arena.push(node);
		Ok(id)
	}

	/// Handle of the live node labelled `label`.
	pub fn node_id(&self, label: &str) -> Result<NodeId, GraphError> {
		self.slots
			.get(label)
			.map(|&slot| self.registry[slot])
			.ok_or_else(|| GraphError::NotFound(label.to_owned()))
	}

	/// The live node labelled `label`.
	pub fn get_node(&self, label: &str) -> Result<&Node, GraphError> {
		let id = self.node_id(label)?;
		Ok(&self.arena[id.0])
	}

	/// Mutable access to the live node labelled `label`.
	pub fn get_node_mut(&mut self, label: &str) -> Result<&mut Node, GraphError> {
		let id = self.node_id(label)?;
		Ok(&mut self.arena[id.0])
	}

	/// Any instance created by this graph, replaced ones included.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.arena.get(id.0)
	}

	/// Mutable access to any instance created by this graph.
	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.arena.get_mut(id.0)
	}

	/// Join the nodes labelled `a` and `b`.
	///
	/// Returns `Ok(false)` when an identical edge already exists; the edge list
	/// and peer lists are then left untouched. An undirected edge makes the
	/// endpoints peers of each other, a directed one only makes `b` a peer of `a`.
	pub fn connect_nodes(
		&mut self,
		a: &str,
		b: &str,
		is_directed: bool,
	) -> Result<bool, GraphError> {
		let start = self.node_id(a)?;
		let end = self.node_id(b)?;
		let edge = Edge {
			start,
			end,
			is_directed,
		};

		if self.edges.contains(&edge) {
			debug!("skipping duplicate edge {a} -> {b} (directed: {is_directed})");
			return Ok(false);
		}

		self.edges.push(edge);
		self.arena[start.0].peers.push(end);
		if !is_directed {
			self.arena[end.0].peers.push(start);
		}
		Ok(true)
	}

	/// Live nodes with their handles, in label insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
		self.registry.iter().map(|&id| (id, &self.arena[id.0]))
	}

	/// Handles of the live nodes, in label insertion order.
	pub fn node_ids(&self) -> &[NodeId] {
		&self.registry
	}

	/// All edges in connection order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Both endpoint instances of `edge`.
	pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
		Some((self.node(edge.start)?, self.node(edge.end)?))
	}

	/// Number of live nodes.
	pub fn node_count(&self) -> usize {
		self.registry.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True when no node has been added.
	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}

	/// Disjoint borrows for the simulation: every instance mutably, plus the
	/// live order, edges and parameters.
	pub(crate) fn split_mut(&mut self) -> (&mut [Node], &[NodeId], &[Edge], &ForceParams) {
		(&mut self.arena, &self.registry, &self.edges, &self.params)
	}
}
