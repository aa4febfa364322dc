use log::debug;

use crate::layout::{Graph, GraphError, Node};

#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub color: Option<String>,
	pub group: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub directed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Build a layout graph keyed by node id. Fails on the first link that
	/// names an unknown id.
	pub fn to_graph(&self) -> Result<Graph, GraphError> {
		let mut graph = Graph::new();
		for node in &self.nodes {
			graph.add_node(Node::new(node.id.as_str()))?;
		}
		for link in &self.links {
			graph.connect_nodes(&link.source, &link.target, link.directed)?;
		}
		debug!(
			"built graph with {} nodes and {} edges",
			graph.node_count(),
			graph.edge_count()
		);
		Ok(graph)
	}
}
