use std::collections::{HashMap, HashSet};

use log::warn;

use crate::layout::{Graph, GraphError, NodeId, Vector, clamp_frame_dt};

use super::types::GraphData;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Vector,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub neighbors: HashSet<NodeId>,
	pub highlight_t: f64,
	pub prev_node: Option<NodeId>,
	pub prev_neighbors: HashSet<NodeId>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: Graph,
	pub info: HashMap<NodeId, NodeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Result<Self, GraphError> {
		let mut graph = data.to_graph()?;
		graph.init(width, height);

		let mut info = HashMap::with_capacity(data.nodes.len());
		for node in &data.nodes {
			let color = node.color.clone().unwrap_or_else(|| {
				node.group
					.map(|g| COLORS[g as usize % COLORS.len()].into())
					.unwrap_or(COLORS[0].into())
			});
			info.insert(
				graph.node_id(&node.id)?,
				NodeInfo {
					label: node.label.clone(),
					color,
				},
			);
		}

		Ok(Self {
			graph,
			info,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		})
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let cursor = Vector::new(gx, gy);
		// HIT_RADIUS is in world-space, scales with zoom like nodes
		self.graph
			.nodes()
			.filter(|(_, node)| (node.pos() - cursor).magnitude() < HIT_RADIUS)
			.map(|(id, _)| id)
			.last()
	}

	pub fn start_drag(&mut self, id: NodeId, sx: f64, sy: f64) {
		let Some(node) = self.graph.node_mut(id) else {
			return;
		};
		node.set_pinned(true);
		self.drag = DragState {
			active: true,
			node: Some(id),
			start_x: sx,
			start_y: sy,
			node_start: node.pos(),
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(id) = self.drag.node.filter(|_| self.drag.active) else {
			return;
		};
		let offset = Vector::new(sx - self.drag.start_x, sy - self.drag.start_y) / self.transform.k;
		let target = self.drag.node_start + offset;
		if let Some(node) = self.graph.node_mut(id) {
			node.set_pos(target);
		}
	}

	/// Dropped nodes stay pinned where the user left them.
	pub fn end_drag(&mut self) {
		self.drag.active = false;
		self.drag.node = None;
		self.pan.active = false;
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(id) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in self.graph.edges() {
				if edge.start == id {
					self.hover.neighbors.insert(edge.end);
				} else if edge.end == id {
					self.hover.neighbors.insert(edge.start);
				}
			}
		}
	}

	pub fn is_highlighted(&self, id: NodeId) -> bool {
		self.hover.node == Some(id)
			|| self.hover.neighbors.contains(&id)
			|| self.hover.prev_node == Some(id)
			|| self.hover.prev_neighbors.contains(&id)
	}

	pub fn is_hovered(&self, id: NodeId) -> bool {
		self.hover.node == Some(id) || self.hover.prev_node == Some(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, elapsed: f64) {
		let dt = clamp_frame_dt(elapsed);
		if dt == 0.0 && elapsed > 0.0 {
			warn!("frame stalled for {elapsed:.2}s, holding layout");
		}
		if self.animation_running {
			self.graph.step(self.width, self.height, dt);
		}
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
