//! Force-directed layout: initial placement and the per-frame simulation step.
//!
//! A step zeroes every acceleration, pulls stretched edges together with a
//! logarithmic spring, pushes node pairs apart with a capped inverse-square
//! force, draws everything weakly toward the surface center and finally
//! integrates with semi-implicit Euler plus velocity damping.

use std::f64::consts::TAU;

use log::trace;
use rand::Rng;

use super::graph::{Edge, Graph, Node};
use super::params::{CENTERING_COEFFICIENT, ForceParams, RepulsionMode, VELOCITY_DAMPING};
use super::vector::Vector;

/// Longest frame interval a driver should feed to [`Graph::step`], in seconds.
pub const MAX_FRAME_DT: f64 = 0.5;

/// Frame interval to simulate for a measured `dt`.
///
/// After a stall (a hidden tab, a debugger pause) the measured interval is
/// huge; integrating it in one go would fling nodes off the surface, so such
/// frames advance by zero instead.
pub fn clamp_frame_dt(dt: f64) -> f64 {
	if dt.is_finite() && (0.0..=MAX_FRAME_DT).contains(&dt) {
		dt
	} else {
		0.0
	}
}

impl Graph {
	/// Scatter every live node near the middle of a `width` x `height` surface.
	pub fn init(&mut self, width: f64, height: f64) {
		self.init_with(&mut rand::rng(), width, height);
	}

	/// [`Graph::init`] drawing from `rng`.
	///
	/// Each node lands uniformly in the centered sub-rectangle spanning 10% of
	/// the surface on each axis.
	pub fn init_with<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f64, height: f64) {
		let surface = Vector::new(width, height);
		let (arena, live, _, _) = self.split_mut();
		for &id in live {
			let seed = Vector::rand_with(rng);
			arena[id.index()].pos = (seed * 0.1).add_scalar(0.45).mul_elem(surface);
		}
	}

	/// Advance the layout by `dt` seconds on a `width` x `height` surface.
	pub fn step(&mut self, width: f64, height: f64, dt: f64) {
		self.step_with(&mut rand::rng(), width, height, dt);
	}

	/// [`Graph::step`] drawing from `rng` when coincident nodes need a
	/// direction to separate along.
	pub fn step_with<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		width: f64,
		height: f64,
		dt: f64,
	) {
		let center = Vector::new(width, height) / 2.0;
		let (arena, live, edges, params) = self.split_mut();
		trace!("step: {} nodes, {} edges, dt={dt:.4}", live.len(), edges.len());

		for node in arena.iter_mut() {
			node.acel = Vector::ZERO;
		}

		for edge in edges {
			apply_spring(arena, edge, params);
		}

		let positions: Vec<Vector> = live.iter().map(|id| arena[id.index()].pos).collect();
		for (i, &id) in live.iter().enumerate() {
			let node = &mut arena[id.index()];
			let base = node.acel;
			for (j, &other) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let force = repulsion(positions[i], other, params, rng);
				node.acel = match params.repulsion {
					RepulsionMode::Summed => node.acel - force,
					RepulsionMode::LastPairOnly => base - force,
				};
			}
		}

		for &id in live {
			let node = &mut arena[id.index()];
			apply_centering(node, center);
			integrate(node, dt);
		}
	}
}

/// Pull the endpoints of a stretched edge toward each other.
fn apply_spring(arena: &mut [Node], edge: &Edge, params: &ForceParams) {
	let (start, end) = (edge.start.index(), edge.end.index());
	let offset = arena[start].pos - arena[end].pos;
	let dist = offset.magnitude();
	if dist <= params.spring_length {
		return;
	}

	let force =
		offset.normalize() * (params.spring_constant * (dist - (params.spring_length - 1.0)).ln());
	arena[start].acel -= force;
	arena[end].acel += force;
}

/// Force pointing from `subject` toward `other`; the caller subtracts it.
fn repulsion<R: Rng + ?Sized>(
	subject: Vector,
	other: Vector,
	params: &ForceParams,
	rng: &mut R,
) -> Vector {
	let offset = other - subject;
	let dist = offset.magnitude();
	if dist == 0.0 {
		let angle = rng.random_range(0.0..TAU);
		return Vector::new(angle.cos(), angle.sin()) * params.max_repulsive_force;
	}

	let magnitude = (params.repulsive_constant / (dist * dist)).min(params.max_repulsive_force);
	offset.normalize() * magnitude
}

fn apply_centering(node: &mut Node, center: Vector) {
	let offset = center - node.pos;
	let dist = offset.magnitude();
	if dist == 0.0 {
		return;
	}
	node.acel += offset.normalize() * (CENTERING_COEFFICIENT * dist * dist);
}

/// Semi-implicit Euler: position from the old velocity, then velocity from
/// the new acceleration, then damping.
fn integrate(node: &mut Node, dt: f64) {
	if node.pinned {
		node.vel = Vector::ZERO;
		return;
	}
	node.pos += node.vel * dt;
	node.vel += node.acel * dt;
	node.vel = node.vel * VELOCITY_DAMPING;
}

#[cfg(test)]
mod tests {
	use super::*;
	use float_cmp::{approx_eq, assert_approx_eq};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn rng() -> StdRng {
		StdRng::seed_from_u64(0x5eed)
	}

	fn graph_at(params: ForceParams, nodes: &[(&str, f64, f64)]) -> Graph {
		let mut graph = Graph::with_params(params);
		for &(label, x, y) in nodes {
			graph.add_node(Node::at(label, Vector::new(x, y))).unwrap();
		}
		graph
	}

	fn no_repulsion() -> ForceParams {
		ForceParams::default().with_repulsive_constant(0.0)
	}

	fn center_dist(graph: &Graph, label: &str) -> f64 {
		(graph.get_node(label).unwrap().pos() - Vector::new(W / 2.0, H / 2.0)).magnitude()
	}

	#[test]
	fn init_places_nodes_in_central_region() {
		let mut graph = Graph::new();
		for label in ["A", "B", "C"] {
			graph.add_node(Node::new(label)).unwrap();
		}
		graph.connect_nodes("A", "B", false).unwrap();
		graph.connect_nodes("B", "C", true).unwrap();

		graph.init_with(&mut rng(), W, H);
		for (_, node) in graph.nodes() {
			let pos = node.pos();
			assert!((360.0..440.0).contains(&pos.x), "x out of range: {pos:?}");
			assert!((270.0..330.0).contains(&pos.y), "y out of range: {pos:?}");
		}

		graph.step_with(&mut rng(), W, H, 0.016);
		for (_, node) in graph.nodes() {
			assert!(node.vel().is_finite(), "{} diverged", node.label());
			assert_ne!(node.vel(), Vector::ZERO, "{} did not move", node.label());
		}
	}

	#[test]
	fn init_with_thread_rng_stays_in_region() {
		let mut graph = Graph::new();
		graph.add_node(Node::new("A")).unwrap();
		graph.init(W, H);
		let pos = graph.get_node("A").unwrap().pos();
		assert!((360.0..440.0).contains(&pos.x));
		assert!((270.0..330.0).contains(&pos.y));
	}

	#[test]
	fn edge_at_rest_length_stays_bounded() {
		let mut graph = graph_at(
			ForceParams::default(),
			&[("A", 385.0, 300.0), ("B", 415.0, 300.0)],
		);
		graph.connect_nodes("A", "B", false).unwrap();

		let starts: Vec<Vector> = graph.nodes().map(|(_, n)| n.pos()).collect();
		graph.step_with(&mut rng(), W, H, 0.016);
		for ((_, node), start) in graph.nodes().zip(&starts) {
			let moved = (node.pos() - *start).magnitude();
			assert!(moved < 1.0, "first step moved {} by {moved}", node.label());
		}

		for _ in 0..10 {
			graph.step_with(&mut rng(), W, H, 0.016);
		}
		for ((_, node), start) in graph.nodes().zip(&starts) {
			assert!(node.pos().is_finite());
			assert!((node.pos() - *start).magnitude() < 10.0);
		}
	}

	#[test]
	fn stretched_edge_pulls_endpoints_together() {
		let mut graph = graph_at(no_repulsion(), &[("A", 300.0, 300.0), ("B", 500.0, 300.0)]);
		graph.connect_nodes("A", "B", true).unwrap();
		graph.step_with(&mut rng(), W, H, 0.016);

		let spring = 100.0 * (200.0_f64 - 29.0).ln();
		let centering = 1e-3 * 100.0 * 100.0;
		let a = graph.get_node("A").unwrap().acel();
		let b = graph.get_node("B").unwrap().acel();
		assert_approx_eq!(f64, a.x, spring + centering, epsilon = 1e-9);
		assert_approx_eq!(f64, b.x, -(spring + centering), epsilon = 1e-9);
		assert_approx_eq!(f64, a.y, 0.0);
	}

	#[test]
	fn compressed_edge_exerts_nothing() {
		let mut graph = graph_at(no_repulsion(), &[("A", 395.0, 300.0), ("B", 405.0, 300.0)]);
		graph.connect_nodes("A", "B", false).unwrap();
		graph.step_with(&mut rng(), W, H, 0.016);

		// only the centering pull remains
		let a = graph.get_node("A").unwrap().acel();
		assert_approx_eq!(f64, a.x, 1e-3 * 25.0, epsilon = 1e-12);
	}

	#[test]
	fn repulsion_sums_over_all_other_nodes() {
		let nodes = [("A", 400.0, 300.0), ("B", 410.0, 300.0), ("C", 400.0, 320.0)];
		let mut graph = graph_at(ForceParams::default(), &nodes);
		graph.step_with(&mut rng(), W, H, 0.016);

		let a = graph.get_node("A").unwrap().acel();
		assert_approx_eq!(f64, a.x, -1000.0, epsilon = 1e-9);
		assert_approx_eq!(f64, a.y, -250.0, epsilon = 1e-9);
	}

	#[test]
	fn last_pair_mode_keeps_only_final_neighbour() {
		let nodes = [("A", 400.0, 300.0), ("B", 410.0, 300.0), ("C", 400.0, 320.0)];
		let params = ForceParams::default().with_repulsion(RepulsionMode::LastPairOnly);
		let mut graph = graph_at(params, &nodes);
		graph.step_with(&mut rng(), W, H, 0.016);

		let a = graph.get_node("A").unwrap().acel();
		assert_approx_eq!(f64, a.x, 0.0, epsilon = 1e-9);
		assert_approx_eq!(f64, a.y, -250.0, epsilon = 1e-9);
	}

	#[test]
	fn last_pair_mode_keeps_spring_contribution() {
		let nodes = [("A", 400.0, 300.0), ("B", 400.0, 400.0), ("C", 400.0, 200.0)];
		let params = ForceParams::default()
			.with_repulsion(RepulsionMode::LastPairOnly)
			.with_repulsive_constant(0.0);
		let mut graph = graph_at(params, &nodes);
		graph.connect_nodes("A", "B", false).unwrap();
		graph.step_with(&mut rng(), W, H, 0.016);

		let a = graph.get_node("A").unwrap().acel();
		assert_approx_eq!(f64, a.y, 100.0 * (100.0_f64 - 29.0).ln(), epsilon = 1e-9);
	}

	#[test]
	fn near_coincident_repulsion_is_capped() {
		let mut graph = graph_at(
			ForceParams::default(),
			&[("A", 400.0, 300.0), ("B", 401.0, 300.0)],
		);
		graph.step_with(&mut rng(), W, H, 0.016);

		let a = graph.get_node("A").unwrap().acel();
		assert_approx_eq!(f64, a.x, -1e4, epsilon = 1e-6);
	}

	#[test]
	fn coincident_nodes_separate_without_nan() {
		let mut graph = graph_at(
			ForceParams::default(),
			&[("A", 400.0, 300.0), ("B", 400.0, 300.0)],
		);
		graph.step_with(&mut rng(), W, H, 0.016);

		for (_, node) in graph.nodes() {
			assert!(node.acel().is_finite());
			assert!(node.vel().is_finite());
			assert!(approx_eq!(f64, node.acel().magnitude(), 1e4, epsilon = 1e-6));
		}

		graph.step_with(&mut rng(), W, H, 0.016);
		let a = graph.get_node("A").unwrap().pos();
		let b = graph.get_node("B").unwrap().pos();
		assert!((a - b).magnitude() > 0.0);
	}

	#[test]
	fn centered_node_feels_no_pull() {
		let mut graph = graph_at(ForceParams::default(), &[("A", 400.0, 300.0)]);
		graph.step_with(&mut rng(), W, H, 0.016);

		let node = graph.get_node("A").unwrap();
		assert_eq!(node.acel(), Vector::ZERO);
		assert_eq!(node.vel(), Vector::ZERO);
		assert_eq!(node.pos(), Vector::new(400.0, 300.0));
	}

	#[test]
	fn isolated_node_drifts_toward_center() {
		let mut graph = Graph::new();
		graph.add_node(Node::new("A")).unwrap();
		graph.init_with(&mut rng(), W, H);

		let initial = center_dist(&graph, "A");
		for _ in 0..100 {
			graph.step_with(&mut rng(), W, H, 0.05);
		}
		let last = center_dist(&graph, "A");
		assert!(last < initial, "{last} >= {initial}");
	}

	#[test]
	fn far_isolated_node_converges() {
		let mut graph = graph_at(ForceParams::default(), &[("A", 100.0, 100.0)]);
		let initial = center_dist(&graph, "A");
		for _ in 0..100 {
			graph.step(W, H, 0.05);
		}
		let last = center_dist(&graph, "A");
		assert!(graph.get_node("A").unwrap().pos().is_finite());
		assert!(last < initial / 2.0, "{last} vs {initial}");
	}

	#[test]
	fn integration_uses_previous_velocity_for_position() {
		let mut graph = graph_at(no_repulsion(), &[("A", 400.0, 300.0)]);
		graph.get_node_mut("A").unwrap().vel = Vector::new(10.0, 0.0);
		graph.step_with(&mut rng(), W, H, 0.1);

		let node = graph.get_node("A").unwrap();
		assert_approx_eq!(f64, node.pos().x, 401.0);
		assert_approx_eq!(f64, node.vel().x, 10.0 * VELOCITY_DAMPING);
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut graph = graph_at(
			ForceParams::default(),
			&[("A", 380.0, 300.0), ("B", 420.0, 300.0)],
		);
		graph.get_node_mut("A").unwrap().set_pinned(true);
		for _ in 0..5 {
			graph.step_with(&mut rng(), W, H, 0.016);
		}
		assert_eq!(graph.get_node("A").unwrap().pos(), Vector::new(380.0, 300.0));
		assert_ne!(graph.get_node("B").unwrap().pos(), Vector::new(420.0, 300.0));
	}

	#[test]
	fn orphaned_endpoint_does_not_destabilise_step() {
		let mut graph = graph_at(
			ForceParams::default(),
			&[("A", 350.0, 300.0), ("B", 450.0, 300.0)],
		);
		graph.connect_nodes("A", "B", false).unwrap();
		graph.add_node(Node::at("A", Vector::new(390.0, 280.0))).unwrap();

		for _ in 0..20 {
			graph.step_with(&mut rng(), W, H, 0.016);
		}
		for (_, node) in graph.nodes() {
			assert!(node.pos().is_finite());
		}
	}

	#[test]
	fn empty_graph_steps_cleanly() {
		let mut graph = Graph::new();
		graph.init(W, H);
		graph.step(W, H, 0.016);
		assert!(graph.is_empty());
	}

	#[test]
	fn frame_dt_clamping() {
		assert_eq!(clamp_frame_dt(0.016), 0.016);
		assert_eq!(clamp_frame_dt(0.5), 0.5);
		assert_eq!(clamp_frame_dt(0.51), 0.0);
		assert_eq!(clamp_frame_dt(-0.1), 0.0);
		assert_eq!(clamp_frame_dt(f64::NAN), 0.0);
	}
}
