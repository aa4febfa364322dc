use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};

/// Generate a sample random tree; every third link is directed.
fn generate_sample_data(n: usize) -> GraphData {
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| GraphNode {
			id: i.to_string(),
			label: if i < 10 {
				Some(format!("Node {}", i))
			} else {
				None
			},
			color: None,
			group: Some((i % 10) as u32),
		})
		.collect();

	let links: Vec<GraphLink> = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			GraphLink {
				source: i.to_string(),
				target: target.to_string(),
				directed: i % 3 == 0,
			}
		})
		.collect();

	GraphData { nodes, links }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Full-window demo graph with a short usage hint on top.
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(move || generate_sample_data(60));
	let summary = move || {
		let data = graph_data.get();
		format!("{} nodes, {} links", data.nodes.len(), data.links.len())
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Spring Layout"</h1>
				<p class="subtitle">{summary}</p>
				<p class="subtitle">"Drag nodes to pin them. Scroll to zoom. Drag background to pan."</p>
			</div>
		</div>
	}
}
