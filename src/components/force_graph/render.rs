use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::layout::Vector;

use super::state::{ForceGraphState, NODE_RADIUS};

const DEFAULT_COLOR: &str = "#1f77b4";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for edge in state.graph.edges() {
		let Some((n1, n2)) = state.graph.endpoints(edge) else {
			continue;
		};
		let delta = n2.pos() - n1.pos();
		let dist = delta.magnitude();
		if dist < 0.001 {
			continue;
		}

		let is_highlighted = state.is_highlighted(edge.start) && state.is_highlighted(edge.end);

		// Base values when no highlight active
		// When highlighting: highlighted edges brighten, others dim
		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let dir = delta / dist;
		let head = if edge.is_directed { arrow_size } else { 0.0 };
		let from = n1.pos() + dir * NODE_RADIUS;
		let to = n2.pos() - dir * (NODE_RADIUS + head);
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		if !edge.is_directed {
			continue;
		}
		ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", arrow_alpha));
		let tip = n2.pos() - dir * NODE_RADIUS;
		let back = tip - dir * arrow_size;
		let wing = Vector::new(-dir.y, dir.x) * (arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip.x, tip.y);
		ctx.line_to(back.x + wing.x, back.y + wing.y);
		ctx.line_to(back.x - wing.x, back.y - wing.y);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));

	for (id, node) in state.graph.nodes() {
		if has_highlight && state.is_highlighted(id) {
			continue;
		}
		let (x, y) = (node.pos().x, node.pos().y);
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));
		let info = state.info.get(&id);

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.map_or(DEFAULT_COLOR, |i| i.color.as_str()));
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if let Some(label) = info.and_then(|i| i.label.as_deref()) {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
			ctx.set_font(&font);
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	}

	if !has_highlight {
		return;
	}

	// highlighted nodes go on top
	for (id, node) in state.graph.nodes() {
		if !state.is_highlighted(id) {
			continue;
		}
		let (x, y) = (node.pos().x, node.pos().y);
		let info = state.info.get(&id);
		let is_hovered = state.is_hovered(id);
		let is_neighbor =
			state.hover.neighbors.contains(&id) || state.hover.prev_neighbors.contains(&id);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
			draw_glow(ctx, x, y, radius * 0.3, glow_radius, alpha);
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.map_or(DEFAULT_COLOR, |i| i.color.as_str()));
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if let Some(label) = info.and_then(|i| i.label.as_deref()) {
			ctx.set_fill_style_str("white");
			ctx.set_font(&font);
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	}
}

fn draw_glow(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	inner: f64,
	outer: f64,
	alpha: f64,
) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, inner, x, y, outer) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
	let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(x, y, outer, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
