//! Per-frame draw pass over particles, ripples, connections and nodes.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::NetworkState;
use super::types::Topic;

/// Connection lines appear under this inter-node distance.
const CONNECT_DISTANCE: f64 = 200.0;

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_particles(state, ctx);
	draw_ripples(state, ctx);
	draw_connections(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_particles(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	for particle in &state.particles {
		let twinkle = (state.time * 2.0 + particle.x).sin() * 0.3 + 0.7;
		ctx.set_fill_style_str(&format!(
			"rgba(255, 255, 255, {})",
			particle.opacity * twinkle
		));
		ctx.begin_path();
		let _ = ctx.arc(particle.x, particle.y, particle.size, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_ripples(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	for ripple in &state.ripples {
		ctx.set_stroke_style_str(&format!("rgba(255, 215, 0, {})", ripple.opacity));
		ctx.set_line_width(3.0);
		ctx.begin_path();
		let _ = ctx.arc(ripple.x, ripple.y, ripple.radius, 0.0, 2.0 * PI);
		ctx.stroke();
	}
}

fn draw_connections(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	for (i, node) in state.nodes.iter().enumerate() {
		for (j, other) in state.nodes.iter().enumerate().skip(i + 1) {
			let (dx, dy) = (other.x - node.x, other.y - node.y);
			let distance = (dx * dx + dy * dy).sqrt();
			let same_topic = node.topic == other.topic;
			if distance >= CONNECT_DISTANCE && !same_topic {
				continue;
			}

			let opacity = (1.0 - distance / 280.0).max(0.0) * 0.5;
			let pulse = (state.time * 2.0 + (i + j) as f64).sin() * 0.2 + 0.8;
			let color = if same_topic {
				Topic::by_name(&node.topic).map(|t| t.color)
			} else {
				None
			};
			let (r, g, b) = color.unwrap_or((255, 255, 255));

			ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {})", opacity * pulse));
			ctx.set_line_width(2.0);
			ctx.set_shadow_blur(15.0);
			ctx.set_shadow_color(&format!("rgba(255, 215, 0, {})", opacity * 0.6));
			ctx.begin_path();
			ctx.move_to(node.x, node.y);
			ctx.line_to(other.x, other.y);
			ctx.stroke();
			ctx.set_shadow_blur(0.0);
		}
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	for (i, node) in state.nodes.iter().enumerate() {
		let topic = Topic::by_name(&node.topic);
		let pulse_scale = 1.0 + node.pulse.sin() * 0.15;
		let radius = node.radius * pulse_scale;

		// Glow halo behind topic anchors.
		if node.is_topic {
			let glow_radius = radius * 3.0;
			let (r, g, b) = topic.map(|t| t.color).unwrap_or((255, 215, 0));
			if let Ok(gradient) =
				ctx.create_radial_gradient(node.x, node.y, radius, node.x, node.y, glow_radius)
			{
				let _ = gradient.add_color_stop(0.0, &format!("rgba({r}, {g}, {b}, 0.8)"));
				let _ = gradient.add_color_stop(0.4, &format!("rgba({r}, {g}, {b}, 0.4)"));
				let _ = gradient.add_color_stop(1.0, &format!("rgba({r}, {g}, {b}, 0)"));
				ctx.begin_path();
				let _ = ctx.arc(node.x, node.y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		if node.is_topic {
			let (r, g, b) = topic.map(|t| t.color).unwrap_or((255, 215, 0));
			ctx.set_fill_style_str(&format!("rgb({r}, {g}, {b})"));
			ctx.set_shadow_blur(20.0);
			ctx.set_shadow_color(&format!("rgb({r}, {g}, {b})"));
		} else {
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
			ctx.set_shadow_blur(10.0);
			ctx.set_shadow_color("rgba(255, 255, 255, 0.8)");
		}
		ctx.fill();
		ctx.set_shadow_blur(0.0);

		if state.hovered == Some(i) {
			let (r, g, b) = topic.map(|t| t.color).unwrap_or((255, 215, 0));
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + 5.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgb({r}, {g}, {b})"));
			ctx.set_line_width(3.0);
			ctx.set_shadow_blur(20.0);
			ctx.set_shadow_color(&format!("rgb({r}, {g}, {b})"));
			ctx.stroke();
			ctx.set_shadow_blur(0.0);
		}

		if node.is_topic {
			ctx.set_font("bold 13px 'Inter', system-ui, sans-serif");
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			ctx.set_fill_style_str("rgba(255, 255, 255, 1)");
			ctx.set_shadow_blur(10.0);
			ctx.set_shadow_color("rgba(0, 0, 0, 0.9)");
			let _ = ctx.fill_text(&node.label, node.x, node.y + radius + 22.0);
			ctx.set_shadow_blur(0.0);
		}
	}
}
