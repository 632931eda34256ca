//! Static research-output bar chart shown beside the document summary.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const CHART_WIDTH: f64 = 560.0;
const CHART_HEIGHT: f64 = 280.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 32.0;
const MARGIN_RIGHT: f64 = 16.0;

const TITLE: &str = "Research Output & Impact Analysis";
const LABELS: &[&str] = &["Q1 2023", "Q2 2023", "Q3 2023", "Q4 2023", "Q1 2024", "Q2 2024"];

struct Series {
	label: &'static str,
	color: (u8, u8, u8),
	values: [f64; 6],
}

const SERIES: &[Series] = &[
	Series {
		label: "Research Publications",
		color: (59, 130, 246),
		values: [45.0, 52.0, 48.0, 65.0, 72.0, 88.0],
	},
	Series {
		label: "Citations Received",
		color: (139, 92, 246),
		values: [120.0, 145.0, 130.0, 180.0, 210.0, 250.0],
	},
];

/// Round the axis ceiling up to the next multiple of 50.
fn axis_max(series: &[Series]) -> f64 {
	let max = series
		.iter()
		.flat_map(|s| s.values.iter())
		.fold(0.0f64, |acc, &v| acc.max(v));
	((max / 50.0).ceil() * 50.0).max(50.0)
}

fn draw(ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, CHART_WIDTH, CHART_HEIGHT);
	let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
	let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
	let max = axis_max(SERIES);

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
	ctx.set_font("bold 13px system-ui, sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(TITLE, CHART_WIDTH / 2.0, 14.0);

	// Horizontal gridlines every 50 units, labelled on the left.
	ctx.set_font("10px system-ui, sans-serif");
	let steps = (max / 50.0) as usize;
	for step in 0..=steps {
		let value = step as f64 * 50.0;
		let y = MARGIN_TOP + plot_h * (1.0 - value / max);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.1)");
		ctx.set_line_width(1.0);
		ctx.begin_path();
		ctx.move_to(MARGIN_LEFT, y);
		ctx.line_to(CHART_WIDTH - MARGIN_RIGHT, y);
		ctx.stroke();
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
		ctx.set_text_align("right");
		let _ = ctx.fill_text(&format!("{value}"), MARGIN_LEFT - 6.0, y);
	}

	// Grouped bars per quarter.
	let group_w = plot_w / LABELS.len() as f64;
	let bar_w = group_w * 0.7 / SERIES.len() as f64;
	for (gi, label) in LABELS.iter().enumerate() {
		let group_x = MARGIN_LEFT + group_w * gi as f64 + group_w * 0.15;
		for (si, series) in SERIES.iter().enumerate() {
			let value = series.values[gi];
			let h = plot_h * value / max;
			let (r, g, b) = series.color;
			ctx.set_fill_style_str(&format!("rgba({r}, {g}, {b}, 0.6)"));
			ctx.fill_rect(
				group_x + bar_w * si as f64,
				MARGIN_TOP + plot_h - h,
				bar_w - 2.0,
				h,
			);
			ctx.set_stroke_style_str(&format!("rgb({r}, {g}, {b})"));
			ctx.set_line_width(1.0);
			ctx.stroke_rect(
				group_x + bar_w * si as f64,
				MARGIN_TOP + plot_h - h,
				bar_w - 2.0,
				h,
			);
		}
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(
			label,
			group_x + group_w * 0.35,
			CHART_HEIGHT - MARGIN_BOTTOM / 2.0,
		);
	}

	// Legend above the plot.
	let mut legend_x = MARGIN_LEFT;
	for series in SERIES {
		let (r, g, b) = series.color;
		ctx.set_fill_style_str(&format!("rgb({r}, {g}, {b})"));
		ctx.fill_rect(legend_x, 26.0, 10.0, 10.0);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		ctx.set_text_align("left");
		let _ = ctx.fill_text(series.label, legend_x + 14.0, 31.0);
		legend_x += 160.0;
	}
}

/// Canvas bar chart of the fixed quarterly research-output data.
#[component]
pub fn ResearchChart() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(CHART_WIDTH as u32);
		canvas.set_height(CHART_HEIGHT as u32);
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		draw(&ctx);
	});

	view! { <canvas node_ref=canvas_ref class="research-chart" /> }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn axis_ceiling_rounds_up_to_fifty() {
		assert_eq!(axis_max(SERIES), 250.0);

		let small = [Series {
			label: "s",
			color: (0, 0, 0),
			values: [1.0, 2.0, 3.0, 4.0, 5.0, 88.0],
		}];
		assert_eq!(axis_max(&small), 100.0);

		let empty: [Series; 0] = [];
		assert_eq!(axis_max(&empty), 50.0);
	}

	#[test]
	fn datasets_match_the_quarter_labels() {
		for series in SERIES {
			assert_eq!(series.values.len(), LABELS.len());
		}
	}
}
