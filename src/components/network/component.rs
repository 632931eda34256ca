use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::NetworkState;
use super::types::{NodeHit, Topic};

/// Fixed simulation timestep, matched to the frame callback cadence.
const TICK_DT: f64 = 0.016;

/// Tooltip payload for the hovered node.
#[derive(Clone, Debug, PartialEq)]
struct TooltipInfo {
	label: String,
	symbol: &'static str,
	is_topic: bool,
	color: (u8, u8, u8),
	data_points: Vec<u32>,
	x: f64,
	y: f64,
}

/// Full-viewport canvas running the particle/node simulation.
///
/// Owns a [`NetworkState`] behind `Rc<RefCell<...>>`: the animation-frame
/// closure ticks and renders it, mouse handlers mutate it between frames.
/// Writing a node label into `spread_request` (done by the search panel)
/// spreads the matching node as if it had been clicked.
#[component]
pub fn NetworkCanvas(
	#[prop(into)] on_node_click: Callback<NodeHit>,
	spread_request: RwSignal<Option<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tooltip: RwSignal<Option<TooltipInfo>> = RwSignal::new(None);
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
		*state_init.borrow_mut() = Some(NetworkState::new(w, h, rng));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(TICK_DT);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Search results relay a node label here instead of a pointer event.
	let state_spread = state.clone();
	Effect::new(move |_| {
		let Some(title) = spread_request.get() else {
			return;
		};
		if let Some(ref mut s) = *state_spread.borrow_mut() {
			let target = s.nodes.iter().position(|node| {
				node.label == title || title.contains(&node.topic)
			});
			match target {
				Some(idx) => {
					s.spread(idx);
				}
				None => {
					// No matching node: acknowledge the click with a ripple
					// at the last pointer position.
					let (x, y) = s.pointer.unwrap_or((s.width / 2.0, s.height / 2.0));
					s.spawn_ripple(x, y, 50.0, 200.0);
				}
			}
		}
		spread_request.set(None);
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.set_pointer(x, y);
			let info = s.hovered.map(|idx| {
				let node = &s.nodes[idx];
				TooltipInfo {
					label: node.label.clone(),
					symbol: node.symbol,
					is_topic: node.is_topic,
					color: Topic::by_name(&node.topic)
						.map(|t| t.color)
						.unwrap_or((255, 215, 0)),
					data_points: node.data_points.clone(),
					x,
					y,
				}
			});
			if tooltip.get_untracked() != info {
				tooltip.set(info);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.clear_pointer();
		}
		tooltip.set(None);
	};

	let state_click = state.clone();
	let on_click = move |_: MouseEvent| {
		let hit = {
			let mut borrow = state_click.borrow_mut();
			let Some(ref mut s) = *borrow else {
				return;
			};
			s.hovered.map(|idx| s.spread(idx))
		};
		if let Some(hit) = hit {
			on_node_click.run(hit);
		}
	};

	view! {
		<div class="network-layer">
			<canvas
				node_ref=canvas_ref
				class="network-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
			/>
			{move || {
				tooltip.get().map(|info| {
					let (r, g, b) = info.color;
					view! {
						<div
							class="node-tooltip"
							style=format!(
								"left: {}px; top: {}px; border-color: rgb({r}, {g}, {b});",
								info.x + 20.0,
								info.y - 100.0,
							)
						>
							<div class="node-tooltip-title">
								<span class="node-tooltip-symbol">{info.symbol}</span>
								{info.label.clone()}
							</div>
							<div class="node-tooltip-kind">
								{if info.is_topic {
									"Topic • Click to spread child nodes"
								} else {
									"Research Paper • Click to explore"
								}}
							</div>
							<div class="node-tooltip-data">
								<span>"Data Points:"</span>
								{info.data_points
									.iter()
									.map(|point| view! { <span class="data-chip">{*point}</span> })
									.collect_view()}
							</div>
						</div>
					}
				})
			}}
		</div>
	}
}
