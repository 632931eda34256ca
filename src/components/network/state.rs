//! Simulation state for the cosmic network: layout, spread and the
//! fixed-timestep integrator. All mutable animation state lives here and is
//! only touched between frames; rendering is a pure read in `render.rs`.

use rand::Rng;
use rand::rngs::SmallRng;

use super::patterns;
use super::types::{COSMIC_SYMBOLS, Node, NodeHit, Particle, Ripple, SAFE_AREA, TOPICS};

/// Fixed node-set size per session.
pub const NODE_COUNT: usize = 10;
/// The first nodes are topic anchors, one per topic.
pub const TOPIC_NODE_COUNT: usize = 4;
/// Background dot count.
pub const PARTICLE_COUNT: usize = 80;

/// Minimum clearance between node circles at layout time.
const NODE_SPACING: f64 = 20.0;
/// Rejection-sampling budget before overlap is tolerated.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;
/// Pointer repulsion reach.
const POINTER_RADIUS: f64 = 150.0;
/// Spring constant pulling nodes back to their base position.
const SPRING_BACK: f64 = 0.03;
/// Per-tick velocity damping.
const DAMPING: f64 = 0.9;
/// Extra hit-test slop around a node's radius.
const HIT_SLOP: f64 = 10.0;

/// Owns every entity of the visualization and advances them on a fixed
/// timestep. UI event handlers and the frame callback share it through a
/// single `Rc<RefCell<...>>`, so no frame ever observes a half-applied
/// mutation.
pub struct NetworkState {
	pub nodes: Vec<Node>,
	pub particles: Vec<Particle>,
	pub ripples: Vec<Ripple>,
	/// Index of the hovered node, if any.
	pub hovered: Option<usize>,
	/// Last known pointer position in canvas coordinates.
	pub pointer: Option<(f64, f64)>,
	pub width: f64,
	pub height: f64,
	/// Monotonic time accumulator driving twinkle and pulse phases.
	pub time: f64,
	rng: SmallRng,
}

impl NetworkState {
	/// Seed particles and lay out the fixed node set.
	pub fn new(width: f64, height: f64, mut rng: SmallRng) -> Self {
		let particles = (0..PARTICLE_COUNT)
			.map(|_| Particle {
				x: rng.r#gen::<f64>() * width,
				y: rng.r#gen::<f64>() * height,
				vx: (rng.r#gen::<f64>() - 0.5) * 0.2,
				vy: (rng.r#gen::<f64>() - 0.5) * 0.2,
				size: rng.r#gen::<f64>() * 1.5 + 0.5,
				opacity: rng.r#gen::<f64>() * 0.3 + 0.2,
			})
			.collect();

		let mut nodes: Vec<Node> = Vec::with_capacity(NODE_COUNT);
		for i in 0..NODE_COUNT {
			let topic = &TOPICS[i % TOPICS.len()];
			let is_topic = i < TOPIC_NODE_COUNT;
			let radius = if is_topic {
				16.0
			} else {
				8.0 + rng.r#gen::<f64>() * 4.0
			};
			let (x, y) = find_valid_position(&mut rng, width, height, radius, &nodes);
			let data_count = rng.gen_range(3..=5);

			nodes.push(Node {
				id: format!("node-{i}"),
				x,
				y,
				base_x: x,
				base_y: y,
				vx: (rng.r#gen::<f64>() - 0.5) * 0.1,
				vy: (rng.r#gen::<f64>() - 0.5) * 0.1,
				label: if is_topic {
					topic.name.to_string()
				} else {
					format!("{} Data {}", topic.name, i + 1)
				},
				topic: topic.name.to_string(),
				radius,
				is_topic,
				pulse: rng.r#gen::<f64>() * std::f64::consts::TAU,
				symbol: COSMIC_SYMBOLS[i % COSMIC_SYMBOLS.len()],
				data_points: (0..data_count).map(|_| rng.gen_range(0..100)).collect(),
			});
		}

		Self {
			nodes,
			particles,
			ripples: Vec::new(),
			hovered: None,
			pointer: None,
			width,
			height,
			time: 0.0,
			rng,
		}
	}

	/// Index of the topmost node whose hit circle contains the point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes.iter().position(|node| {
			let (dx, dy) = (x - node.x, y - node.y);
			(dx * dx + dy * dy).sqrt() < node.radius + HIT_SLOP
		})
	}

	/// Record the pointer position and refresh the hovered node.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
		self.hovered = self.node_at(x, y);
	}

	/// Drop pointer-derived state when the cursor leaves the canvas.
	pub fn clear_pointer(&mut self) {
		self.pointer = None;
		self.hovered = None;
	}

	/// Spawn an expanding ring, e.g. as click feedback.
	pub fn spawn_ripple(&mut self, x: f64, y: f64, radius: f64, max_radius: f64) {
		self.ripples.push(Ripple {
			x,
			y,
			radius,
			max_radius,
			opacity: 1.0,
		});
	}

	/// Redistribute the clicked node's related nodes into a constellation
	/// and seed velocities so the spring integrator animates the move.
	///
	/// Topic node: affects its non-topic children. File node: affects every
	/// other node of the same topic. A node with no relatives still ripples.
	/// Returns a snapshot for the click-notification callback.
	pub fn spread(&mut self, clicked: usize) -> NodeHit {
		let (cx, cy, cr) = {
			let node = &self.nodes[clicked];
			(node.x, node.y, node.radius)
		};
		let hit = NodeHit::of(&self.nodes[clicked]);

		let affected: Vec<usize> = self
			.nodes
			.iter()
			.enumerate()
			.filter(|(i, node)| {
				node.topic == hit.topic
					&& if hit.is_topic {
						!node.is_topic
					} else {
						*i != clicked
					}
			})
			.map(|(i, _)| i)
			.collect();

		if !affected.is_empty() {
			let pattern = patterns::pick(&mut self.rng);
			let (per_node, lo, hi, kick) = if hit.is_topic {
				(35.0, 120.0, 250.0, 0.04)
			} else {
				(30.0, 100.0, 200.0, 0.05)
			};
			let scale = (affected.len() as f64 * per_node).clamp(lo, hi);
			log::debug!(
				"spreading {} nodes of {} in {} pattern",
				affected.len(),
				hit.topic,
				pattern.name
			);

			for (slot, &i) in affected.iter().enumerate() {
				let (px, py) = pattern.offsets[slot % pattern.offsets.len()];
				let (bx, by) = SAFE_AREA.clamp(
					cx + px * scale / 100.0,
					cy + py * scale / 100.0,
					self.width,
					self.height,
				);
				let jitter = 0.8 + self.rng.r#gen::<f64>() * 0.4;
				let node = &mut self.nodes[i];
				node.base_x = bx;
				node.base_y = by;
				node.vx = (bx - node.x) * kick * jitter;
				node.vy = (by - node.y) * kick * jitter;
			}
		}

		self.spawn_ripple(cx, cy, cr, 200.0);
		hit
	}

	/// Advance the simulation by one fixed timestep.
	pub fn tick(&mut self, dt: f64) {
		self.time += dt;

		for particle in &mut self.particles {
			particle.x += particle.vx;
			particle.y += particle.vy;
			if particle.x < 0.0 {
				particle.x = self.width;
			}
			if particle.x > self.width {
				particle.x = 0.0;
			}
			if particle.y < 0.0 {
				particle.y = self.height;
			}
			if particle.y > self.height {
				particle.y = 0.0;
			}
		}

		for ripple in &mut self.ripples {
			ripple.radius = (ripple.radius + 3.0).min(ripple.max_radius);
			ripple.opacity -= 0.02;
		}
		self.ripples.retain(|ripple| ripple.opacity > 0.0);

		for node in &mut self.nodes {
			node.pulse += 0.05;
			if node.is_topic {
				// Topic anchors stay put; their children orbit around them.
				continue;
			}

			if let Some((mx, my)) = self.pointer {
				let (dx, dy) = (mx - node.x, my - node.y);
				let distance = (dx * dx + dy * dy).sqrt();
				if distance > 0.0 && distance < POINTER_RADIUS {
					let force = (POINTER_RADIUS - distance) / 2000.0;
					node.vx -= dx / distance * force;
					node.vy -= dy / distance * force;
				}
			}

			node.x += node.vx;
			node.y += node.vy;

			node.vx += (node.base_x - node.x) * SPRING_BACK;
			node.vy += (node.base_y - node.y) * SPRING_BACK;
			node.vx *= DAMPING;
			node.vy *= DAMPING;

			let margin = node.radius;
			if node.x < margin {
				node.x = margin;
				node.vx *= -0.5;
			}
			if node.x > self.width - margin {
				node.x = self.width - margin;
				node.vx *= -0.5;
			}
			if node.y < margin {
				node.y = margin;
				node.vy *= -0.5;
			}
			if node.y > self.height - margin {
				node.y = self.height - margin;
				node.vy *= -0.5;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Rejection-sample a position inside the safe rectangle that keeps the
/// node's circle clear of every placed node. After the attempt budget the
/// last sample is accepted unconditionally; overlap is tolerated rather
/// than an error.
fn find_valid_position(
	rng: &mut SmallRng,
	width: f64,
	height: f64,
	radius: f64,
	placed: &[Node],
) -> (f64, f64) {
	let span_x = (width - SAFE_AREA.left - SAFE_AREA.right).max(1.0);
	let span_y = (height - SAFE_AREA.top - SAFE_AREA.bottom).max(1.0);
	let mut sample = |rng: &mut SmallRng| {
		(
			SAFE_AREA.left + rng.r#gen::<f64>() * span_x,
			SAFE_AREA.top + rng.r#gen::<f64>() * span_y,
		)
	};

	for _ in 0..MAX_PLACEMENT_ATTEMPTS {
		let (x, y) = sample(rng);
		let collides = placed.iter().any(|node| {
			let (dx, dy) = (node.x - x, node.y - y);
			(dx * dx + dy * dy).sqrt() < radius + node.radius + NODE_SPACING
		});
		if !collides && SAFE_AREA.contains(x, y, width, height) {
			return (x, y);
		}
	}
	sample(rng)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	fn state(width: f64, height: f64, seed: u64) -> NetworkState {
		NetworkState::new(width, height, SmallRng::seed_from_u64(seed))
	}

	#[test]
	fn node_set_is_fixed_and_well_formed() {
		let state = state(1280.0, 800.0, 1);
		assert_eq!(state.nodes.len(), NODE_COUNT);
		assert_eq!(state.particles.len(), PARTICLE_COUNT);
		assert_eq!(state.nodes.iter().filter(|n| n.is_topic).count(), TOPIC_NODE_COUNT);
		for node in &state.nodes {
			// Every file node's topic names an existing topic anchor.
			assert!(
				state
					.nodes
					.iter()
					.any(|anchor| anchor.is_topic && anchor.topic == node.topic),
				"{} has orphan topic {}",
				node.id,
				node.topic
			);
			assert!((3..=5).contains(&node.data_points.len()));
		}
	}

	#[test]
	fn layout_keeps_nodes_clear_on_a_roomy_canvas() {
		for seed in 0..10 {
			let state = state(1600.0, 1000.0, seed);
			for (i, a) in state.nodes.iter().enumerate() {
				for b in &state.nodes[i + 1..] {
					let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
					assert!(
						dist >= a.radius + b.radius + NODE_SPACING - 1e-9,
						"seed {seed}: {} and {} overlap ({dist})",
						a.id,
						b.id
					);
				}
			}
		}
	}

	#[test]
	fn layout_degrades_to_overlap_instead_of_failing() {
		// Safe rectangle of 100x50: ten nodes cannot all keep clearance,
		// so the attempt budget runs out and placement still succeeds.
		let state = state(200.0, 300.0, 3);
		assert_eq!(state.nodes.len(), NODE_COUNT);
		for node in &state.nodes {
			assert!(SAFE_AREA.contains(node.x, node.y, 200.0, 300.0));
		}
	}

	#[test]
	fn topic_spread_targets_stay_in_the_safe_rectangle() {
		for seed in 0..5 {
			let mut state = state(1280.0, 800.0, seed);
			let clicked = state.nodes.iter().position(|n| n.is_topic).unwrap();
			let topic = state.nodes[clicked].topic.clone();
			let hit = state.spread(clicked);
			assert!(hit.is_topic);

			for node in state.nodes.iter().filter(|n| !n.is_topic && n.topic == topic) {
				assert!(
					SAFE_AREA.contains(node.base_x, node.base_y, 1280.0, 800.0),
					"seed {seed}: {} spread to ({}, {})",
					node.id,
					node.base_x,
					node.base_y
				);
			}
		}
	}

	#[test]
	fn file_spread_affects_topic_siblings_and_anchor() {
		let mut state = state(1280.0, 800.0, 9);
		let clicked = state.nodes.iter().position(|n| !n.is_topic).unwrap();
		let topic = state.nodes[clicked].topic.clone();
		let before: Vec<(f64, f64)> = state.nodes.iter().map(|n| (n.base_x, n.base_y)).collect();

		state.spread(clicked);

		for (i, node) in state.nodes.iter().enumerate() {
			let moved = (node.base_x, node.base_y) != before[i];
			if i == clicked || node.topic != topic {
				assert!(!moved, "{} should not have moved", node.id);
			}
		}
	}

	#[test]
	fn spread_seeds_velocity_toward_the_new_target() {
		let mut state = state(1280.0, 800.0, 11);
		let clicked = state.nodes.iter().position(|n| n.is_topic).unwrap();
		let topic = state.nodes[clicked].topic.clone();
		state.spread(clicked);

		for node in state.nodes.iter().filter(|n| !n.is_topic && n.topic == topic) {
			let (dx, dy) = (node.base_x - node.x, node.base_y - node.y);
			if dx.abs() > 1.0 {
				assert!(node.vx * dx > 0.0, "{} vx points away from target", node.id);
			}
			if dy.abs() > 1.0 {
				assert!(node.vy * dy > 0.0, "{} vy points away from target", node.id);
			}
		}
	}

	#[test]
	fn spread_on_lonely_node_only_ripples() {
		let mut state = state(1280.0, 800.0, 2);
		// Detach one file node into a topic of its own.
		let i = state.nodes.iter().position(|n| !n.is_topic).unwrap();
		state.nodes[i].topic = "UNCHARTED".into();
		let bases: Vec<(f64, f64)> = state.nodes.iter().map(|n| (n.base_x, n.base_y)).collect();

		state.spread(i);

		assert_eq!(state.ripples.len(), 1);
		for (j, node) in state.nodes.iter().enumerate() {
			assert_eq!((node.base_x, node.base_y), bases[j]);
		}
	}

	#[test]
	fn ripples_decay_strictly_and_disappear() {
		let mut state = state(1280.0, 800.0, 4);
		state.spawn_ripple(400.0, 400.0, 16.0, 200.0);

		let mut last_opacity = f64::INFINITY;
		let mut ticks = 0;
		while !state.ripples.is_empty() {
			let ripple = &state.ripples[0];
			assert!(ripple.opacity < last_opacity, "opacity must strictly decrease");
			assert!(ripple.radius <= ripple.max_radius);
			last_opacity = ripple.opacity;
			state.tick(0.016);
			ticks += 1;
			assert!(ticks < 100, "ripple never removed");
		}
	}

	#[test]
	fn spring_converges_back_to_base() {
		let mut state = state(1280.0, 800.0, 5);
		let i = state.nodes.iter().position(|n| !n.is_topic).unwrap();
		state.nodes[i].x = state.nodes[i].base_x + 120.0;
		state.nodes[i].y = state.nodes[i].base_y - 80.0;

		for _ in 0..600 {
			state.tick(0.016);
		}
		let node = &state.nodes[i];
		assert!((node.x - node.base_x).abs() < 1.0);
		assert!((node.y - node.base_y).abs() < 1.0);
	}

	#[test]
	fn topic_nodes_do_not_drift() {
		let mut state = state(1280.0, 800.0, 6);
		state.set_pointer(640.0, 400.0);
		let anchors: Vec<(f64, f64)> = state
			.nodes
			.iter()
			.filter(|n| n.is_topic)
			.map(|n| (n.x, n.y))
			.collect();

		for _ in 0..120 {
			state.tick(0.016);
		}
		let after: Vec<(f64, f64)> = state
			.nodes
			.iter()
			.filter(|n| n.is_topic)
			.map(|n| (n.x, n.y))
			.collect();
		assert_eq!(anchors, after);
	}

	#[test]
	fn particles_wrap_at_canvas_edges() {
		let mut state = state(800.0, 600.0, 7);
		state.particles[0].x = 799.9;
		state.particles[0].vx = 1.0;
		state.particles[0].vy = 0.0;
		state.tick(0.016);
		assert_eq!(state.particles[0].x, 0.0);
	}

	#[test]
	fn hover_hit_test_uses_radius_plus_slop() {
		let mut state = state(1280.0, 800.0, 8);
		let node = state.nodes[0].clone();
		state.set_pointer(node.x + node.radius + 5.0, node.y);
		assert_eq!(state.hovered, Some(0));
		state.set_pointer(node.x + node.radius + 30.0, node.y);
		assert_ne!(state.hovered, Some(0));
		state.clear_pointer();
		assert_eq!(state.hovered, None);
	}
}
