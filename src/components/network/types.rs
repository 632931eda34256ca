//! Entities owned by the network simulation.

/// Research topics anchoring the node clusters.
pub const TOPICS: &[Topic] = &[
	Topic {
		name: "EXOPLANET DISCOVERY",
		files: &["Kepler-186f Analysis", "HD 209458b Study", "TRAPPIST-1 System"],
		color: (96, 165, 250),
	},
	Topic {
		name: "DARK MATTER",
		files: &["Galaxy Cluster Study", "Cosmic Microwave Background", "WIMPs Detection"],
		color: (167, 139, 250),
	},
	Topic {
		name: "MARS ROVER LOGS",
		files: &["Sol 3000-3100", "Terrain Analysis", "Sample Collection Data"],
		color: (248, 113, 113),
	},
	Topic {
		name: "GRAVITATIONAL WAVES",
		files: &["LIGO Detection Report", "Binary Merger Analysis", "Waveform Patterns"],
		color: (52, 211, 153),
	},
];

/// Decorative glyphs cycled across nodes for tooltips.
pub const COSMIC_SYMBOLS: &[&str] = &[
	"★", "✦", "✧", "❂", "♁", "♃", "♆", "☄", "⦿", "⟁", "⌬", "⏣", "⬯", "⬰", "⍟", "⌗",
];

/// A research topic with its known documents and display color.
#[derive(Clone, Copy, Debug)]
pub struct Topic {
	/// Cluster key, matched against [`Node::topic`].
	pub name: &'static str,
	/// Document titles belonging to this topic.
	pub files: &'static [&'static str],
	/// RGB display color.
	pub color: (u8, u8, u8),
}

impl Topic {
	/// Look up a topic by its cluster key.
	pub fn by_name(name: &str) -> Option<&'static Topic> {
		TOPICS.iter().find(|t| t.name == name)
	}
}

/// Rectangular band reserved for the navbar/search UI plus edge margins.
/// Node positions (initial layout and spread targets) stay inside it.
#[derive(Clone, Copy, Debug)]
pub struct SafeArea {
	pub top: f64,
	pub bottom: f64,
	pub left: f64,
	pub right: f64,
}

/// Safe rectangle used by the canonical layout.
pub const SAFE_AREA: SafeArea = SafeArea {
	top: 150.0,
	bottom: 100.0,
	left: 50.0,
	right: 50.0,
};

impl SafeArea {
	/// Clamp a point into the safe rectangle for a canvas of the given size.
	pub fn clamp(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
		(
			x.clamp(self.left, width - self.right),
			y.clamp(self.top, height - self.bottom),
		)
	}

	/// Whether a point lies inside the safe rectangle.
	pub fn contains(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
		x >= self.left && x <= width - self.right && y >= self.top && y <= height - self.bottom
	}
}

/// A topic anchor or file node on the plane.
///
/// `(x, y)` is the live position mutated every tick; `(base_x, base_y)` is
/// the target the spring term pulls toward. The spread engine only ever
/// rewrites targets, never creates or destroys nodes.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub base_x: f64,
	pub base_y: f64,
	pub radius: f64,
	pub label: String,
	/// Cluster key; self-referential for topic nodes.
	pub topic: String,
	pub is_topic: bool,
	pub pulse: f64,
	pub symbol: &'static str,
	/// Small sample values shown in the hover tooltip only.
	pub data_points: Vec<u32>,
}

/// Ambient background dot, unrelated to the node graph.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
}

/// Expanding click ring; removed once fully faded.
#[derive(Clone, Debug)]
pub struct Ripple {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub max_radius: f64,
	pub opacity: f64,
}

/// Snapshot of a clicked node handed to the click-notification callback.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeHit {
	pub label: String,
	pub topic: String,
	pub is_topic: bool,
}

impl NodeHit {
	pub(crate) fn of(node: &Node) -> Self {
		Self {
			label: node.label.clone(),
			topic: node.topic.clone(),
			is_topic: node.is_topic,
		}
	}
}
