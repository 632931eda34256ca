//! Constellation templates used by the spread engine.

use rand::Rng;

/// A named constellation: an ordered list of point offsets around the
/// clicked node, in pattern units (scaled by the spread engine).
#[derive(Clone, Copy, Debug)]
pub struct Pattern {
	pub name: &'static str,
	pub offsets: &'static [(f64, f64)],
}

/// Fixed pattern library. Every pattern is anchored at the origin so the
/// first affected node lands on the clicked node itself.
pub const PATTERNS: &[Pattern] = &[
	Pattern {
		name: "Leo",
		offsets: &[
			(0.0, 0.0),
			(120.0, -80.0),
			(200.0, 20.0),
			(160.0, 150.0),
			(60.0, 200.0),
			(-40.0, 120.0),
			(-80.0, 40.0),
		],
	},
	Pattern {
		name: "Taurus",
		offsets: &[
			(0.0, 0.0),
			(140.0, 40.0),
			(220.0, 20.0),
			(280.0, -40.0),
			(320.0, 20.0),
			(240.0, 120.0),
			(160.0, 160.0),
			(80.0, 120.0),
		],
	},
	Pattern {
		name: "Orion",
		offsets: &[
			(0.0, 0.0),
			(80.0, -100.0),
			(160.0, -160.0),
			(240.0, -120.0),
			(180.0, 40.0),
			(100.0, 80.0),
			(40.0, 60.0),
			(-40.0, 20.0),
		],
	},
	Pattern {
		name: "Ursa",
		offsets: &[
			(0.0, 0.0),
			(60.0, -80.0),
			(140.0, -120.0),
			(220.0, -80.0),
			(180.0, 20.0),
			(100.0, 60.0),
			(20.0, 40.0),
			(-40.0, -20.0),
		],
	},
	Pattern {
		name: "Cygnus",
		offsets: &[
			(0.0, 0.0),
			(100.0, -60.0),
			(180.0, -40.0),
			(220.0, 20.0),
			(180.0, 80.0),
			(100.0, 100.0),
			(40.0, 80.0),
			(-20.0, 40.0),
		],
	},
	Pattern {
		name: "Draco",
		offsets: &[
			(0.0, 0.0),
			(80.0, -40.0),
			(140.0, -20.0),
			(180.0, 30.0),
			(140.0, 90.0),
			(80.0, 110.0),
			(20.0, 90.0),
			(-30.0, 50.0),
		],
	},
];

/// Uniformly pick one pattern from the library.
pub fn pick(rng: &mut impl Rng) -> &'static Pattern {
	&PATTERNS[rng.gen_range(0..PATTERNS.len())]
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn library_has_six_anchored_patterns() {
		assert_eq!(PATTERNS.len(), 6);
		for pattern in PATTERNS {
			assert!(!pattern.offsets.is_empty(), "{} is empty", pattern.name);
			assert_eq!(pattern.offsets[0], (0.0, 0.0), "{} is not anchored", pattern.name);
		}
	}

	#[test]
	fn pick_covers_the_whole_library() {
		let mut rng = SmallRng::seed_from_u64(7);
		let mut seen = [false; 6];
		for _ in 0..500 {
			let pattern = pick(&mut rng);
			let idx = PATTERNS
				.iter()
				.position(|p| p.name == pattern.name)
				.unwrap();
			seen[idx] = true;
		}
		assert!(seen.iter().all(|&s| s));
	}
}
