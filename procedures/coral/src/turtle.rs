use crate::skeleton::SegmentInstance;
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
	X,
	Y,
	Z,
}

impl Axis {
	pub fn unit(self) -> Vec3 {
		match self {
			Axis::X => Vec3::X,
			Axis::Y => Vec3::Y,
			Axis::Z => Vec3::Z,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
	/// `F`: draw a segment and advance.
	Forward,
	/// `X`: rewritten by the grammar, draws nothing.
	Placeholder,
	/// `+ -` about z, `& ^` about x, `* ~` about y.
	Rotate { axis: Axis, positive: bool },
	Push,
	Pop,
	Ignored(char),
}

impl From<char> for Symbol {
	fn from(c: char) -> Self {
		match c {
			'F' => Symbol::Forward,
			'X' => Symbol::Placeholder,
			'+' => Symbol::Rotate { axis: Axis::Z, positive: true },
			'-' => Symbol::Rotate { axis: Axis::Z, positive: false },
			'&' => Symbol::Rotate { axis: Axis::X, positive: true },
			'^' => Symbol::Rotate { axis: Axis::X, positive: false },
			'*' => Symbol::Rotate { axis: Axis::Y, positive: true },
			'~' => Symbol::Rotate { axis: Axis::Y, positive: false },
			'[' => Symbol::Push,
			']' => Symbol::Pop,
			other => Symbol::Ignored(other),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
	pub initial_length: f32,
	/// Length multiplier applied on every push.
	pub shrink: f32,
	pub base_angle_degrees: f32,
	/// Each turn deviates from the base angle by up to this much, either way.
	pub angle_jitter_degrees: f32,
	/// Cross-section scale of every segment.
	pub segment_girth: f32,
}

impl Default for TurtleConfig {
	fn default() -> Self {
		Self {
			initial_length: 0.25,
			shrink: 0.55,
			base_angle_degrees: 40.0,
			angle_jitter_degrees: 30.0,
			segment_girth: 0.33,
		}
	}
}

impl TurtleConfig {
	pub fn with_initial_length(mut self, initial_length: f32) -> Self {
		self.initial_length = initial_length;
		self
	}

	pub fn with_shrink(mut self, shrink: f32) -> Self {
		self.shrink = shrink;
		self
	}

	pub fn with_base_angle_degrees(mut self, base_angle_degrees: f32) -> Self {
		self.base_angle_degrees = base_angle_degrees;
		self
	}

	pub fn with_angle_jitter_degrees(mut self, angle_jitter_degrees: f32) -> Self {
		self.angle_jitter_degrees = angle_jitter_degrees;
		self
	}

	pub fn with_segment_girth(mut self, segment_girth: f32) -> Self {
		self.segment_girth = segment_girth;
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
	pub position: Vec3,
	pub orientation: Quat,
	pub length: f32,
}

impl TurtleState {
	pub fn heading(&self) -> Vec3 {
		self.orientation * Vec3::Y
	}
}

/// Interprets an expanded string as 3D turtle commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turtle {
	config: TurtleConfig,
}

impl Turtle {
	pub fn new(config: TurtleConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &TurtleConfig {
		&self.config
	}

	fn turn_angle<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
		let jitter = rng.gen_range(-1.0..=1.0) * self.config.angle_jitter_degrees;
		(self.config.base_angle_degrees + jitter).to_radians()
	}

	pub fn walk<R: Rng + ?Sized>(&self, program: &str, rng: &mut R) -> Vec<SegmentInstance> {
		let mut state = TurtleState {
			position: Vec3::ZERO,
			orientation: Quat::IDENTITY,
			length: self.config.initial_length,
		};
		let mut stack: Vec<TurtleState> = Vec::new();
		let mut segments = Vec::new();
		let mut unbalanced = 0usize;

		for symbol in program.chars().map(Symbol::from) {
			match symbol {
				Symbol::Forward => {
					let step = state.heading() * state.length;
					let rotation = match step.try_normalize() {
						Some(direction) => Quat::from_rotation_arc(Vec3::Y, direction),
						None => state.orientation,
					};
					segments.push(SegmentInstance {
						translation: state.position,
						rotation,
						scale: Vec3::new(
							self.config.segment_girth,
							state.length,
							self.config.segment_girth,
						),
					});
					state.position += step;
				}
				Symbol::Rotate { axis, positive } => {
					let angle = self.turn_angle(rng);
					let angle = if positive { angle } else { -angle };
					state.orientation = (state.orientation * Quat::from_axis_angle(axis.unit(), angle))
						.normalize();
				}
				Symbol::Push => {
					stack.push(state);
					state.length *= self.config.shrink;
				}
				Symbol::Pop => match stack.pop() {
					Some(saved) => state = saved,
					None => unbalanced += 1,
				},
				Symbol::Placeholder | Symbol::Ignored(_) => {}
			}
		}

		if unbalanced > 0 {
			log::warn!("Ignored {} unbalanced pops while walking coral", unbalanced);
		}

		segments
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn test_straight_chain() {
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		let segments = Turtle::default().walk("FFFX", &mut rng);
		assert_eq!(segments.len(), 3);

		for (i, segment) in segments.iter().enumerate() {
			assert!(segment.translation.abs_diff_eq(Vec3::Y * 0.25 * i as f32, 1e-6));
			assert!(segment.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
			assert_eq!(segment.scale, Vec3::new(0.33, 0.25, 0.33));
		}
		for pair in segments.windows(2) {
			assert!(pair[0].end().abs_diff_eq(pair[1].translation, 1e-6));
		}
	}

	#[test]
	fn test_branch_restores_state_and_shrinks() {
		let mut rng = ChaCha8Rng::seed_from_u64(5);
		let segments = Turtle::default().walk("F[+F]F", &mut rng);
		assert_eq!(segments.len(), 3);

		let branch = segments[1];
		assert!((branch.length() - 0.25 * 0.55).abs() < 1e-6);
		assert!(branch.translation.abs_diff_eq(Vec3::Y * 0.25, 1e-6));
		assert!(!branch.rotation.abs_diff_eq(Quat::IDENTITY, 1e-3));

		// the trunk continues straight from where the branch started
		let trunk = segments[2];
		assert!(trunk.translation.abs_diff_eq(Vec3::Y * 0.25, 1e-6));
		assert!(trunk.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
		assert!((trunk.length() - 0.25).abs() < 1e-6);
	}

	#[test]
	fn test_turn_angle_within_jitter() {
		let turtle = Turtle::default();
		let mut rng = ChaCha8Rng::seed_from_u64(11);
		for _ in 0..200 {
			let angle = turtle.turn_angle(&mut rng).to_degrees();
			assert!((10.0 - 1e-3..=70.0 + 1e-3).contains(&angle));
		}
	}

	#[test]
	fn test_unbalanced_pop_is_ignored() {
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		let segments = Turtle::default().walk("F]]F", &mut rng);
		assert_eq!(segments.len(), 2);
		assert!(segments[1].translation.abs_diff_eq(Vec3::Y * 0.25, 1e-6));
	}

	#[test]
	fn test_symbol_mapping() {
		assert_eq!(Symbol::from('&'), Symbol::Rotate { axis: Axis::X, positive: true });
		assert_eq!(Symbol::from('~'), Symbol::Rotate { axis: Axis::Y, positive: false });
		assert_eq!(Symbol::from('X'), Symbol::Placeholder);
		assert_eq!(Symbol::from('Q'), Symbol::Ignored('Q'));
	}
}
