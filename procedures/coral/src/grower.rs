use crate::error::GrowthError;
use crate::grammar::{Grammar, GrowthLimits};
use crate::skeleton::CoralSkeleton;
use crate::turtle::{Turtle, TurtleConfig};
use rand::Rng;

/// Grows coral skeletons: grammar expansion followed by a turtle walk.
#[derive(Debug, Clone, PartialEq)]
pub struct LSystemGrower {
	grammar: Grammar,
	turtle: Turtle,
	limits: GrowthLimits,
}

impl Default for LSystemGrower {
	fn default() -> Self {
		Self::new(Grammar::coral())
	}
}

impl LSystemGrower {
	pub fn new(grammar: Grammar) -> Self {
		Self { grammar, turtle: Turtle::default(), limits: GrowthLimits::default() }
	}

	pub fn with_turtle(mut self, turtle: TurtleConfig) -> Self {
		self.turtle = Turtle::new(turtle);
		self
	}

	pub fn with_limits(mut self, limits: GrowthLimits) -> Self {
		self.limits = limits;
		self
	}

	pub fn grammar(&self) -> &Grammar {
		&self.grammar
	}

	pub fn expand<R: Rng + ?Sized>(
		&self,
		iterations: usize,
		rng: &mut R,
	) -> Result<String, GrowthError> {
		self.grammar.expand(iterations, &self.limits, rng)
	}

	pub fn grow<R: Rng + ?Sized>(
		&self,
		iterations: usize,
		rng: &mut R,
	) -> Result<CoralSkeleton, GrowthError> {
		let program = self.expand(iterations, rng)?;
		let segments = self.turtle.walk(&program, rng);
		log::debug!(
			"Grew coral: {} iterations, {} symbols, {} segments",
			iterations,
			program.len(),
			segments.len()
		);
		Ok(CoralSkeleton::new(segments, program.len(), iterations))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grammar::Production;
	use bevy::prelude::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn test_f_only_grammar_grows_straight_chain() {
		let grammar = Grammar::new("X", [('X', vec![Production::new("FX", 1.0)])]).unwrap();
		let grower = LSystemGrower::new(grammar);

		for iterations in 0..=3 {
			let program = grower.expand(iterations, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
			assert!(!program.contains('[') && !program.contains(']'));
		}

		let skeleton = grower.grow(3, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
		assert_eq!(skeleton.segment_count(), 3);
		for segment in skeleton.segments() {
			assert!(segment.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
			assert!(segment.translation.x.abs() < 1e-6 && segment.translation.z.abs() < 1e-6);
		}
		for pair in skeleton.segments().windows(2) {
			assert!(pair[1].translation.abs_diff_eq(pair[0].end(), 1e-5));
		}
	}

	#[test]
	fn test_zero_iterations_draws_nothing() {
		let mut rng = ChaCha8Rng::seed_from_u64(2);
		let skeleton = LSystemGrower::default().grow(0, &mut rng).unwrap();
		assert_eq!(skeleton.segment_count(), 0);
		assert_eq!(skeleton.symbols(), 1);
	}

	#[test]
	fn test_coral_is_reproducible() {
		let grower = LSystemGrower::default();
		let a = grower.grow(4, &mut ChaCha8Rng::seed_from_u64(21)).unwrap();
		let b = grower.grow(4, &mut ChaCha8Rng::seed_from_u64(21)).unwrap();
		assert_eq!(a, b);
		assert!(a.segment_count() > 0);
	}

	#[test]
	fn test_limits_propagate() {
		let grower =
			LSystemGrower::default().with_limits(GrowthLimits::default().with_max_symbols(4));
		let result = grower.grow(4, &mut ChaCha8Rng::seed_from_u64(0));
		assert!(matches!(result, Err(GrowthError::UnboundedGrammarExpansion { limit: 4, .. })));
	}
}
