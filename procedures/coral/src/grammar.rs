use crate::error::GrowthError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
	pub successor: String,
	pub weight: f32,
}

impl Production {
	pub fn new(successor: impl Into<String>, weight: f32) -> Self {
		Self { successor: successor.into(), weight }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthLimits {
	/// Largest expanded string accepted before expansion is abandoned.
	pub max_symbols: usize,
}

impl Default for GrowthLimits {
	fn default() -> Self {
		Self { max_symbols: 250_000 }
	}
}

impl GrowthLimits {
	pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
		self.max_symbols = max_symbols;
		self
	}
}

/// A stochastic L-system: an axiom and weighted productions per symbol.
///
/// Symbols without a rule are copied through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
	axiom: String,
	rules: HashMap<char, Vec<Production>>,
}

impl Grammar {
	pub fn new(
		axiom: impl Into<String>,
		rules: impl IntoIterator<Item = (char, Vec<Production>)>,
	) -> Result<Self, GrowthError> {
		let grammar = Self { axiom: axiom.into(), rules: rules.into_iter().collect() };
		grammar.distributions()?;
		Ok(grammar)
	}

	/// Branching coral: `X` sprouts two or four side shoots, `F` thickens into small forks.
	pub fn coral() -> Self {
		let rules = [
			(
				'X',
				vec![
					Production::new("F[+X][-X][&X][^X]", 0.25),
					Production::new("F[+X][-X][*X][~X]", 0.25),
					Production::new("FX", 0.25),
				],
			),
			(
				'F',
				vec![
					Production::new("F[+F][-F][&F]", 0.3),
					Production::new("F[+F][-F][*F]", 0.3),
					Production::new("F[+F][-F][~F]", 0.2),
					Production::new("F", 0.2),
				],
			),
		];
		Self { axiom: "X".to_string(), rules: rules.into_iter().collect() }
	}

	pub fn axiom(&self) -> &str {
		&self.axiom
	}

	pub fn productions(&self, symbol: char) -> Option<&[Production]> {
		self.rules.get(&symbol).map(Vec::as_slice)
	}

	fn distributions(&self) -> Result<HashMap<char, WeightedIndex<f32>>, GrowthError> {
		self.rules
			.iter()
			.map(|(symbol, productions)| {
				if productions.is_empty() {
					return Err(GrowthError::EmptyProduction { symbol: *symbol });
				}
				let distribution = WeightedIndex::new(productions.iter().map(|p| p.weight))
					.map_err(|_| GrowthError::InvalidProductionWeights { symbol: *symbol })?;
				Ok((*symbol, distribution))
			})
			.collect()
	}

	/// Rewrites the axiom `iterations` times, choosing each production by weight.
	pub fn expand<R: Rng + ?Sized>(
		&self,
		iterations: usize,
		limits: &GrowthLimits,
		rng: &mut R,
	) -> Result<String, GrowthError> {
		let distributions = self.distributions()?;
		let mut current = self.axiom.clone();

		for iteration in 1..=iterations {
			let mut next = String::with_capacity(current.len() * 4);
			for symbol in current.chars() {
				match (self.rules.get(&symbol), distributions.get(&symbol)) {
					(Some(productions), Some(distribution)) => {
						next.push_str(&productions[distribution.sample(rng)].successor);
					}
					_ => next.push(symbol),
				}

				if next.len() > limits.max_symbols {
					return Err(GrowthError::UnboundedGrammarExpansion {
						limit: limits.max_symbols,
						iteration,
					});
				}
			}
			current = next;
		}

		Ok(current)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	#[test]
	fn test_zero_iterations_returns_axiom() {
		let mut rng = ChaCha8Rng::seed_from_u64(1);
		let expanded = Grammar::coral().expand(0, &GrowthLimits::default(), &mut rng).unwrap();
		assert_eq!(expanded, "X");
	}

	#[test]
	fn test_deterministic_for_seed() {
		let grammar = Grammar::coral();
		let limits = GrowthLimits::default();
		let a = grammar.expand(4, &limits, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
		let b = grammar.expand(4, &limits, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn test_length_non_decreasing_with_iterations() {
		let grammar = Grammar::coral();
		let limits = GrowthLimits::default();
		let mut previous = 0;
		for iterations in 0..5 {
			let mut rng = ChaCha8Rng::seed_from_u64(3);
			let length = grammar.expand(iterations, &limits, &mut rng).unwrap().len();
			assert!(length >= previous, "{length} < {previous} at {iterations}");
			previous = length;
		}
	}

	#[test]
	fn test_unknown_symbols_pass_through() {
		let grammar = Grammar::new("AFB", [('F', vec![Production::new("FF", 1.0)])]).unwrap();
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		let expanded = grammar.expand(2, &GrowthLimits::default(), &mut rng).unwrap();
		assert_eq!(expanded, "AFFFFB");
	}

	#[test]
	fn test_rejects_bad_rules() {
		let empty = Grammar::new("X", [('X', vec![])]);
		assert_eq!(empty, Err(GrowthError::EmptyProduction { symbol: 'X' }));

		let zero = Grammar::new("X", [('X', vec![Production::new("F", 0.0)])]);
		assert_eq!(zero, Err(GrowthError::InvalidProductionWeights { symbol: 'X' }));

		let negative = Grammar::new(
			"X",
			[('X', vec![Production::new("F", 1.0), Production::new("FF", -1.0)])],
		);
		assert_eq!(negative, Err(GrowthError::InvalidProductionWeights { symbol: 'X' }));
	}

	#[test]
	fn test_expansion_limit() {
		let grammar = Grammar::new("F", [('F', vec![Production::new("FF", 1.0)])]).unwrap();
		let limits = GrowthLimits::default().with_max_symbols(100);
		let mut rng = ChaCha8Rng::seed_from_u64(0);

		assert!(grammar.expand(6, &limits, &mut rng).is_ok());
		let result = grammar.expand(7, &limits, &mut rng);
		assert_eq!(result, Err(GrowthError::UnboundedGrammarExpansion { limit: 100, iteration: 7 }));
	}
}
