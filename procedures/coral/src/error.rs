#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrowthError {
	#[error("expansion passed {limit} symbols at iteration {iteration}")]
	UnboundedGrammarExpansion { limit: usize, iteration: usize },
	#[error("productions of '{symbol}' need finite, non-negative weights with a positive sum")]
	InvalidProductionWeights { symbol: char },
	#[error("rule for '{symbol}' has no productions")]
	EmptyProduction { symbol: char },
}
