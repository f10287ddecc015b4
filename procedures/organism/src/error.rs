#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
	#[error("a curve needs at least 2 control points, got {count}")]
	InsufficientControlPoints { count: usize },
	#[error("fin outline has zero length")]
	DegenerateFinOutline,
	#[error("ring resolution must be at least 3 to close a ring, got {resolution}")]
	InvalidRingResolution { resolution: usize },
}
