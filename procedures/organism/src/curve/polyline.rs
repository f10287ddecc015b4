use bevy::prelude::*;

/// Ordered sample points of a profile curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
	points: Vec<Vec3>,
}

impl Polyline {
	pub fn new(points: Vec<Vec3>) -> Self {
		Self { points }
	}

	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn first(&self) -> Vec3 {
		self.points.first().copied().unwrap_or_default()
	}

	pub fn last(&self) -> Vec3 {
		self.points.last().copied().unwrap_or_default()
	}

	/// Linearly interpolates the sample whose x bracket contains `x`.
	///
	/// Samples are assumed to be ordered by increasing x. Below the domain this clamps to the
	/// first point, above it to the last.
	pub fn point_at_x(&self, x: f32) -> Vec3 {
		let Some(first) = self.points.first() else {
			return Vec3::ZERO;
		};
		if x <= first.x {
			return *first;
		}

		for pair in self.points.windows(2) {
			let (a, b) = (pair[0], pair[1]);
			if x >= a.x && x <= b.x {
				let width = b.x - a.x;
				if width <= f32::EPSILON {
					return a;
				}
				return a.lerp(b, (x - a.x) / width);
			}
		}

		self.last()
	}
}
