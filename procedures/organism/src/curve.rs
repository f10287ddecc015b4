pub mod catmull_rom;
pub mod polyline;

pub use catmull_rom::CatmullRomCurve;
pub use polyline::Polyline;

use crate::error::GeometryError;
use bevy::prelude::*;

/// Control points of a profile curve, e.g. the dorsal outline of a body.
///
/// Two dimensional profiles live in the xy plane; lateral profiles carry their half width in z.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
	points: Vec<Vec3>,
}

impl ProfileCurve {
	pub fn new(points: Vec<Vec3>) -> Self {
		Self { points }
	}

	pub fn from_xy(points: &[[f32; 2]]) -> Self {
		Self::new(points.iter().map(|[x, y]| Vec3::new(*x, *y, 0.0)).collect())
	}

	pub fn from_xyz(points: &[[f32; 3]]) -> Self {
		Self::new(points.iter().map(|p| Vec3::from_array(*p)).collect())
	}

	pub fn control_points(&self) -> &[Vec3] {
		&self.points
	}

	/// The open centripetal curve through the control points.
	pub fn curve(&self) -> Result<CatmullRomCurve, GeometryError> {
		CatmullRomCurve::open(self.points.clone())
	}

	/// Samples `count` points evenly spaced by arc length.
	pub fn sample(&self, count: usize) -> Result<Polyline, GeometryError> {
		Ok(self.curve()?.sample(count))
	}
}
