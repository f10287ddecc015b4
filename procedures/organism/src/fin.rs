use crate::curve::{Polyline, ProfileCurve};
use crate::error::GeometryError;
use bevy::prelude::*;
use render_item::mesh::{surface::plane_uvs, SurfaceMesh};
use serde::{Deserialize, Serialize};

/// Which body profile a fin hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinSide {
	Dorsal,
	Ventral,
}

impl FinSide {
	/// Direction the fin base is pushed into the body, and the sign of its lateral thickness.
	pub fn sign(self) -> f32 {
		match self {
			FinSide::Dorsal => 1.0,
			FinSide::Ventral => -1.0,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinConfig {
	/// Arc length samples along the fin outline.
	pub contour_samples: usize,
	/// How far the base sinks into the body, also the half thickness at the root.
	pub base_shift: f32,
}

impl Default for FinConfig {
	fn default() -> Self {
		Self { contour_samples: 61, base_shift: 0.05 }
	}
}

impl FinConfig {
	pub fn with_contour_samples(mut self, contour_samples: usize) -> Self {
		self.contour_samples = contour_samples;
		self
	}

	pub fn with_base_shift(mut self, base_shift: f32) -> Self {
		self.base_shift = base_shift;
		self
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinBuilder {
	config: FinConfig,
}

impl FinBuilder {
	pub fn new(config: FinConfig) -> Self {
		Self { config }
	}

	/// Builds a double sided fin strip joining `outline` to the body profile below it.
	pub fn build(
		&self,
		spine: &Polyline,
		outline: &ProfileCurve,
		side: FinSide,
	) -> Result<FinMesh, GeometryError> {
		let curve = outline.curve()?;
		if curve.length() <= f32::EPSILON {
			return Err(GeometryError::DegenerateFinOutline);
		}

		let contour: Vec<Vec3> = curve
			.sample(self.config.contour_samples)
			.points()
			.iter()
			.map(|p| Vec3::new(p.x, p.y, 0.0))
			.collect();

		let shift = self.config.base_shift * side.sign();
		let count = contour.len();
		let base: Vec<Vec3> = contour
			.iter()
			.enumerate()
			.map(|(i, p)| {
				let root = spine.point_at_x(p.x) - Vec3::Y * shift;
				// the blade only has thickness away from its leading and trailing edges
				let lateral = if i == 0 || i + 1 == count { 0.0 } else { shift };
				Vec3::new(root.x, root.y, lateral)
			})
			.collect();

		let mirrored_contour: Vec<Vec3> = contour.iter().rev().skip(1).copied().collect();
		let mirrored_base: Vec<Vec3> =
			base.iter().rev().skip(1).map(|p| Vec3::new(p.x, p.y, -p.z)).collect();

		Ok(FinMesh { contour, mirrored_contour, base, mirrored_base, side })
	}
}

/// A fin as two rows of points: the outline travelled out and back, over its root travelled
/// out and back on the opposite face.
#[derive(Debug, Clone, PartialEq)]
pub struct FinMesh {
	contour: Vec<Vec3>,
	mirrored_contour: Vec<Vec3>,
	base: Vec<Vec3>,
	mirrored_base: Vec<Vec3>,
	side: FinSide,
}

impl FinMesh {
	pub fn side(&self) -> FinSide {
		self.side
	}

	pub fn contour(&self) -> &[Vec3] {
		&self.contour
	}

	pub fn base(&self) -> &[Vec3] {
		&self.base
	}

	pub fn mirrored_base(&self) -> &[Vec3] {
		&self.mirrored_base
	}

	/// Quads along the strip.
	pub fn columns(&self) -> usize {
		self.contour.len() + self.mirrored_contour.len() - 1
	}

	/// Contour, mirrored contour, base, mirrored base.
	pub fn points(&self) -> Vec<Vec3> {
		self.contour
			.iter()
			.chain(&self.mirrored_contour)
			.chain(&self.base)
			.chain(&self.mirrored_base)
			.copied()
			.collect()
	}

	pub fn point_count(&self) -> usize {
		self.contour.len() + self.mirrored_contour.len() + self.base.len() + self.mirrored_base.len()
	}

	pub fn to_surface(&self) -> SurfaceMesh {
		let columns = self.columns();
		SurfaceMesh::quad_grid(self.points(), plane_uvs(columns, 1), columns, 1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn spine() -> Polyline {
		Polyline::new(vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(10.0, 1.0, 0.0)])
	}

	fn dorsal_outline() -> ProfileCurve {
		ProfileCurve::from_xy(&[[7.0, 2.0], [7.0, 5.0], [6.0, 5.3], [4.9, 4.9], [4.7, 4.7]])
	}

	#[test]
	fn test_point_count() {
		let builder = FinBuilder::new(FinConfig::default().with_contour_samples(10));
		let fin = builder.build(&spine(), &dorsal_outline(), FinSide::Dorsal).unwrap();

		assert_eq!(fin.point_count(), 4 * 10 - 2);
		assert_eq!(fin.points().len(), 38);
		assert_eq!(fin.columns(), 18);
		assert_eq!(fin.to_surface().triangle_count(), 18 * 2);
	}

	#[test]
	fn test_edges_are_thin() {
		let fin = FinBuilder::default().build(&spine(), &dorsal_outline(), FinSide::Dorsal).unwrap();

		assert!(fin.contour().iter().all(|p| p.z == 0.0));

		let base = fin.base();
		assert_eq!(base[0].z, 0.0);
		assert_eq!(base[base.len() - 1].z, 0.0);
		for p in &base[1..base.len() - 1] {
			assert!((p.z - 0.05).abs() < 1e-6);
		}

		let mirrored = fin.mirrored_base();
		assert_eq!(mirrored[mirrored.len() - 1].z, 0.0);
		for p in &mirrored[..mirrored.len() - 1] {
			assert!((p.z + 0.05).abs() < 1e-6);
		}
	}

	#[test]
	fn test_base_sinks_into_body() {
		let dorsal = FinBuilder::default().build(&spine(), &dorsal_outline(), FinSide::Dorsal).unwrap();
		assert!(dorsal.base().iter().all(|p| (p.y - 0.95).abs() < 1e-5));

		let ventral_outline = ProfileCurve::from_xy(&[[6.0, -0.9], [7.25, -1.5], [7.5, -0.75]]);
		let ventral =
			FinBuilder::default().build(&spine(), &ventral_outline, FinSide::Ventral).unwrap();
		assert!(ventral.base().iter().all(|p| (p.y - 1.05).abs() < 1e-5));
		assert!(ventral.base()[1].z < 0.0);
	}

	#[test]
	fn test_degenerate_outline() {
		let outline = ProfileCurve::from_xy(&[[1.0, 1.0], [1.0, 1.0]]);
		let result = FinBuilder::default().build(&spine(), &outline, FinSide::Dorsal);
		assert_eq!(result, Err(GeometryError::DegenerateFinOutline));
	}
}
