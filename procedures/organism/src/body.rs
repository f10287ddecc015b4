use crate::curve::{CatmullRomCurve, Polyline, ProfileCurve};
use crate::error::GeometryError;
use bevy::prelude::*;
use render_item::mesh::SurfaceMesh;
use serde::{Deserialize, Serialize};

/// Smallest frame step accepted, to keep the frame count finite.
const MIN_FRAME_STEP: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyLoftConfig {
	/// Quads around each ring. Every ring stores one more point which closes the seam.
	pub ring_resolution: usize,
	/// Arc length samples taken of each profile curve.
	pub profile_samples: usize,
	/// Distance along x between consecutive cross-section frames.
	pub frame_step: f32,
	/// Rings blending the last body frame into the tail.
	pub tail_slices: usize,
}

impl Default for BodyLoftConfig {
	fn default() -> Self {
		Self { ring_resolution: 200, profile_samples: 101, frame_step: 0.05, tail_slices: 5 }
	}
}

impl BodyLoftConfig {
	pub fn with_ring_resolution(mut self, ring_resolution: usize) -> Self {
		self.ring_resolution = ring_resolution;
		self
	}

	pub fn with_profile_samples(mut self, profile_samples: usize) -> Self {
		self.profile_samples = profile_samples;
		self
	}

	pub fn with_frame_step(mut self, frame_step: f32) -> Self {
		self.frame_step = frame_step;
		self
	}

	pub fn with_tail_slices(mut self, tail_slices: usize) -> Self {
		self.tail_slices = tail_slices;
		self
	}
}

/// Lofts a closed body surface from dorsal, ventral and lateral profiles plus a tail curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyLoft {
	config: BodyLoftConfig,
}

impl BodyLoft {
	pub fn new(config: BodyLoftConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &BodyLoftConfig {
		&self.config
	}

	pub fn loft(
		&self,
		top: &ProfileCurve,
		bottom: &ProfileCurve,
		side: &ProfileCurve,
		tail: &ProfileCurve,
	) -> Result<BodyMesh, GeometryError> {
		let resolution = self.config.ring_resolution;
		if resolution < 3 {
			return Err(GeometryError::InvalidRingResolution { resolution });
		}

		let samples = self.config.profile_samples;
		let top = top.sample(samples)?;
		let bottom = bottom.sample(samples)?;
		let side = side.sample(samples)?;
		let tail = tail.curve()?;

		let mut rings = Vec::new();

		// the snout collapses to a single point
		rings.push(vec![top.first(); resolution + 1]);

		let length = top.last().x;
		let step = self.config.frame_step.max(MIN_FRAME_STEP);
		let mut k = 1;
		loop {
			let x = k as f32 * step;
			if x >= length - step * 1e-3 {
				break;
			}
			rings.push(self.frame_ring(
				top.point_at_x(x),
				bottom.point_at_x(x),
				side.point_at_x(x),
			)?);
			k += 1;
		}

		// the closing frame comes straight from the last samples
		rings.push(self.frame_ring(top.last(), bottom.last(), side.last())?);
		let frame_count = rings.len();

		let tail_ring = self.tail_ring(&tail);
		let last_frame = rings[frame_count - 1].clone();
		let tail_slices = self.config.tail_slices;
		for slice in 1..=tail_slices {
			let ratio = slice as f32 / tail_slices as f32;
			rings.push(last_frame.iter().zip(&tail_ring).map(|(a, b)| a.lerp(*b, ratio)).collect());
		}

		Ok(BodyMesh { rings, ring_resolution: resolution, frame_count, tail_slices, top, bottom })
	}

	/// Closed ring through the ventral, lateral, dorsal and mirrored lateral points of a frame.
	fn frame_ring(&self, top: Vec3, bottom: Vec3, side: Vec3) -> Result<Vec<Vec3>, GeometryError> {
		let left = Vec3::new(side.x, side.y, -side.z);
		let ring = CatmullRomCurve::closed(vec![bottom, side, top, left])?;
		Ok(ring.spaced_points(self.config.ring_resolution))
	}

	/// Walks the tail curve out to its tip and back with z mirrored, one point per ring slot.
	fn tail_ring(&self, tail: &CatmullRomCurve) -> Vec<Vec3> {
		let resolution = self.config.ring_resolution;
		(0..=resolution)
			.map(|i| {
				let along = 2.0 * i as f32 / resolution as f32;
				let mut point = tail.point_at(1.0 - (1.0 - along).abs());
				if 2 * i > resolution {
					point.z = -point.z;
				}
				point
			})
			.collect()
	}
}

/// Lofted rings of a body, snout first and tail tip last.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyMesh {
	rings: Vec<Vec<Vec3>>,
	ring_resolution: usize,
	frame_count: usize,
	tail_slices: usize,
	top: Polyline,
	bottom: Polyline,
}

impl BodyMesh {
	pub fn rings(&self) -> &[Vec<Vec3>] {
		&self.rings
	}

	pub fn ring_count(&self) -> usize {
		self.rings.len()
	}

	/// Body frames, snout and closing frame included, excluding the tail blend.
	pub fn frame_count(&self) -> usize {
		self.frame_count
	}

	pub fn tail_slices(&self) -> usize {
		self.tail_slices
	}

	pub fn ring_resolution(&self) -> usize {
		self.ring_resolution
	}

	pub fn quad_count(&self) -> usize {
		self.ring_resolution * (self.frame_count + self.tail_slices - 1)
	}

	pub fn vertex_count(&self) -> usize {
		(self.ring_resolution + 1) * self.ring_count()
	}

	/// Dorsal samples, used as the spine for dorsal fins.
	pub fn top_profile(&self) -> &Polyline {
		&self.top
	}

	/// Ventral samples, used as the spine for ventral fins.
	pub fn bottom_profile(&self) -> &Polyline {
		&self.bottom
	}

	pub fn to_surface(&self) -> SurfaceMesh {
		let columns = self.ring_resolution;
		let rows = self.ring_count() - 1;

		let positions: Vec<Vec3> = self.rings.iter().flatten().copied().collect();
		let mut uvs = Vec::with_capacity(positions.len());
		for iy in 0..=rows {
			for ix in 0..=columns {
				// the texture wraps twice around the body
				uvs.push(Vec2::new(2.0 * ix as f32 / columns as f32, iy as f32 / rows as f32));
			}
		}

		SurfaceMesh::quad_grid(positions, uvs, columns, rows)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::anatomy::OrganismProfile;

	fn coarse() -> BodyLoft {
		BodyLoft::new(BodyLoftConfig::default().with_ring_resolution(24).with_frame_step(0.5))
	}

	fn fish_body(loft: &BodyLoft) -> BodyMesh {
		let fish = OrganismProfile::fish();
		loft.loft(&fish.top, &fish.bottom, &fish.side, &fish.tail).unwrap()
	}

	#[test]
	fn test_rejects_small_ring_resolution() {
		let fish = OrganismProfile::fish();
		let loft = BodyLoft::new(BodyLoftConfig::default().with_ring_resolution(2));
		let result = loft.loft(&fish.top, &fish.bottom, &fish.side, &fish.tail);
		assert_eq!(result, Err(GeometryError::InvalidRingResolution { resolution: 2 }));
	}

	#[test]
	fn test_rejects_short_profile() {
		let fish = OrganismProfile::fish();
		let top = ProfileCurve::from_xy(&[[0.0, 0.0]]);
		let result = coarse().loft(&top, &fish.bottom, &fish.side, &fish.tail);
		assert_eq!(result, Err(GeometryError::InsufficientControlPoints { count: 1 }));
	}

	#[test]
	fn test_ring_and_quad_counts() {
		let body = fish_body(&coarse());

		// snout, x = 0.5 ..= 9.5, closing frame
		assert_eq!(body.frame_count(), 21);
		assert_eq!(body.ring_count(), 21 + 5);
		for ring in body.rings() {
			assert_eq!(ring.len(), 25);
		}

		assert_eq!(body.quad_count(), 24 * 25);
		let surface = body.to_surface();
		assert_eq!(surface.vertex_count(), 25 * 26);
		assert_eq!(surface.triangle_count(), 2 * body.quad_count());
	}

	#[test]
	fn test_default_frame_count() {
		let body = fish_body(&BodyLoft::new(BodyLoftConfig::default().with_ring_resolution(8)));
		// snout, 199 stepped frames, closing frame
		assert_eq!(body.frame_count(), 201);
	}

	#[test]
	fn test_snout_collapses_and_rings_close() {
		let body = fish_body(&coarse());
		let snout = &body.rings()[0];
		assert!(snout.iter().all(|p| *p == snout[0]));

		for ring in &body.rings()[1..body.frame_count()] {
			assert!(ring[0].abs_diff_eq(ring[ring.len() - 1], 1e-4));
		}
	}

	#[test]
	fn test_frames_span_the_profile() {
		let body = fish_body(&coarse());
		let frames = &body.rings()[1..body.frame_count()];
		for pair in frames.windows(2) {
			assert!(pair[0][0].x < pair[1][0].x);
		}
		assert!((frames[frames.len() - 1][0].x - 10.0).abs() < 1e-3);
	}

	#[test]
	fn test_tail_tip_matches_tail_curve() {
		let fish = OrganismProfile::fish();
		let body = fish_body(&coarse());
		let tip = &body.rings()[body.ring_count() - 1];

		let start = fish.tail.control_points()[0];
		let end = fish.tail.control_points()[fish.tail.control_points().len() - 1];
		assert!(tip[0].abs_diff_eq(start, 1e-4));
		assert!(tip[12].abs_diff_eq(end, 1e-4));
		assert!(tip[24].abs_diff_eq(start, 1e-4));
	}

	#[test]
	fn test_no_duplicate_runs_past_snout() {
		let body = fish_body(&coarse());
		for ring in &body.rings()[1..] {
			for pair in ring.windows(2) {
				assert!(pair[0].distance(pair[1]) > 1e-6);
			}
		}
	}

	#[test]
	fn test_surface_uvs_wrap_twice() {
		let body = fish_body(&coarse());
		let surface = body.to_surface();
		assert_eq!(surface.uvs[0], Vec2::new(0.0, 0.0));
		assert_eq!(surface.uvs[24], Vec2::new(2.0, 0.0));
		assert_eq!(surface.uvs[surface.uvs.len() - 1], Vec2::new(2.0, 1.0));
	}
}
