use bevy::prelude::*;

/// Axis aligned box centred on the origin that keeps the flock in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
	half_extents: Vec3,
}

impl BoundingVolume {
	pub fn new(half_extents: Vec3) -> Self {
		Self { half_extents: half_extents.abs() }
	}

	/// The swimmable part of a cubic tank with edge `size`.
	pub fn from_cube(size: f32) -> Self {
		Self::new(Vec3::new(size * 0.45, size * 0.35, size * 0.45))
	}

	pub fn half_extents(&self) -> Vec3 {
		self.half_extents
	}

	pub fn contains(&self, position: Vec3) -> bool {
		position.abs().cmple(self.half_extents).all()
	}

	/// Unit push away from every wall closer than `margin`, per axis.
	pub fn avoidance(&self, position: Vec3, margin: f32) -> Vec3 {
		let axis = |p: f32, h: f32| {
			if p > h - margin {
				-1.0
			} else if p < -h + margin {
				1.0
			} else {
				0.0
			}
		};

		Vec3::new(
			axis(position.x, self.half_extents.x),
			axis(position.y, self.half_extents.y),
			axis(position.z, self.half_extents.z),
		)
	}

	/// Clamps `position` back inside and bounces `velocity` off every wall it crossed.
	///
	/// Returns whether anything was hit.
	pub fn reflect(&self, position: &mut Vec3, velocity: &mut Vec3, restitution: f32) -> bool {
		let mut hit = false;
		for axis in 0..3 {
			let limit = self.half_extents[axis];
			if position[axis] > limit {
				position[axis] = limit;
			} else if position[axis] < -limit {
				position[axis] = -limit;
			} else {
				continue;
			}
			velocity[axis] *= -restitution;
			hit = true;
		}
		hit
	}
}
