use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tuning of the flocking simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
	/// Neighbors closer than this are aligned with and steered toward
	pub perception_radius: f32,
	pub max_speed: f32,
	/// Largest steering force per behavior and per tick
	pub max_force: f32,
	pub separation_weight: f32,
	pub alignment_weight: f32,
	pub cohesion_weight: f32,
	pub boundary_weight: f32,
	pub predator_weight: f32,
	/// Threats are avoided within this many perception radii
	pub predator_danger_factor: f32,
	/// Fleeing may use this many times the usual max force
	pub predator_force_factor: f32,
	/// Distance from a wall at which boundary avoidance kicks in
	pub boundary_margin: f32,
	/// Fraction of velocity kept when a prey agent bounces off a wall
	pub restitution: f32,
	pub predator_restitution: f32,
	/// Vertical motion is damped by this factor
	pub vertical_scale: f32,
	/// Predators cruise at their swim speed times this factor
	pub predator_speed_factor: f32,
	/// Used whenever the frame delta is not in (0, 1) seconds
	pub fallback_dt: f32,
}

impl Default for FlockConfig {
	fn default() -> Self {
		Self {
			perception_radius: 3.0,
			max_speed: 5.0,
			max_force: 0.2,
			separation_weight: 1.5,
			alignment_weight: 1.0,
			cohesion_weight: 1.0,
			boundary_weight: 1.0,
			predator_weight: 2.5,
			predator_danger_factor: 1.5,
			predator_force_factor: 1.5,
			boundary_margin: 2.0,
			restitution: 0.8,
			predator_restitution: 1.0,
			vertical_scale: 0.5,
			predator_speed_factor: 5.0,
			fallback_dt: 0.016,
		}
	}
}

impl FlockConfig {
	pub fn with_perception_radius(mut self, perception_radius: f32) -> Self {
		self.perception_radius = perception_radius;
		self
	}

	pub fn with_max_speed(mut self, max_speed: f32) -> Self {
		self.max_speed = max_speed;
		self
	}

	pub fn with_max_force(mut self, max_force: f32) -> Self {
		self.max_force = max_force;
		self
	}

	pub fn with_weights(
		mut self,
		separation: f32,
		alignment: f32,
		cohesion: f32,
		boundary: f32,
		predator: f32,
	) -> Self {
		self.separation_weight = separation;
		self.alignment_weight = alignment;
		self.cohesion_weight = cohesion;
		self.boundary_weight = boundary;
		self.predator_weight = predator;
		self
	}

	pub fn danger_radius(&self) -> f32 {
		self.perception_radius * self.predator_danger_factor
	}

	pub fn predator_max_force(&self) -> f32 {
		self.max_force * self.predator_force_factor
	}

	/// Overwrites the fields that `params` sets.
	pub fn apply(&mut self, params: &FlockParams) {
		let FlockParams {
			separation_weight,
			alignment_weight,
			cohesion_weight,
			predator_weight,
			perception_radius,
			max_speed,
			max_force,
		} = *params;

		if let Some(value) = separation_weight {
			self.separation_weight = value;
		}
		if let Some(value) = alignment_weight {
			self.alignment_weight = value;
		}
		if let Some(value) = cohesion_weight {
			self.cohesion_weight = value;
		}
		if let Some(value) = predator_weight {
			self.predator_weight = value;
		}
		if let Some(value) = perception_radius {
			self.perception_radius = value;
		}
		if let Some(value) = max_speed {
			self.max_speed = value;
		}
		if let Some(value) = max_force {
			self.max_force = value;
		}
	}
}

/// Partial update of a running flock's tuning.
///
/// Inserted as a resource, changes are picked up by the flock plugin on the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct FlockParams {
	pub separation_weight: Option<f32>,
	pub alignment_weight: Option<f32>,
	pub cohesion_weight: Option<f32>,
	pub predator_weight: Option<f32>,
	pub perception_radius: Option<f32>,
	pub max_speed: Option<f32>,
	pub max_force: Option<f32>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_apply_only_touches_set_fields() {
		let mut config = FlockConfig::default();
		config.apply(&FlockParams {
			cohesion_weight: Some(3.0),
			max_speed: Some(2.0),
			..Default::default()
		});

		assert_eq!(config.cohesion_weight, 3.0);
		assert_eq!(config.max_speed, 2.0);
		assert_eq!(config.separation_weight, 1.5);
		assert_eq!(config.max_force, 0.2);
	}

	#[test]
	fn test_derived_limits() {
		let config = FlockConfig::default();
		assert!((config.danger_radius() - 4.5).abs() < 1e-6);
		assert!((config.predator_max_force() - 0.3).abs() < 1e-6);
	}
}
