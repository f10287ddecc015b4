use crate::agent::Agent;
use crate::bounds::BoundingVolume;
use crate::config::FlockConfig;
use bevy::prelude::*;

/// The separate behaviors acting on one agent during a tick, before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
	pub separation: Vec3,
	pub alignment: Vec3,
	pub cohesion: Vec3,
	pub boundary: Vec3,
	pub predator: Vec3,
}

impl SteeringForces {
	pub fn weighted(&self, config: &FlockConfig) -> Vec3 {
		self.separation * config.separation_weight
			+ self.alignment * config.alignment_weight
			+ self.cohesion * config.cohesion_weight
			+ self.boundary * config.boundary_weight
			+ self.predator * config.predator_weight
	}
}

/// Reynolds steering: full speed along `desired`, minus the current velocity, limited.
pub fn steer(desired: Vec3, velocity: Vec3, max_speed: f32, max_force: f32) -> Vec3 {
	(desired.normalize_or_zero() * max_speed - velocity).clamp_length_max(max_force)
}

pub fn separation(agent: &Agent, neighbors: &[&Agent], config: &FlockConfig) -> Vec3 {
	let radius = config.perception_radius * 0.5;
	let mut sum = Vec3::ZERO;
	let mut count = 0;

	for neighbor in neighbors {
		let distance = agent.position.distance(neighbor.position);
		if distance > 0.0 && distance < radius {
			sum += (agent.position - neighbor.position).normalize_or_zero() / distance;
			count += 1;
		}
	}

	if count == 0 {
		return Vec3::ZERO;
	}
	steer(sum / count as f32, agent.velocity, config.max_speed, config.max_force)
}

pub fn alignment(agent: &Agent, neighbors: &[&Agent], config: &FlockConfig) -> Vec3 {
	if neighbors.is_empty() {
		return Vec3::ZERO;
	}
	let average =
		neighbors.iter().map(|neighbor| neighbor.velocity).sum::<Vec3>() / neighbors.len() as f32;
	steer(average, agent.velocity, config.max_speed, config.max_force)
}

pub fn cohesion(agent: &Agent, neighbors: &[&Agent], config: &FlockConfig) -> Vec3 {
	if neighbors.is_empty() {
		return Vec3::ZERO;
	}
	let centre =
		neighbors.iter().map(|neighbor| neighbor.position).sum::<Vec3>() / neighbors.len() as f32;
	steer(centre - agent.position, agent.velocity, config.max_speed, config.max_force)
}

pub fn boundary(agent: &Agent, bounds: &BoundingVolume, config: &FlockConfig) -> Vec3 {
	let push = bounds.avoidance(agent.position, config.boundary_margin);
	if push == Vec3::ZERO {
		return Vec3::ZERO;
	}
	steer(push, agent.velocity, config.max_speed, config.max_force)
}

/// Flee every threat inside the danger radius, closer threats weighing quadratically more.
pub fn predator(agent: &Agent, threats: &[Vec3], config: &FlockConfig) -> Vec3 {
	let danger = config.danger_radius();
	let mut flee = Vec3::ZERO;

	for threat in threats {
		let distance = agent.position.distance(*threat);
		if distance > 0.0 && distance < danger {
			let urgency = 1.0 - distance / danger;
			flee += (agent.position - *threat).normalize_or_zero() * urgency * urgency;
		}
	}

	if flee == Vec3::ZERO {
		return Vec3::ZERO;
	}
	steer(flee, agent.velocity, config.max_speed, config.predator_max_force())
}
