use crate::agent::Agent;
use crate::bounds::BoundingVolume;
use crate::config::{FlockConfig, FlockParams};
use crate::predator::PredatorRegistry;
use crate::steering::{self, SteeringForces};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Prey spawn inside this fraction of the bounding half extents.
const PREY_SPAWN_FRACTION: Vec3 = Vec3::new(0.25 / 0.45, 0.15 / 0.35, 0.25 / 0.45);

/// Predators spawn across the whole floor plan, biased toward the surface.
const PREDATOR_SPAWN_DEPTH: (f32, f32) = (-0.2 / 0.35, 0.3 / 0.35);

/// Per-frame boids integrator over a set of prey and predator agents.
///
/// Neighbor search is brute force. All steering is computed from the state at the start of a
/// tick before any agent moves, so the outcome does not depend on agent order.
#[derive(Debug, Clone)]
pub struct BoidsEngine {
	config: FlockConfig,
	bounds: BoundingVolume,
	agents: Vec<Agent>,
}

impl BoidsEngine {
	pub fn new(config: FlockConfig, bounds: BoundingVolume) -> Self {
		Self { config, bounds, agents: Vec::new() }
	}

	pub fn config(&self) -> &FlockConfig {
		&self.config
	}

	pub fn set_params(&mut self, params: &FlockParams) {
		self.config.apply(params);
		log::debug!("Flock parameters updated: {:?}", params);
	}

	pub fn bounds(&self) -> &BoundingVolume {
		&self.bounds
	}

	pub fn set_bounds(&mut self, bounds: BoundingVolume) {
		self.bounds = bounds;
	}

	pub fn agents(&self) -> &[Agent] {
		&self.agents
	}

	pub fn agents_mut(&mut self) -> &mut [Agent] {
		&mut self.agents
	}

	/// Adds an agent and returns its index.
	pub fn push(&mut self, agent: Agent) -> usize {
		self.agents.push(agent);
		self.agents.len() - 1
	}

	pub fn prey_count(&self) -> usize {
		self.agents.iter().filter(|agent| !agent.is_predator).count()
	}

	/// Scatters `count` prey near the middle of the volume, all heading along +X.
	pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<usize> {
		let extent = self.bounds.half_extents() * PREY_SPAWN_FRACTION;
		let indices = (0..count)
			.map(|_| {
				let position = Vec3::new(
					rng.gen_range(-extent.x..=extent.x),
					rng.gen_range(-extent.y..=extent.y),
					rng.gen_range(-extent.z..=extent.z),
				);
				let agent = Agent::prey(position, Vec3::X)
					.with_swim_speed(rng.gen_range(0.5..1.1))
					.with_scale(rng.gen_range(0.7..1.0))
					.with_phase(rng.gen_range(0.0..TAU));
				self.push(agent)
			})
			.collect();

		log::info!("Populated flock with {} prey", count);
		indices
	}

	/// Adds `count` predators with random unit headings.
	pub fn add_predators<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<usize> {
		let extent = self.bounds.half_extents();
		let indices = (0..count)
			.map(|_| {
				let position = Vec3::new(
					rng.gen_range(-extent.x..=extent.x),
					rng.gen_range(PREDATOR_SPAWN_DEPTH.0 * extent.y..=PREDATOR_SPAWN_DEPTH.1 * extent.y),
					rng.gen_range(-extent.z..=extent.z),
				);
				let heading = Vec3::new(
					rng.gen_range(-1.0..=1.0),
					rng.gen_range(-0.5..=0.5),
					rng.gen_range(-1.0..=1.0),
				)
				.try_normalize()
				.unwrap_or(Vec3::X);

				let agent = Agent::predator(position, heading).with_phase(rng.gen_range(0.0..TAU));
				self.push(agent)
			})
			.collect();

		log::info!("Added {} predators to the flock", count);
		indices
	}

	/// Other prey within the perception radius of agent `index`.
	pub fn neighbors(&self, index: usize) -> Vec<usize> {
		let Some(agent) = self.agents.get(index) else {
			return Vec::new();
		};
		let radius = self.config.perception_radius;

		self.agents
			.iter()
			.enumerate()
			.filter(|(other_index, other)| {
				*other_index != index
					&& !other.is_predator
					&& agent.position.distance(other.position) < radius
			})
			.map(|(other_index, _)| other_index)
			.collect()
	}

	/// Positions every prey flees from: predator agents and registered threats.
	pub fn threats(&self, registry: &PredatorRegistry) -> Vec<Vec3> {
		self.agents
			.iter()
			.filter(|agent| agent.is_predator)
			.map(|agent| agent.position)
			.chain(registry.positions())
			.collect()
	}

	/// Unweighted behaviors acting on agent `index` in the current state.
	pub fn steering(&self, index: usize, threats: &[Vec3]) -> SteeringForces {
		let Some(agent) = self.agents.get(index) else {
			return SteeringForces::default();
		};
		let neighbors: Vec<&Agent> =
			self.neighbors(index).into_iter().map(|other| &self.agents[other]).collect();

		SteeringForces {
			separation: steering::separation(agent, &neighbors, &self.config),
			alignment: steering::alignment(agent, &neighbors, &self.config),
			cohesion: steering::cohesion(agent, &neighbors, &self.config),
			boundary: steering::boundary(agent, &self.bounds, &self.config),
			predator: steering::predator(agent, threats, &self.config),
		}
	}

	/// Advances every agent by `dt` seconds.
	pub fn tick(&mut self, dt: f32, registry: &PredatorRegistry) {
		let dt = if dt > 0.0 && dt < 1.0 {
			dt
		} else {
			log::warn!("Frame delta {} out of range, using {}", dt, self.config.fallback_dt);
			self.config.fallback_dt
		};

		let threats = self.threats(registry);
		let forces: Vec<Option<Vec3>> = (0..self.agents.len())
			.map(|index| {
				(!self.agents[index].is_predator)
					.then(|| self.steering(index, &threats).weighted(&self.config))
			})
			.collect();

		let config = &self.config;
		let bounds = &self.bounds;
		for (agent, force) in self.agents.iter_mut().zip(forces) {
			match force {
				Some(force) => integrate_prey(agent, force, dt, config, bounds),
				None => integrate_predator(agent, dt, config, bounds),
			}
		}
	}
}

fn vertical_damping(config: &FlockConfig) -> Vec3 {
	Vec3::new(1.0, config.vertical_scale, 1.0)
}

fn integrate_prey(
	agent: &mut Agent,
	force: Vec3,
	dt: f32,
	config: &FlockConfig,
	bounds: &BoundingVolume,
) {
	agent.acceleration = (agent.acceleration + force).clamp_length_max(config.max_force);
	agent.velocity = (agent.velocity + agent.acceleration).clamp_length_max(config.max_speed);
	agent.position += agent.velocity * agent.swim_speed * dt * vertical_damping(config);

	bounds.reflect(&mut agent.position, &mut agent.velocity, config.restitution);
	agent.ease_yaw();
	agent.acceleration = Vec3::ZERO;
}

fn integrate_predator(agent: &mut Agent, dt: f32, config: &FlockConfig, bounds: &BoundingVolume) {
	let speed = agent.swim_speed * config.predator_speed_factor;
	agent.position += agent.velocity * speed * dt * vertical_damping(config);

	bounds.reflect(&mut agent.position, &mut agent.velocity, config.predator_restitution);
	agent.ease_yaw();
}
