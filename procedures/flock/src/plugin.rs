use crate::config::FlockParams;
use crate::engine::BoidsEngine;
use crate::predator::{PredatorRegistry, ThreatId};
use bevy::prelude::*;

/// The running simulation. Systems of [`FlockPlugin`] only run once this resource exists.
#[derive(Resource, Debug, Clone)]
pub struct Flock {
	pub engine: BoidsEngine,
	pub registry: PredatorRegistry,
}

impl Flock {
	pub fn new(engine: BoidsEngine) -> Self {
		Self { engine, registry: PredatorRegistry::new() }
	}
}

/// Root of a swimmer; its transform follows agent `index`.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlockMember {
	pub index: usize,
}

/// Body mesh of a swimmer, swaying with the wobble of agent `index`.
#[derive(Component, Debug, Clone, Copy)]
pub struct SwimWobble {
	pub index: usize,
}

/// Any entity the flock should flee from without being part of it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ThreatSource;

pub struct FlockPlugin;

impl Plugin for FlockPlugin {
	fn build(&self, app: &mut App) {
		app.add_systems(
			Update,
			(
				apply_flock_params.run_if(resource_exists_and_changed::<FlockParams>),
				track_threats,
				tick_flock,
				sync_members,
				apply_swim_wobble,
			)
				.chain()
				.run_if(resource_exists::<Flock>),
		);
	}
}

fn apply_flock_params(params: Res<FlockParams>, mut flock: ResMut<Flock>) {
	flock.engine.set_params(&params);
}

fn track_threats(
	mut flock: ResMut<Flock>,
	threats: Query<(Entity, &GlobalTransform), With<ThreatSource>>,
	mut removed: RemovedComponents<ThreatSource>,
) {
	for entity in removed.read() {
		flock.registry.remove(ThreatId::from(entity));
	}
	for (entity, transform) in &threats {
		flock.registry.insert(ThreatId::from(entity), transform.translation());
	}
}

fn tick_flock(time: Res<Time>, mut flock: ResMut<Flock>) {
	let Flock { engine, registry } = &mut *flock;
	engine.tick(time.delta_secs(), registry);
}

fn sync_members(flock: Res<Flock>, mut members: Query<(&FlockMember, &mut Transform)>) {
	for (member, mut transform) in &mut members {
		let Some(agent) = flock.engine.agents().get(member.index) else {
			continue;
		};
		transform.translation = agent.position;
		transform.rotation = agent.heading_rotation();
	}
}

fn apply_swim_wobble(
	time: Res<Time>,
	flock: Res<Flock>,
	mut bodies: Query<(&SwimWobble, &mut Transform), Without<FlockMember>>,
) {
	let elapsed = time.elapsed_secs();
	for (wobble, mut transform) in &mut bodies {
		if let Some(agent) = flock.engine.agents().get(wobble.index) {
			transform.rotation = agent.swim_wobble(elapsed);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::agent::Agent;
	use crate::bounds::BoundingVolume;
	use crate::config::FlockConfig;

	fn app_with_flock() -> App {
		let mut app = App::new();
		app.add_plugins(MinimalPlugins).add_plugins(FlockPlugin);

		let mut engine = BoidsEngine::new(FlockConfig::default(), BoundingVolume::from_cube(20.0));
		engine.push(Agent::prey(Vec3::new(1.0, 2.0, 3.0), Vec3::Z));
		app.insert_resource(Flock::new(engine));
		app
	}

	#[test]
	fn test_members_follow_agents() {
		let mut app = app_with_flock();
		let member = app.world_mut().spawn((FlockMember { index: 0 }, Transform::default())).id();

		app.update();

		let transform = app.world().entity(member).get::<Transform>().copied().unwrap_or_default();
		let flock = app.world().resource::<Flock>();
		assert_eq!(transform.translation, flock.engine.agents()[0].position);
	}

	#[test]
	fn test_threat_sources_are_registered_and_released() {
		let mut app = app_with_flock();
		let threat = app
			.world_mut()
			.spawn((ThreatSource, Transform::from_xyz(4.0, 0.0, 0.0), GlobalTransform::default()))
			.id();

		app.update();
		assert_eq!(app.world().resource::<Flock>().registry.len(), 1);

		app.world_mut().entity_mut(threat).remove::<ThreatSource>();
		app.update();
		assert!(app.world().resource::<Flock>().registry.is_empty());
	}

	#[test]
	fn test_threat_sources_leave_added_threats_alone() {
		let mut app = app_with_flock();
		let added = app.world_mut().resource_mut::<Flock>().registry.add(Vec3::X);
		let threat = app
			.world_mut()
			.spawn((ThreatSource, Transform::default(), GlobalTransform::default()))
			.id();

		app.update();
		assert_eq!(app.world().resource::<Flock>().registry.len(), 2);

		app.world_mut().despawn(threat);
		app.update();

		let registry = &app.world().resource::<Flock>().registry;
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.get(added), Some(Vec3::X));
	}

	#[test]
	fn test_params_resource_reaches_engine() {
		let mut app = app_with_flock();
		app.insert_resource(FlockParams { cohesion_weight: Some(0.0), ..Default::default() });

		app.update();
		assert_eq!(app.world().resource::<Flock>().engine.config().cohesion_weight, 0.0);
	}
}
