use anyhow::Context;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod camera;
pub mod config;

use coral::{CoralBed, CoralForest};
use flock::{Agent, BoidsEngine, BoundingVolume, Flock, FlockMember, FlockPlugin, SwimWobble};
use organism::{OrganismBuilder, OrganismProfile};
use render_item::{
	mesh::{MeshFetcher, MeshHandle},
	RenderItem,
};

pub use config::AquariumConfig;

/// Seeded stream every startup system draws from, so a seed always gives the same tank.
#[derive(Resource)]
pub struct AquariumRng(pub ChaCha8Rng);

pub struct AquariumPlugin {
	pub seed: u64,
	pub config: AquariumConfig,
}

impl Plugin for AquariumPlugin {
	fn build(&self, app: &mut App) {
		app.add_plugins(FlockPlugin)
			.insert_resource(ClearColor(Color::srgb(0.04, 0.18, 0.32)))
			.insert_resource(self.config.clone())
			.insert_resource(AquariumRng(ChaCha8Rng::seed_from_u64(self.seed)))
			.add_systems(
				Startup,
				(camera::setup_camera, camera::setup_lighting, (setup_reef, setup_swimmers).chain()),
			);
	}
}

fn setup_reef(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	config: Res<AquariumConfig>,
	mut rng: ResMut<AquariumRng>,
) {
	if let Err(error) = spawn_reef(&mut commands, &mut meshes, &mut materials, &config, &mut rng.0)
	{
		log::error!("Failed to grow the reef: {:#}", error);
	}
}

fn spawn_reef(
	commands: &mut Commands,
	meshes: &mut Assets<Mesh>,
	materials: &mut Assets<StandardMaterial>,
	config: &AquariumConfig,
	rng: &mut ChaCha8Rng,
) -> anyhow::Result<()> {
	let positions = CoralBed::new(config.bed.clone()).positions();

	let mut forest = CoralForest::new(config.corals.clone());
	forest.grow(&positions, rng).context("growing coral forest")?;

	let entities = forest.spawn_render_items(commands, Transform::IDENTITY, meshes, materials);
	log::info!("Spawned {} corals ({} segments)", entities.len(), forest.segment_count());
	Ok(())
}

fn setup_swimmers(
	mut commands: Commands,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<StandardMaterial>>,
	config: Res<AquariumConfig>,
	mut rng: ResMut<AquariumRng>,
) {
	if let Err(error) =
		spawn_swimmers(&mut commands, &mut meshes, &mut materials, &config, &mut rng.0)
	{
		log::error!("Failed to spawn swimmers: {:#}", error);
	}
}

fn spawn_swimmers(
	commands: &mut Commands,
	meshes: &mut Assets<Mesh>,
	materials: &mut Assets<StandardMaterial>,
	config: &AquariumConfig,
	rng: &mut ChaCha8Rng,
) -> anyhow::Result<()> {
	let builder = OrganismBuilder::new(config.body.clone(), config.fins.clone());
	let fish = builder.build(&OrganismProfile::fish()).context("building fish mesh")?;
	let shark = builder.build(&OrganismProfile::shark()).context("building shark mesh")?;

	let fish_mesh = MeshHandle::new(fish).fetch_mesh(meshes);
	let shark_mesh = MeshHandle::new(shark).fetch_mesh(meshes);

	// fins are single strips, so both faces have to render
	let fish_material = materials.add(StandardMaterial {
		base_color: Color::srgb(1.0, 0.55, 0.15),
		perceptual_roughness: 0.6,
		double_sided: true,
		cull_mode: None,
		..default()
	});
	let shark_material = materials.add(StandardMaterial {
		base_color: Color::srgb(0.45, 0.5, 0.55),
		perceptual_roughness: 0.8,
		double_sided: true,
		cull_mode: None,
		..default()
	});

	let mut engine =
		BoidsEngine::new(config.flock.clone(), BoundingVolume::from_cube(config.cube_size));
	let prey = engine.populate(config.fish_count, rng);
	let predators = engine.add_predators(config.shark_count, rng);

	let fish_scale = config.fish_scale * config.cube_size;
	for index in prey {
		spawn_swimmer(
			commands,
			index,
			&engine.agents()[index],
			fish_mesh.clone(),
			fish_material.clone(),
			fish_scale,
		);
	}

	let shark_scale = config.shark_scale * config.cube_size;
	for index in predators {
		spawn_swimmer(
			commands,
			index,
			&engine.agents()[index],
			shark_mesh.clone(),
			shark_material.clone(),
			shark_scale,
		);
	}

	commands.insert_resource(Flock::new(engine));
	Ok(())
}

fn spawn_swimmer(
	commands: &mut Commands,
	index: usize,
	agent: &Agent,
	mesh: Handle<Mesh>,
	material: Handle<StandardMaterial>,
	base_scale: f32,
) {
	commands
		.spawn((
			FlockMember { index },
			Transform::from_translation(agent.position).with_rotation(agent.heading_rotation()),
			Visibility::default(),
		))
		.with_children(|parent| {
			parent.spawn((
				SwimWobble { index },
				Mesh3d(mesh),
				MeshMaterial3d(material),
				Transform::from_scale(Vec3::splat(agent.scale * base_scale)),
			));
		});
}
