use crate::color::ColorJitter;
use crate::error::GrowthError;
use crate::grammar::{Grammar, GrowthLimits};
use crate::grower::LSystemGrower;
use crate::render::CoralSegmentMesh;
use crate::skeleton::CoralSkeleton;
use crate::turtle::TurtleConfig;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use render_item::mesh::HandleMap;
use serde::{Deserialize, Serialize};

/// Configuration for coral forest generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoralForestConfig {
	/// sRGB components of the color every coral is jittered from
	pub base_color: [f32; 3],
	/// Height of every coral root (Y coordinate)
	pub base_height: f32,
	pub size: f32,
	/// Size multiplier range (min, max)
	pub size_jitter: (f32, f32),
	/// Scale applied to every skeleton on top of its size
	pub skeleton_scale: f32,
	/// Grammar iterations range (min, max), inclusive
	pub iterations: (usize, usize),
	pub color_jitter: ColorJitter,
	pub turtle: TurtleConfig,
	pub limits: GrowthLimits,
}

impl Default for CoralForestConfig {
	fn default() -> Self {
		Self {
			base_color: [1.0, 0.4, 0.6],
			base_height: -2.0,
			size: 1.0,
			size_jitter: (0.8, 1.2),
			skeleton_scale: 0.55,
			iterations: (3, 4),
			color_jitter: ColorJitter::default(),
			turtle: TurtleConfig::default(),
			limits: GrowthLimits::default(),
		}
	}
}

impl CoralForestConfig {
	pub fn with_base_color(mut self, color: Color) -> Self {
		let srgba = Srgba::from(color);
		self.base_color = [srgba.red, srgba.green, srgba.blue];
		self
	}

	pub fn with_base_height(mut self, base_height: f32) -> Self {
		self.base_height = base_height;
		self
	}

	pub fn with_size(mut self, size: f32) -> Self {
		self.size = size;
		self
	}

	pub fn with_iterations(mut self, min: usize, max: usize) -> Self {
		self.iterations = (min, max);
		self
	}

	pub fn with_color_jitter(mut self, color_jitter: ColorJitter) -> Self {
		self.color_jitter = color_jitter;
		self
	}

	pub fn base_color(&self) -> Color {
		let [red, green, blue] = self.base_color;
		Color::srgb(red, green, blue)
	}
}

/// A grown coral and where it stands.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCoral {
	pub skeleton: CoralSkeleton,
	/// Position on the bed, yaw and uniform scale.
	pub root: Transform,
	pub color: Color,
}

impl PlacedCoral {
	pub fn instance_transforms(&self) -> impl Iterator<Item = Transform> + '_ {
		self.skeleton.segments().iter().map(|segment| self.root.mul_transform(segment.transform()))
	}
}

/// Everything drawn from the caller's RNG for one coral, before it is grown.
struct CoralPlan {
	root: Transform,
	color: Color,
	iterations: usize,
	seed: u64,
}

#[derive(Debug, Clone)]
pub struct CoralForest {
	config: CoralForestConfig,
	grower: LSystemGrower,
	corals: Vec<PlacedCoral>,
	segment_cache: HandleMap<CoralSegmentMesh>,
}

impl CoralForest {
	pub fn new(config: CoralForestConfig) -> Self {
		let grower = LSystemGrower::new(Grammar::coral())
			.with_turtle(config.turtle.clone())
			.with_limits(config.limits.clone());
		Self { config, grower, corals: Vec::new(), segment_cache: HandleMap::new() }
	}

	pub fn with_grammar(mut self, grammar: Grammar) -> Self {
		self.grower = LSystemGrower::new(grammar)
			.with_turtle(self.config.turtle.clone())
			.with_limits(self.config.limits.clone());
		self
	}

	pub fn with_segment_cache(mut self, segment_cache: HandleMap<CoralSegmentMesh>) -> Self {
		self.segment_cache = segment_cache;
		self
	}

	pub fn config(&self) -> &CoralForestConfig {
		&self.config
	}

	pub fn corals(&self) -> &[PlacedCoral] {
		&self.corals
	}

	pub fn segment_cache(&self) -> &HandleMap<CoralSegmentMesh> {
		&self.segment_cache
	}

	fn plan<R: Rng + ?Sized>(&self, position: Vec3, rng: &mut R) -> CoralPlan {
		let color = self.config.color_jitter.apply(self.config.base_color(), rng);

		let (low, high) = self.config.size_jitter;
		let size = self.config.size * if high > low { rng.gen_range(low..high) } else { low };

		let (min, max) = self.config.iterations;
		let iterations = rng.gen_range(min..=max.max(min));
		let yaw = rng.gen_range(0.0..std::f32::consts::TAU);

		let root = Transform::from_translation(Vec3::new(
			position.x,
			self.config.base_height,
			position.z,
		))
		.with_rotation(Quat::from_rotation_y(yaw))
		.with_scale(Vec3::splat(size * self.config.skeleton_scale));

		CoralPlan { root, color, iterations, seed: rng.gen() }
	}

	/// Grows one coral per position (only x and z are used) and adds them to the forest.
	///
	/// Placement, color and size are drawn from `rng` in order; every coral then grows from its
	/// own seeded stream, so the skeletons can grow in parallel and still be reproducible.
	pub fn grow<R: Rng + ?Sized>(
		&mut self,
		positions: &[Vec3],
		rng: &mut R,
	) -> Result<&[PlacedCoral], GrowthError> {
		let plans: Vec<CoralPlan> =
			positions.iter().map(|position| self.plan(*position, rng)).collect();

		let grower = &self.grower;
		let skeletons = plans
			.par_iter()
			.map(|plan| grower.grow(plan.iterations, &mut ChaCha8Rng::seed_from_u64(plan.seed)))
			.collect::<Result<Vec<_>, _>>()?;

		let start = self.corals.len();
		self.corals.extend(plans.into_iter().zip(skeletons).map(|(plan, skeleton)| PlacedCoral {
			skeleton,
			root: plan.root,
			color: plan.color,
		}));

		let grown = &self.corals[start..];
		log::info!(
			"Grew {} corals with {} segments",
			grown.len(),
			grown.iter().map(|coral| coral.skeleton.segment_count()).sum::<usize>()
		);

		Ok(grown)
	}

	/// Drops every coral, then grows a fresh forest at `positions`.
	pub fn rebuild<R: Rng + ?Sized>(
		&mut self,
		positions: &[Vec3],
		rng: &mut R,
	) -> Result<&[PlacedCoral], GrowthError> {
		self.corals.clear();
		self.grow(positions, rng)
	}

	pub fn segment_count(&self) -> usize {
		self.corals.iter().map(|coral| coral.skeleton.segment_count()).sum()
	}

	/// Forest space transforms of every segment of every coral.
	pub fn instance_transforms(&self) -> Vec<Transform> {
		self.corals.iter().flat_map(PlacedCoral::instance_transforms).collect()
	}
}
