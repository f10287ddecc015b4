use anyhow::Context;
use bevy::prelude::*;
use coral::{CoralBedConfig, CoralForestConfig};
use flock::FlockConfig;
use organism::{BodyLoftConfig, FinConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct AquariumConfig {
	/// Edge of the tank the flock swims in
	pub cube_size: f32,
	pub fish_count: usize,
	pub shark_count: usize,
	/// Fish meshes are scaled by this times the tank size
	pub fish_scale: f32,
	pub shark_scale: f32,
	pub flock: FlockConfig,
	pub body: BodyLoftConfig,
	pub fins: FinConfig,
	pub corals: CoralForestConfig,
	pub bed: CoralBedConfig,
}

impl Default for AquariumConfig {
	fn default() -> Self {
		Self {
			cube_size: 15.0,
			fish_count: 15,
			shark_count: 2,
			fish_scale: 0.005,
			shark_scale: 0.04,
			flock: FlockConfig::default(),
			body: BodyLoftConfig::default(),
			fins: FinConfig::default(),
			corals: CoralForestConfig::default(),
			bed: CoralBedConfig::default(),
		}
	}
}

impl AquariumConfig {
	pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path)
			.with_context(|| format!("reading aquarium config {}", path.display()))?;
		Self::parse(&text).with_context(|| format!("parsing aquarium config {}", path.display()))
	}

	pub fn parse(text: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(text)?)
	}
}
