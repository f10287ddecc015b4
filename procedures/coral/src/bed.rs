use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Configuration for laying out coral positions on the sea floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoralBedConfig {
	/// Corner of the grid on the floor (x, z)
	pub anchor: [f32; 2],
	/// Grid spacing (smaller = denser)
	pub step_size: f32,
	/// Cells per side
	pub count: usize,
	/// Largest offset from a cell's corner, along each axis
	pub jitter: f32,
	/// Corals are placed where noise on the unit interval is above this threshold
	pub threshold: f32,
	/// Frequency of the placement noise
	pub frequency: f32,
	/// Seed for Perlin noise
	pub seed: u32,
}

impl Default for CoralBedConfig {
	fn default() -> Self {
		Self {
			anchor: [-5.0, -5.0],
			step_size: 1.25,
			count: 9,
			jitter: 0.4,
			threshold: 0.55,
			frequency: 0.35,
			seed: 42,
		}
	}
}

#[derive(Debug, Clone)]
pub struct CoralBed {
	config: CoralBedConfig,
	noise: Perlin,
}

impl CoralBed {
	pub fn new(config: CoralBedConfig) -> Self {
		let noise = Perlin::new(config.seed);
		Self { config, noise }
	}

	fn sample(&self, position: Vec3, layer: f64) -> f32 {
		let frequency = self.config.frequency as f64;
		self.noise.get([position.x as f64 * frequency, position.z as f64 * frequency, layer]) as f32
	}

	pub fn meets_threshold(&self, position: Vec3) -> bool {
		self.sample(position, 0.5) * 0.5 + 0.5 > self.config.threshold
	}

	/// Offsets a cell corner using two decorrelated noise layers.
	pub fn inner_noise(&self, position: Vec3) -> Vec3 {
		Vec3::new(
			self.sample(position, 17.3) * self.config.jitter,
			0.0,
			self.sample(position, -31.7) * self.config.jitter,
		)
	}

	/// Positions on the floor plane (y = 0) where corals should grow.
	pub fn positions(&self) -> Vec<Vec3> {
		let [anchor_x, anchor_z] = self.config.anchor;
		let anchor = Vec3::new(anchor_x, 0.0, anchor_z);

		let mut positions = Vec::new();
		for i in 0..self.config.count {
			for j in 0..self.config.count {
				let pre_position = anchor
					+ Vec3::new(i as f32 * self.config.step_size, 0.0, j as f32 * self.config.step_size);
				let position = pre_position + self.inner_noise(pre_position);

				if self.meets_threshold(position) {
					positions.push(position);
				}
			}
		}

		log::debug!("Coral bed kept {} of {} cells", positions.len(), self.config.count.pow(2));
		positions
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_threshold_bounds() {
		let everything = CoralBed::new(CoralBedConfig { threshold: -1.0, ..Default::default() });
		assert_eq!(everything.positions().len(), 81);

		let nothing = CoralBed::new(CoralBedConfig { threshold: 2.0, ..Default::default() });
		assert!(nothing.positions().is_empty());
	}

	#[test]
	fn test_positions_stay_near_their_cell() {
		let config = CoralBedConfig { threshold: -1.0, ..Default::default() };
		let bed = CoralBed::new(config.clone());

		for (index, position) in bed.positions().into_iter().enumerate() {
			let (i, j) = (index / config.count, index % config.count);
			let corner = Vec3::new(
				config.anchor[0] + i as f32 * config.step_size,
				0.0,
				config.anchor[1] + j as f32 * config.step_size,
			);
			let offset = position - corner;
			assert_eq!(offset.y, 0.0);
			assert!(offset.x.abs() <= config.jitter + 1e-4);
			assert!(offset.z.abs() <= config.jitter + 1e-4);
		}
	}

	#[test]
	fn test_same_seed_same_layout() {
		let a = CoralBed::new(CoralBedConfig::default()).positions();
		let b = CoralBed::new(CoralBedConfig::default()).positions();
		assert_eq!(a, b);
	}
}
