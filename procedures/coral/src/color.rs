use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Uniform jitter in HSL space, each field the full width of the delta range.
///
/// Hue is measured in turns. Every channel clamps into its valid range instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorJitter {
	pub hue: f32,
	pub saturation: f32,
	pub lightness: f32,
}

impl Default for ColorJitter {
	fn default() -> Self {
		Self { hue: 0.1, saturation: 0.2, lightness: 0.1 }
	}
}

impl ColorJitter {
	pub fn none() -> Self {
		Self { hue: 0.0, saturation: 0.0, lightness: 0.0 }
	}

	pub fn apply<R: Rng + ?Sized>(&self, base: Color, rng: &mut R) -> Color {
		let hsla = Hsla::from(base);

		let turns = hsla.hue / 360.0 + (rng.gen::<f32>() - 0.5) * self.hue;
		let saturation = hsla.saturation + (rng.gen::<f32>() - 0.5) * self.saturation;
		let lightness = hsla.lightness + (rng.gen::<f32>() - 0.5) * self.lightness;

		Color::from(Hsla::new(
			turns.clamp(0.0, 1.0) * 360.0,
			saturation.clamp(0.0, 1.0),
			lightness.clamp(0.0, 1.0),
			hsla.alpha,
		))
	}
}
