use aquarium_playground::{AquariumConfig, AquariumPlugin};
use bevy::prelude::*;

fn main() -> anyhow::Result<()> {
	let mut args = std::env::args().skip(1);

	// Parse seed from command line or use default
	let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(12345);
	let config = match args.next() {
		Some(path) => AquariumConfig::load(&path)?,
		None => AquariumConfig::default(),
	};

	println!("Starting aquarium playground with seed: {}", seed);

	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Aquarium Playground".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(AquariumPlugin { seed, config })
		.run();

	Ok(())
}
