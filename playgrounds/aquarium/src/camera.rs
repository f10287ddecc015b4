use bevy::prelude::*;
use std::f32::consts::PI;

pub fn setup_camera(mut commands: Commands) {
	let camera_pos = Vec3::new(0.0, 3.0, 16.0);
	let look_at = Vec3::new(0.0, -0.5, 0.0);

	log::info!("Setting up camera at position: {:?}, looking at: {:?}", camera_pos, look_at);

	commands.spawn((
		Camera3d::default(),
		Transform::from_translation(camera_pos).looking_at(look_at, Vec3::Y),
		Projection::Perspective(PerspectiveProjection { near: 0.1, far: 200.0, ..default() }),
	));
}

pub fn setup_lighting(mut commands: Commands) {
	commands.insert_resource(AmbientLight {
		color: Color::srgb(0.6, 0.8, 1.0),
		brightness: 400.0,
		affects_lightmapped_meshes: true,
	});

	// light filtering down through the water
	commands.spawn((
		DirectionalLight { illuminance: 8000.0, shadows_enabled: true, ..default() },
		Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 3.0, PI / 6.0, 0.0)),
	));
}
