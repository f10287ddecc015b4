pub mod mesh;

use bevy::prelude::*;

/// Used for logical items that will spawn their constituents into the world.
///
/// Implementors own the procedural data (skeletons, organism meshes, ...) and are responsible for
/// turning it into entities. Materials are derived from colors so that the item does not need to
/// know which material the caller renders with.
pub trait RenderItem {
	fn spawn_render_items<M: Material + From<Color>>(
		&self,
		commands: &mut Commands,
		transform: Transform,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<M>,
	) -> Vec<Entity>;
}
