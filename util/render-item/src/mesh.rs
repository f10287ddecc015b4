pub mod cache;
pub mod handle;
pub mod surface;

use bevy::prelude::*;
use std::hash::Hash;

pub use cache::HandleMap;
pub use handle::MeshHandle;
pub use surface::SurfaceMesh;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeshId(String);

impl MeshId {
	pub fn new(id: String) -> Self {
		Self(id)
	}

	pub fn with_suffix(&self, suffix: &str) -> Self {
		Self(format!("{}{}", self.0, suffix))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

pub trait IdentifiedMesh {
	fn id(&self) -> MeshId;
}

pub trait MeshBuilder: Clone {
	/// Builds the renderable mesh.
	///
	/// Builders are expected to have validated their inputs on construction, so this cannot fail.
	fn build_mesh(&self) -> Mesh;
}

pub trait MeshFetcher: IdentifiedMesh {
	/// Builds mesh if it doesn't exist or fetches from the assets. Returns the handle to the mesh.
	fn fetch_mesh(&self, meshes: &mut Assets<Mesh>) -> Handle<Mesh>;
}
