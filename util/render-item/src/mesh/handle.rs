use crate::mesh::{cache::HandleMap, IdentifiedMesh, MeshBuilder, MeshFetcher, MeshId};
use bevy::prelude::*;

#[derive(Debug, Clone, Component)]
pub struct MeshHandle<T: MeshBuilder + IdentifiedMesh> {
	handle_cache: HandleMap<T>,
	builder: T,
}

impl<T: MeshBuilder + IdentifiedMesh> MeshHandle<T> {
	pub fn new(builder: T) -> Self {
		Self { handle_cache: HandleMap::new(), builder }
	}

	pub fn with_handle_cache(mut self, handle_cache: HandleMap<T>) -> Self {
		self.handle_cache = handle_cache;
		self
	}

	pub fn builder(&self) -> &T {
		&self.builder
	}
}

impl<T: MeshBuilder + IdentifiedMesh> IdentifiedMesh for MeshHandle<T> {
	fn id(&self) -> MeshId {
		self.builder.id()
	}
}

impl<T: MeshBuilder + IdentifiedMesh> MeshFetcher for MeshHandle<T> {
	fn fetch_mesh(&self, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
		if let Some(handle) = self.handle_cache.get(&self.builder) {
			return handle;
		}

		let handle = meshes.add(self.builder.build_mesh());
		log::info!("Adding mesh {} to assets", self.builder.id().as_str());
		self.handle_cache.insert(&self.builder, handle.clone());
		handle
	}
}
