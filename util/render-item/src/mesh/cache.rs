use crate::mesh::{IdentifiedMesh, MeshId};
use bevy::prelude::*;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MeshKey<T: IdentifiedMesh> {
	mesh_id: MeshId,
	phantom: std::marker::PhantomData<T>,
}

impl<T: IdentifiedMesh> PartialEq for MeshKey<T> {
	fn eq(&self, other: &Self) -> bool {
		self.mesh_id == other.mesh_id
	}
}

impl<T: IdentifiedMesh> Eq for MeshKey<T> {}

impl<T: IdentifiedMesh> Hash for MeshKey<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.mesh_id.hash(state);
	}
}

impl<T: IdentifiedMesh> MeshKey<T> {
	pub fn new(mesh_id: MeshId) -> Self {
		Self { mesh_id, phantom: std::marker::PhantomData }
	}
}

/// Shared map from mesh identity to an already uploaded mesh handle.
///
/// Clones share the same underlying map, so a single cache can be handed to every builder of the
/// same kind (e.g. every fish of a flock).
#[derive(Debug, Clone)]
pub struct HandleMap<T: IdentifiedMesh> {
	cache: Arc<RwLock<HashMap<MeshKey<T>, Handle<Mesh>>>>,
}

impl<T: IdentifiedMesh> HandleMap<T> {
	pub fn new() -> Self {
		Self { cache: Arc::new(RwLock::new(HashMap::new())) }
	}

	pub fn get(&self, mesh_builder: &T) -> Option<Handle<Mesh>> {
		let cache = self.cache.read().ok()?;
		cache.get(&MeshKey::new(mesh_builder.id())).cloned()
	}

	pub fn insert(&self, mesh_builder: &T, mesh: Handle<Mesh>) {
		match self.cache.write() {
			Ok(mut cache) => {
				cache.insert(MeshKey::new(mesh_builder.id()), mesh);
			}
			Err(_) => log::warn!("Mesh handle cache is poisoned, skipping insert"),
		}
	}

	pub fn len(&self) -> usize {
		self.cache.read().map(|cache| cache.len()).unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T: IdentifiedMesh> Default for HandleMap<T> {
	fn default() -> Self {
		Self::new()
	}
}
