use crate::forest::CoralForest;
use bevy::prelude::*;
use render_item::mesh::{IdentifiedMesh, MeshBuilder, MeshFetcher, MeshHandle, MeshId};
use render_item::RenderItem;

/// Tapered open segment of unit height standing on the origin.
///
/// Every coral segment is an instance of this mesh, stretched to its length by its transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CoralSegmentMesh {
	radius_top: f32,
	radius_bottom: f32,
	resolution: u32,
}

impl Default for CoralSegmentMesh {
	fn default() -> Self {
		Self { radius_top: 0.028, radius_bottom: 0.045, resolution: 6 }
	}
}

impl CoralSegmentMesh {
	pub fn with_radii(mut self, radius_bottom: f32, radius_top: f32) -> Self {
		self.radius_bottom = radius_bottom;
		self.radius_top = radius_top;
		self
	}

	pub fn with_resolution(mut self, resolution: u32) -> Self {
		self.resolution = resolution;
		self
	}
}

impl IdentifiedMesh for CoralSegmentMesh {
	fn id(&self) -> MeshId {
		MeshId::new(format!("{:?}", self))
	}
}

impl MeshBuilder for CoralSegmentMesh {
	fn build_mesh(&self) -> Mesh {
		let frustum = ConicalFrustum {
			radius_top: self.radius_top,
			radius_bottom: self.radius_bottom,
			height: 1.0,
		};
		Mesh::from(frustum.mesh().resolution(self.resolution))
			.translated_by(Vec3::new(0.0, 0.5, 0.0))
	}
}

impl RenderItem for CoralForest {
	fn spawn_render_items<M: Material + From<Color>>(
		&self,
		commands: &mut Commands,
		transform: Transform,
		meshes: &mut Assets<Mesh>,
		materials: &mut Assets<M>,
	) -> Vec<Entity> {
		let segment = MeshHandle::new(CoralSegmentMesh::default())
			.with_handle_cache(self.segment_cache().clone());
		let mesh = segment.fetch_mesh(meshes);

		let mut entities = Vec::new();
		for coral in self.corals() {
			let material = materials.add(M::from(coral.color));
			let entity = commands
				.spawn((transform.mul_transform(coral.root), Visibility::default()))
				.with_children(|parent| {
					for instance in coral.skeleton.segments() {
						parent.spawn((
							Mesh3d(mesh.clone()),
							MeshMaterial3d(material.clone()),
							instance.transform(),
						));
					}
				})
				.id();
			entities.push(entity);
		}
		entities
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_segment_stands_on_origin() {
		let mesh = CoralSegmentMesh::default().build_mesh();
		let Some(positions) = mesh.attribute(Mesh::ATTRIBUTE_POSITION).and_then(|a| a.as_float3())
		else {
			panic!("segment mesh has no positions");
		};

		let (min, max) = positions.iter().fold((f32::MAX, f32::MIN), |(min, max), p| {
			(min.min(p[1]), max.max(p[1]))
		});
		assert!(min.abs() < 1e-5);
		assert!((max - 1.0).abs() < 1e-5);
	}

	#[test]
	fn test_segment_ids_follow_shape() {
		let thin = CoralSegmentMesh::default();
		let thick = CoralSegmentMesh::default().with_radii(0.1, 0.08);
		assert_ne!(thin.id(), thick.id());
		assert_eq!(thin.id(), CoralSegmentMesh::default().id());
	}
}
