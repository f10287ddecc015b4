use crate::anatomy::OrganismProfile;
use crate::body::{BodyLoft, BodyLoftConfig, BodyMesh};
use crate::error::GeometryError;
use crate::fin::{FinBuilder, FinConfig, FinMesh, FinSide};
use bevy::prelude::*;
use render_item::mesh::{IdentifiedMesh, MeshBuilder, MeshId, SurfaceMesh};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganismBuilder {
	body: BodyLoft,
	fins: FinBuilder,
}

impl OrganismBuilder {
	pub fn new(body: BodyLoftConfig, fins: FinConfig) -> Self {
		Self { body: BodyLoft::new(body), fins: FinBuilder::new(fins) }
	}

	/// Lofts the body and attaches every fin of the profile to it.
	pub fn build(&self, profile: &OrganismProfile) -> Result<OrganismMesh, GeometryError> {
		let body = self.body.loft(&profile.top, &profile.bottom, &profile.side, &profile.tail)?;

		let fins = profile
			.fins
			.iter()
			.map(|fin| {
				let spine = match fin.side {
					FinSide::Dorsal => body.top_profile(),
					FinSide::Ventral => body.bottom_profile(),
				};
				self.fins.build(spine, &fin.outline, fin.side)
			})
			.collect::<Result<Vec<_>, _>>()?;

		log::info!(
			"Built {} with {} body rings and {} fins",
			profile.name,
			body.ring_count(),
			fins.len()
		);

		Ok(OrganismMesh { name: profile.name.clone(), body, fins })
	}
}

/// A lofted body and its fins, ready to become a single mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganismMesh {
	name: String,
	body: BodyMesh,
	fins: Vec<FinMesh>,
}

impl OrganismMesh {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn body(&self) -> &BodyMesh {
		&self.body
	}

	pub fn fins(&self) -> &[FinMesh] {
		&self.fins
	}

	pub fn surface(&self) -> SurfaceMesh {
		let mut surface = self.body.to_surface();
		for fin in &self.fins {
			surface.append(&fin.to_surface());
		}
		surface
	}
}

impl IdentifiedMesh for OrganismMesh {
	fn id(&self) -> MeshId {
		MeshId::new(format!(
			"OrganismMesh({}, rings={}, resolution={}, fins={})",
			self.name,
			self.body.ring_count(),
			self.body.ring_resolution(),
			self.fins.iter().map(FinMesh::point_count).sum::<usize>()
		))
	}
}

impl MeshBuilder for OrganismMesh {
	fn build_mesh(&self) -> Mesh {
		self.surface().to_mesh()
	}
}
