use bevy::prelude::*;

/// Plain vertex/index buffers for a triangle surface.
///
/// Procedural builders assemble into this first so the geometry can be inspected and tested
/// without a render world, then convert into a bevy [`Mesh`] with [`SurfaceMesh::to_mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
	pub positions: Vec<Vec3>,
	pub normals: Vec<Vec3>,
	pub uvs: Vec<Vec2>,
	pub indices: Vec<u32>,
}

impl SurfaceMesh {
	/// Builds a regular grid of `columns × rows` quads over row-major positions.
	///
	/// `positions` must hold `(columns + 1) * (rows + 1)` points, rows stacked one after the
	/// other. Normals are computed from the resulting triangles.
	pub fn quad_grid(positions: Vec<Vec3>, uvs: Vec<Vec2>, columns: usize, rows: usize) -> Self {
		debug_assert_eq!(positions.len(), (columns + 1) * (rows + 1));
		debug_assert_eq!(positions.len(), uvs.len());

		let stride = columns + 1;
		let mut indices = Vec::with_capacity(columns * rows * 6);
		for iy in 0..rows {
			for ix in 0..columns {
				let a = (ix + stride * iy) as u32;
				let b = (ix + stride * (iy + 1)) as u32;
				let c = (ix + 1 + stride * (iy + 1)) as u32;
				let d = (ix + 1 + stride * iy) as u32;

				indices.extend_from_slice(&[a, b, d, b, c, d]);
			}
		}

		let mut surface = Self { positions, normals: Vec::new(), uvs, indices };
		surface.compute_normals();
		surface
	}

	pub fn vertex_count(&self) -> usize {
		self.positions.len()
	}

	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}

	/// Area weighted smooth normals.
	///
	/// Vertices that only touch degenerate triangles (e.g. a collapsed tip) get a zero normal.
	pub fn compute_normals(&mut self) {
		let mut normals = vec![Vec3::ZERO; self.positions.len()];

		for triangle in self.indices.chunks_exact(3) {
			let (a, b, c) = (triangle[0] as usize, triangle[1] as usize, triangle[2] as usize);
			let (pa, pb, pc) = (self.positions[a], self.positions[b], self.positions[c]);

			let face = (pc - pb).cross(pa - pb);
			normals[a] += face;
			normals[b] += face;
			normals[c] += face;
		}

		self.normals = normals.into_iter().map(Vec3::normalize_or_zero).collect();
	}

	/// Appends another surface, offsetting its indices.
	pub fn append(&mut self, other: &SurfaceMesh) {
		let offset = self.positions.len() as u32;
		self.positions.extend_from_slice(&other.positions);
		self.normals.extend_from_slice(&other.normals);
		self.uvs.extend_from_slice(&other.uvs);
		self.indices.extend(other.indices.iter().map(|index| index + offset));
	}

	pub fn to_mesh(&self) -> Mesh {
		let positions: Vec<[f32; 3]> = self.positions.iter().map(|p| p.to_array()).collect();
		let normals: Vec<[f32; 3]> = self.normals.iter().map(|n| n.to_array()).collect();
		let uvs: Vec<[f32; 2]> = self.uvs.iter().map(|uv| uv.to_array()).collect();

		let mut mesh = Mesh::new(
			bevy::mesh::PrimitiveTopology::TriangleList,
			bevy::asset::RenderAssetUsages::default(),
		);
		mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
		mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
		mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
		mesh.insert_indices(bevy::mesh::Indices::U32(self.indices.clone()));
		mesh
	}
}

/// Default plane texture coordinates for a `columns × rows` grid: u left to right, v top to bottom.
pub fn plane_uvs(columns: usize, rows: usize) -> Vec<Vec2> {
	let mut uvs = Vec::with_capacity((columns + 1) * (rows + 1));
	for iy in 0..=rows {
		for ix in 0..=columns {
			uvs.push(Vec2::new(ix as f32 / columns as f32, 1.0 - iy as f32 / rows as f32));
		}
	}
	uvs
}

#[cfg(test)]
mod tests {
	use super::*;

	fn flat_grid(columns: usize, rows: usize) -> SurfaceMesh {
		let mut positions = Vec::new();
		for iy in 0..=rows {
			for ix in 0..=columns {
				positions.push(Vec3::new(ix as f32, -(iy as f32), 0.0));
			}
		}
		SurfaceMesh::quad_grid(positions, plane_uvs(columns, rows), columns, rows)
	}

	#[test]
	fn test_quad_grid_counts() {
		let surface = flat_grid(4, 3);
		assert_eq!(surface.vertex_count(), 20);
		assert_eq!(surface.triangle_count(), 4 * 3 * 2);
		assert_eq!(surface.normals.len(), 20);
	}

	#[test]
	fn test_flat_grid_normals_agree() {
		let surface = flat_grid(3, 2);
		let first = surface.normals[0];
		assert!((first.length() - 1.0).abs() < 1e-5);
		assert!(first.z.abs() > 0.99);
		for normal in &surface.normals {
			assert!(normal.abs_diff_eq(first, 1e-5));
		}
	}

	#[test]
	fn test_collapsed_vertices_get_zero_normal() {
		let positions = vec![Vec3::ZERO; 4];
		let surface = SurfaceMesh::quad_grid(positions, plane_uvs(1, 1), 1, 1);
		for normal in &surface.normals {
			assert_eq!(*normal, Vec3::ZERO);
		}
	}

	#[test]
	fn test_append_offsets_indices() {
		let mut surface = flat_grid(1, 1);
		let other = flat_grid(1, 1);
		surface.append(&other);

		assert_eq!(surface.vertex_count(), 8);
		assert_eq!(surface.triangle_count(), 4);
		assert!(surface.indices[6..].iter().all(|&index| index >= 4));
	}

	#[test]
	fn test_plane_uvs_corners() {
		let uvs = plane_uvs(2, 2);
		assert_eq!(uvs[0], Vec2::new(0.0, 1.0));
		assert_eq!(uvs[8], Vec2::new(1.0, 0.0));
	}

	#[test]
	fn test_to_mesh_keeps_vertex_count() {
		let surface = flat_grid(2, 2);
		let mesh = surface.to_mesh();
		assert_eq!(mesh.count_vertices(), surface.vertex_count());
	}
}
