use std::sync::Arc;

use crate::ring::compute_vertices;
use crate::V3;
use protocol::pr_model::{Aabb, PrMesh};
use protocol::vertex::Vertex;

/// Tube surface of one frame, positions relative to the anchor.
#[derive(Clone, Debug, Default)]
pub struct RenderModel {
	pub positions: Vec<V3>,
	pub normals: Vec<V3>,
	// outward ring directions, used where a face normal is unusable
	dirs: Vec<V3>,
	local: Vec<V3>,
}

impl RenderModel {
	/// Rebuilds rings and normals for `nodes` seen from `anchor`.
	pub fn rebuild(&mut self, anchor: V3, nodes: &[V3], radius: f32, sides: usize, indices: &[u32]) {
		self.local.clear();
		self.local.extend(nodes.iter().map(|p| p - anchor));
		compute_vertices(&self.local, radius, sides, &mut self.positions, &mut self.dirs);
		vertex_normals(&self.positions, &self.dirs, indices, &mut self.normals);
	}

	pub fn bounds(&self) -> Option<Aabb> {
		Aabb::from_points(self.positions.iter())
	}

	pub fn to_pr_mesh(&self, indices: Arc<[u32]>) -> Option<PrMesh> {
		let bounds = self.bounds()?;
		let vertices = self
			.positions
			.iter()
			.zip(self.normals.iter())
			.map(|(p, n)| Vertex::new(*p, *n))
			.collect();
		Some(PrMesh {
			vertices,
			indices,
			bounds,
		})
	}
}

/// Smooth normals: each vertex sums the unnormalized normals of its faces,
/// so bigger faces weigh more. Vertices whose faces cancel out or are
/// degenerate fall back to `fallback`.
pub fn vertex_normals(positions: &[V3], fallback: &[V3], indices: &[u32], out: &mut Vec<V3>) {
	out.clear();
	out.resize(positions.len(), V3::zeros());
	for tri in indices.chunks_exact(3) {
		let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
		let n = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
		out[a] += n;
		out[b] += n;
		out[c] += n;
	}
	for (n, f) in out.iter_mut().zip(fallback.iter()) {
		*n = n.try_normalize(f32::EPSILON).unwrap_or(*f);
	}
}
