use std::sync::Arc;

use tracing::debug;

use crate::render_model::RenderModel;
use crate::topology::compute_triangles;
use crate::V3;
use protocol::pr_model::{PrMesh, PrRope};
use protocol::sink::RenderSink;
use protocol::user_event::UpdateInfo;
use rope::config::RopeConfig;

/// Turns rope node positions into a tube mesh.
///
/// The triangle list is built on the first update and shared by every mesh
/// after that. Until then the mesher is not ready and rendering does
/// nothing.
pub struct TubeMesher {
	radius: f32,
	sides: usize,
	indices: Option<Arc<[u32]>>,
	node_len: usize,
	model: RenderModel,
}

impl TubeMesher {
	pub fn new(config: &RopeConfig) -> Self {
		Self {
			radius: config.rope_radius,
			sides: config.segment_sides,
			indices: None,
			node_len: 0,
			model: RenderModel::default(),
		}
	}

	pub fn is_ready(&self) -> bool {
		self.indices.is_some()
	}

	pub fn indices(&self) -> Option<&Arc<[u32]>> {
		self.indices.as_ref()
	}

	/// Recomputes the surface for `nodes`, relative to `anchor`. Fewer than
	/// two nodes cannot form a tube and are ignored.
	pub fn update(&mut self, anchor: V3, nodes: &[V3]) {
		if nodes.len() < 2 || self.sides < 3 {
			return;
		}
		if self.node_len != nodes.len() || self.indices.is_none() {
			let indices = compute_triangles(nodes.len(), self.sides);
			debug!(
				nodes = nodes.len(),
				sides = self.sides,
				triangles = indices.len() / 3,
				"tube topology built"
			);
			self.indices = Some(Arc::from(indices));
			self.node_len = nodes.len();
		}
		if let Some(indices) = &self.indices {
			self.model
				.rebuild(anchor, nodes, self.radius, self.sides, indices);
		}
	}

	pub fn update_from(&mut self, rope: &PrRope) {
		self.update(rope.anchor(), &rope.positions());
	}

	/// Current mesh, `None` before the first update.
	pub fn mesh(&self) -> Option<PrMesh> {
		let indices = self.indices.clone()?;
		self.model.to_pr_mesh(indices)
	}

	/// Hands the current mesh to `sink`. Returns false, without touching the
	/// sink, while not ready.
	pub fn render(&self, sink: &mut dyn RenderSink, info: UpdateInfo) -> bool {
		match self.mesh() {
			Some(mesh) => {
				sink.submit(mesh, info);
				true
			}
			None => false,
		}
	}
}
