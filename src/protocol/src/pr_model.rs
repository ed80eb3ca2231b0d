// pr_model: rope state and mesh handed across threads for rendering

use std::sync::Arc;

use crate::vertex::Vertex;
use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrNode {
	pub pos: [f32; 3],
}

/// Node positions of one finished tick, anchor first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrRope {
	pub frame: u64,
	// load of the previous frame, see `UpdateInfo::load`
	pub load: f32,
	// worst segment length error, see `UpdateInfo::max_stretch`
	pub stretch: f32,
	pub anchor: [f32; 3],
	pub nodes: Vec<PrNode>,
}

impl PrRope {
	pub fn anchor(&self) -> V3 {
		self.anchor.into()
	}

	pub fn positions(&self) -> Vec<V3> {
		self.nodes.iter().map(|n| V3::from(n.pos)).collect()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	pub min: V3,
	pub max: V3,
}

impl Aabb {
	/// Smallest box containing every point, `None` for an empty set.
	pub fn from_points<'a>(points: impl IntoIterator<Item = &'a V3>) -> Option<Self> {
		let mut iter = points.into_iter();
		let first = *iter.next()?;
		let mut result = Self {
			min: first,
			max: first,
		};
		for p in iter {
			result.min = result.min.inf(p);
			result.max = result.max.sup(p);
		}
		Some(result)
	}

	pub fn center(&self) -> V3 {
		(self.min + self.max) * 0.5
	}

	pub fn size(&self) -> V3 {
		self.max - self.min
	}

	pub fn contains(&self, p: &V3) -> bool {
		(0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
	}
}

/// Tube surface ready for upload. Positions are relative to the anchor.
///
/// `indices` is shared between frames: the topology never changes for a
/// given rope, only the vertices do.
#[derive(Clone, Debug)]
pub struct PrMesh {
	pub vertices: Vec<Vertex>,
	pub indices: Arc<[u32]>,
	pub bounds: Aabb,
}

impl PrMesh {
	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}
}
