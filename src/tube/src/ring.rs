use std::f32::consts::TAU;

use crate::V3;

// |tangent.z| above this is too close to the reference axis
const PARALLEL_LIMIT: f32 = 0.99;

/// Orthonormal frame of one ring: the tangent along the rope and two
/// vectors spanning the ring plane, with `second = tangent x first`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingFrame {
	pub tangent: V3,
	pub first: V3,
	pub second: V3,
}

impl RingFrame {
	/// Builds the ring plane from world Z, or world X when the tangent runs
	/// along Z. A zero tangent is taken as straight down.
	pub fn from_tangent(tangent: V3) -> Self {
		let tangent = tangent.try_normalize(f32::EPSILON).unwrap_or(-V3::y());
		let reference = if tangent.z.abs() > PARALLEL_LIMIT {
			V3::x()
		} else {
			V3::z()
		};
		let first = tangent.cross(&reference).normalize();
		let second = tangent.cross(&first);
		Self {
			tangent,
			first,
			second,
		}
	}

	/// Unit direction of ring vertex `j` out of `sides`.
	pub fn direction(&self, j: usize, sides: usize) -> V3 {
		let (sin, cos) = (TAU * j as f32 / sides as f32).sin_cos();
		self.first * cos + self.second * sin
	}

	/// Writes one ring around `center`. `dirs` receives the outward unit
	/// directions, `ring` the vertex positions.
	pub fn place(&self, center: V3, radius: f32, ring: &mut [V3], dirs: &mut [V3]) {
		let sides = ring.len();
		for (j, (v, d)) in ring.iter_mut().zip(dirs.iter_mut()).enumerate() {
			*d = self.direction(j, sides);
			*v = center + *d * radius;
		}
	}
}

/// One frame per node. The tangent points to the next node; the last node
/// reuses the direction of the last segment. Where neighbours coincide the
/// previous usable tangent carries over.
pub fn ring_frames(nodes: &[V3]) -> Vec<RingFrame> {
	let last = nodes.len().saturating_sub(1);
	let mut tangent = -V3::y();
	(0..nodes.len())
		.map(|i| {
			let d = if i < last {
				nodes[i + 1] - nodes[i]
			} else if i > 0 {
				nodes[i] - nodes[i - 1]
			} else {
				V3::zeros()
			};
			if let Some(t) = d.try_normalize(f32::EPSILON) {
				tangent = t;
			}
			RingFrame::from_tangent(tangent)
		})
		.collect()
}

/// Ring vertices for every node, `sides` per ring, ring `i` first.
pub fn compute_vertices(
	nodes: &[V3],
	radius: f32,
	sides: usize,
	positions: &mut Vec<V3>,
	dirs: &mut Vec<V3>,
) {
	let frames = ring_frames(nodes);
	positions.resize(nodes.len() * sides, V3::zeros());
	dirs.resize(nodes.len() * sides, V3::zeros());
	if sides == 0 {
		return;
	}
	fill_rings(nodes, &frames, radius, sides, positions, dirs);
}

#[cfg(not(debug_assertions))]
fn fill_rings(
	nodes: &[V3],
	frames: &[RingFrame],
	radius: f32,
	sides: usize,
	positions: &mut [V3],
	dirs: &mut [V3],
) {
	use rayon::prelude::*;
	positions
		.par_chunks_mut(sides)
		.zip(dirs.par_chunks_mut(sides))
		.zip(nodes.par_iter().zip(frames.par_iter()))
		.for_each(|((ring, ring_dirs), (node, frame))| {
			frame.place(*node, radius, ring, ring_dirs)
		});
}

#[cfg(debug_assertions)]
fn fill_rings(
	nodes: &[V3],
	frames: &[RingFrame],
	radius: f32,
	sides: usize,
	positions: &mut [V3],
	dirs: &mut [V3],
) {
	positions
		.chunks_mut(sides)
		.zip(dirs.chunks_mut(sides))
		.zip(nodes.iter().zip(frames.iter()))
		.for_each(|((ring, ring_dirs), (node, frame))| {
			frame.place(*node, radius, ring, ring_dirs)
		});
}
