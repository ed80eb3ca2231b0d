/// Triangle list joining ring `i` to ring `i + 1` for every segment.
///
/// Ring `i` owns vertices `i * sides .. (i + 1) * sides`. Each quad is split
/// into two triangles wound counter-clockwise seen from outside the tube,
/// given rings laid out by `RingFrame::place`. Depends only on the counts, so
/// it is built once per rope and shared by every frame.
pub fn compute_triangles(node_count: usize, sides: usize) -> Vec<u32> {
	let segments = node_count.saturating_sub(1);
	let mut result = Vec::with_capacity(segments * sides * 6);
	for i in 0..segments {
		for j in 0..sides {
			let jn = (j + 1) % sides;
			let a = (i * sides + j) as u32;
			let b = (i * sides + jn) as u32;
			let c = ((i + 1) * sides + j) as u32;
			let d = ((i + 1) * sides + jn) as u32;
			result.extend_from_slice(&[a, b, c, b, d, c]);
		}
	}
	result
}
