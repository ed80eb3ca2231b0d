use crate::collision::CollisionProvider;
use crate::node::Node;

// pushes slightly past the surface so a node does not sit on the boundary
const PUSH_OUT: f32 = 1.01;

/// Push one node out of every solid collider it overlaps.
///
/// Colliders are handled one after another in query order, each seeing the
/// position left by the previous one. Resolving the first contact can leave
/// the node inside a second collider; the next pass picks that up.
pub fn resolve_node(node: &mut Node, radius: f32, collision: &dyn CollisionProvider) {
	let colliders = match collision.overlap(node.get_pos(), radius) {
		Ok(colliders) => colliders,
		Err(_) => return,
	};
	for collider in colliders.into_iter().filter(|c| !c.is_trigger()) {
		let dp = node.get_pos() - collider.closest_point(node.get_pos());
		let l = dp.magnitude();
		if l > 0.0 && l < radius {
			node.add_pos(dp / l * ((radius - l) * PUSH_OUT));
		}
	}
}

#[cfg(not(debug_assertions))]
pub fn resolve_collisions(nodes: &mut [Node], radius: f32, collision: &dyn CollisionProvider) {
	use rayon::prelude::*;
	nodes
		.par_iter_mut()
		.for_each(|node| resolve_node(node, radius, collision));
}

#[cfg(debug_assertions)]
pub fn resolve_collisions(nodes: &mut [Node], radius: f32, collision: &dyn CollisionProvider) {
	nodes
		.iter_mut()
		.for_each(|node| resolve_node(node, radius, collision));
}
