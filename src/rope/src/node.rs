use crate::collision::CollisionProvider;
use crate::V3;
use protocol::pr_model::PrNode;

/// One point mass of the chain. Velocity is implicit in `pos - ppos`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	pub pos: V3,
	pub ppos: V3,
}

impl Node {
	pub fn new(pos: V3) -> Self {
		Self { pos, ppos: pos }
	}

	pub fn get_pos(&self) -> V3 {
		self.pos
	}

	pub fn add_pos(&mut self, dp: V3) {
		self.pos += dp
	}

	pub fn set_pos(&mut self, p: V3) {
		self.pos = p
	}

	pub fn reset_pos(&mut self, p: V3) {
		self.pos = p;
		self.ppos = p;
	}

	/// Displacement over the last substep.
	pub fn velocity_raw(&self) -> V3 {
		self.pos - self.ppos
	}

	/// Position Verlet step. The move is swept against `collision` so a fast
	/// node stops on a surface instead of passing through it.
	pub fn integrate(
		&mut self,
		gravity: V3,
		dt: f32,
		radius: f32,
		collision: &dyn CollisionProvider,
	) {
		let pos = self.pos;
		let mut new_pos = 2.0 * pos - self.ppos + gravity * (dt * dt);
		let dp = new_pos - pos;
		let dl = dp.magnitude();
		if dl > 0.0 {
			// failed queries count as a miss
			if let Ok(Some(hit)) = collision.sweep(pos, radius, dp / dl, dl) {
				new_pos = hit.point + hit.normal * radius;
			}
		}
		self.ppos = pos;
		self.pos = new_pos;
	}

	pub fn render(&self) -> PrNode {
		PrNode {
			pos: self.pos.into(),
		}
	}
}

#[cfg(not(debug_assertions))]
pub fn integrate_all(
	nodes: &mut [Node],
	gravity: V3,
	dt: f32,
	radius: f32,
	collision: &dyn CollisionProvider,
) {
	use rayon::prelude::*;
	nodes
		.par_iter_mut()
		.for_each(|node| node.integrate(gravity, dt, radius, collision));
}

#[cfg(debug_assertions)]
pub fn integrate_all(
	nodes: &mut [Node],
	gravity: V3,
	dt: f32,
	radius: f32,
	collision: &dyn CollisionProvider,
) {
	nodes
		.iter_mut()
		.for_each(|node| node.integrate(gravity, dt, radius, collision));
}

#[cfg(test)]
mod test {
	use approx::assert_relative_eq;

	use super::*;
	use crate::collision::{NoCollision, Overlaps, SweepHit, SweepResult};

	struct Floor;

	impl CollisionProvider for Floor {
		fn sweep(&self, origin: V3, radius: f32, dir: V3, max_dist: f32) -> SweepResult {
			// plane y = 0, normal up
			if dir.y >= 0.0 {
				return Ok(None);
			}
			let t = (origin.y - radius) / -dir.y;
			if t > max_dist {
				return Ok(None);
			}
			let center = origin + dir * t;
			Ok(Some(SweepHit {
				point: V3::new(center.x, 0., center.z),
				normal: V3::y(),
				distance: t,
			}))
		}

		fn overlap(&self, _point: V3, _radius: f32) -> Overlaps<'_> {
			Ok(Vec::new())
		}
	}

	#[test]
	fn test_free_fall_step() {
		let mut n = Node::new(V3::new(0., 10., 0.));
		let g = V3::new(0., -10., 0.);
		n.integrate(g, 0.1, 0.05, &NoCollision);
		assert_relative_eq!(n.pos.y, 9.9, epsilon = 1e-5);
		assert_relative_eq!(n.ppos.y, 10.0);
		n.integrate(g, 0.1, 0.05, &NoCollision);
		// second step keeps the velocity and adds g * dt^2 again
		assert_relative_eq!(n.pos.y, 9.7, epsilon = 1e-5);
	}

	#[test]
	fn test_keeps_velocity_without_gravity() {
		let mut n = Node::new(V3::zeros());
		n.ppos = V3::new(-1., 0., 0.);
		n.integrate(V3::zeros(), 0.02, 0.05, &NoCollision);
		assert_eq!(n.pos, V3::new(1., 0., 0.));
		assert_eq!(n.velocity_raw(), V3::new(1., 0., 0.));
	}

	#[test]
	fn test_resting_node_skips_sweep() {
		struct Panics;
		impl CollisionProvider for Panics {
			fn sweep(&self, _: V3, _: f32, _: V3, _: f32) -> SweepResult {
				panic!("zero-length move must not be swept")
			}
			fn overlap(&self, _: V3, _: f32) -> Overlaps<'_> {
				Ok(Vec::new())
			}
		}
		let mut n = Node::new(V3::new(1., 2., 3.));
		n.integrate(V3::zeros(), 0.02, 0.05, &Panics);
		assert_eq!(n.pos, V3::new(1., 2., 3.));
	}

	#[test]
	fn test_sweep_clamps_to_surface() {
		let mut n = Node::new(V3::new(0., 0.1, 0.));
		n.ppos = V3::new(0., 1.1, 0.);
		n.integrate(V3::zeros(), 0.02, 0.05, &Floor);
		assert_relative_eq!(n.pos.y, 0.05, epsilon = 1e-6);
		assert_relative_eq!(n.ppos.y, 0.1);
	}

	#[test]
	fn test_failed_query_is_a_miss() {
		use crate::error::QueryError;
		struct Broken;
		impl CollisionProvider for Broken {
			fn sweep(&self, _: V3, _: f32, _: V3, _: f32) -> SweepResult {
				Err(QueryError("backend offline".into()))
			}
			fn overlap(&self, _: V3, _: f32) -> Overlaps<'_> {
				Ok(Vec::new())
			}
		}
		let mut n = Node::new(V3::zeros());
		n.integrate(V3::new(0., -10., 0.), 0.1, 0.05, &Broken);
		assert_relative_eq!(n.pos.y, -0.1, epsilon = 1e-6);
	}
}
