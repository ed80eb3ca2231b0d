//! Small analytic collision world: spheres, half-spaces and boxes, tested by
//! brute force. Enough for demos and tests; large scenes should bring their
//! own spatial index behind `CollisionProvider`.

use super::{Collider, CollisionProvider, Overlaps, SweepHit, SweepResult};
use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
	Sphere { center: V3, radius: f32 },
	/// Solid half-space below the plane `normal . x = offset`.
	Plane { normal: V3, offset: f32 },
	/// Axis-aligned box.
	Cuboid { min: V3, max: V3 },
}

impl Shape {
	pub fn sphere(center: V3, radius: f32) -> Self {
		Shape::Sphere { center, radius }
	}

	pub fn plane(normal: V3, point: V3) -> Self {
		let normal = normal.normalize();
		Shape::Plane {
			normal,
			offset: normal.dot(&point),
		}
	}

	pub fn cuboid(center: V3, half_extents: V3) -> Self {
		Shape::Cuboid {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	pub fn closest_point(&self, p: V3) -> V3 {
		match *self {
			Shape::Sphere { center, radius } => {
				let dp = p - center;
				let l = dp.magnitude();
				if l <= radius {
					p
				} else {
					center + dp * (radius / l)
				}
			}
			Shape::Plane { normal, offset } => {
				let s = normal.dot(&p) - offset;
				if s <= 0.0 {
					p
				} else {
					p - normal * s
				}
			}
			Shape::Cuboid { min, max } => p.sup(&min).inf(&max),
		}
	}

	/// Sphere cast against this shape. Casts that start in contact report
	/// no hit; overlap resolution is responsible for those.
	pub fn sweep(&self, origin: V3, radius: f32, dir: V3, max_dist: f32) -> Option<SweepHit> {
		let t_normal = match *self {
			Shape::Sphere { center, radius: r0 } => {
				let rr = r0 + radius;
				let m = origin - center;
				let b = m.dot(&dir);
				let c = m.magnitude_squared() - rr * rr;
				if c < 0.0 || b > 0.0 {
					return None;
				}
				let disc = b * b - c;
				if disc < 0.0 {
					return None;
				}
				let t = (-b - disc.sqrt()).max(0.0);
				let normal = (origin + dir * t - center) / rr;
				(t, normal)
			}
			Shape::Plane { normal, offset } => {
				let s0 = normal.dot(&origin) - offset;
				let nd = normal.dot(&dir);
				if s0 < radius || nd >= 0.0 {
					return None;
				}
				((s0 - radius) / -nd, normal)
			}
			// ray against the box grown by `radius`; corners are treated as
			// square rather than rounded
			Shape::Cuboid { min, max } => {
				let lo = min.add_scalar(-radius);
				let hi = max.add_scalar(radius);
				let mut t_near = f32::NEG_INFINITY;
				let mut t_far = f32::INFINITY;
				let mut axis = 0;
				for i in 0..3 {
					if dir[i].abs() < f32::EPSILON {
						if origin[i] < lo[i] || origin[i] > hi[i] {
							return None;
						}
						continue;
					}
					let t1 = (lo[i] - origin[i]) / dir[i];
					let t2 = (hi[i] - origin[i]) / dir[i];
					let (t1, t2) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
					if t1 > t_near {
						t_near = t1;
						axis = i;
					}
					t_far = t_far.min(t2);
				}
				if t_near > t_far || t_near < 0.0 {
					// miss, or the cast starts inside
					return None;
				}
				let mut normal = V3::zeros();
				normal[axis] = -dir[axis].signum();
				(t_near, normal)
			}
		};
		let (t, normal) = t_normal;
		if t > max_dist {
			return None;
		}
		let center = origin + dir * t;
		Some(SweepHit {
			point: center - normal * radius,
			normal,
			distance: t,
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeCollider {
	pub shape: Shape,
	pub trigger: bool,
}

impl Collider for ShapeCollider {
	fn is_trigger(&self) -> bool {
		self.trigger
	}

	fn closest_point(&self, p: V3) -> V3 {
		self.shape.closest_point(p)
	}
}

#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
	colliders: Vec<ShapeCollider>,
}

impl ColliderSet {
	pub fn with_shape(mut self, shape: Shape) -> Self {
		self.add(shape, false);
		self
	}

	pub fn with_trigger(mut self, shape: Shape) -> Self {
		self.add(shape, true);
		self
	}

	pub fn add(&mut self, shape: Shape, trigger: bool) -> usize {
		self.colliders.push(ShapeCollider { shape, trigger });
		self.colliders.len() - 1
	}

	pub fn len(&self) -> usize {
		self.colliders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colliders.is_empty()
	}
}

impl CollisionProvider for ColliderSet {
	fn sweep(&self, origin: V3, radius: f32, dir: V3, max_dist: f32) -> SweepResult {
		let hit = self
			.colliders
			.iter()
			.filter(|c| !c.trigger)
			.filter_map(|c| c.shape.sweep(origin, radius, dir, max_dist))
			.min_by(|a, b| a.distance.total_cmp(&b.distance));
		Ok(hit)
	}

	fn overlap(&self, point: V3, radius: f32) -> Overlaps<'_> {
		Ok(self
			.colliders
			.iter()
			.filter(|c| (c.shape.closest_point(point) - point).magnitude() <= radius)
			.map(|c| c as &dyn Collider)
			.collect())
	}
}
