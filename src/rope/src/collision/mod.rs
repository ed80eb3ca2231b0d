//! Query interface to the physics world.
//!
//! The solver only asks two questions: where does a moving sphere first
//! touch something, and what currently overlaps a sphere. Anything that
//! answers them (a real spatial index, [`ColliderSet`], or a test stub)
//! can drive the rope.

pub mod collider;

pub use collider::{ColliderSet, Shape, ShapeCollider};

use crate::error::QueryError;
use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
	/// Contact point on the collider surface.
	pub point: V3,
	/// Surface normal at `point`, unit length, facing the sphere.
	pub normal: V3,
	/// Travel of the sphere center along the sweep direction.
	pub distance: f32,
}

pub type SweepResult = Result<Option<SweepHit>, QueryError>;
pub type Overlaps<'a> = Result<Vec<&'a dyn Collider>, QueryError>;

pub trait Collider: Sync {
	fn is_trigger(&self) -> bool;

	/// Closest point of the collider to `p`. Points inside a solid map to
	/// themselves.
	fn closest_point(&self, p: V3) -> V3;
}

pub trait CollisionProvider: Send + Sync {
	/// First surface touched by a sphere of `radius` moving from `origin`
	/// along unit `dir` for at most `max_dist`.
	fn sweep(&self, origin: V3, radius: f32, dir: V3, max_dist: f32) -> SweepResult;

	/// Colliders intersecting the sphere, in backend order.
	fn overlap(&self, point: V3, radius: f32) -> Overlaps<'_>;
}

/// Empty world.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCollision;

impl CollisionProvider for NoCollision {
	fn sweep(&self, _origin: V3, _radius: f32, _dir: V3, _max_dist: f32) -> SweepResult {
		Ok(None)
	}

	fn overlap(&self, _point: V3, _radius: f32) -> Overlaps<'_> {
		Ok(Vec::new())
	}
}
