use crate::error::ConfigError;
use crate::V3;

/// How distance constraints are relaxed each iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelaxScheme {
	/// Sequential pass; a pair sees the corrections of the pair before it.
	#[default]
	GaussSeidel,
	/// All pairs read the same snapshot, corrections are summed into a
	/// second buffer and applied at the end. Converges slower.
	Jacobi,
}

/// Per-rope parameters, fixed for the lifetime of a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct RopeConfig {
	pub rope_length: f32,
	pub node_count: usize,
	pub constraint_iterations: usize,
	pub gravity: V3,
	pub rope_radius: f32,
	pub sub_steps: usize,
	pub segment_sides: usize,
	// resolve overlaps on iterations where `i % collision_interval == 0`, 0 = never
	pub collision_interval: usize,
	pub relax_scheme: RelaxScheme,
}

impl Default for RopeConfig {
	fn default() -> Self {
		Self {
			rope_length: 4.0,
			node_count: 5,
			constraint_iterations: 6,
			gravity: V3::new(0., -9.81, 0.),
			rope_radius: 0.05,
			sub_steps: 4,
			segment_sides: 8,
			collision_interval: 2,
			relax_scheme: RelaxScheme::GaussSeidel,
		}
	}
}

impl RopeConfig {
	pub fn with_rope_length(mut self, rope_length: f32) -> Self {
		self.rope_length = rope_length;
		self
	}

	pub fn with_node_count(mut self, node_count: usize) -> Self {
		self.node_count = node_count;
		self
	}

	pub fn with_constraint_iterations(mut self, iterations: usize) -> Self {
		self.constraint_iterations = iterations;
		self
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_rope_radius(mut self, rope_radius: f32) -> Self {
		self.rope_radius = rope_radius;
		self
	}

	pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
		self.sub_steps = sub_steps;
		self
	}

	pub fn with_segment_sides(mut self, segment_sides: usize) -> Self {
		self.segment_sides = segment_sides;
		self
	}

	pub fn with_collision_interval(mut self, interval: usize) -> Self {
		self.collision_interval = interval;
		self
	}

	pub fn with_relax_scheme(mut self, scheme: RelaxScheme) -> Self {
		self.relax_scheme = scheme;
		self
	}

	/// Distance the solver keeps between neighbouring nodes.
	pub fn rest_length(&self) -> f32 {
		self.rope_length / self.node_count as f32
	}

	pub fn vertex_count(&self) -> usize {
		self.node_count * self.segment_sides
	}

	pub fn index_count(&self) -> usize {
		self.segment_sides * (self.node_count - 1) * 6
	}

	/// Whether overlap resolution runs after relaxation iteration `iteration`.
	pub fn collides_on(&self, iteration: usize) -> bool {
		self.collision_interval != 0 && iteration % self.collision_interval == 0
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.rope_length > 0.0 && self.rope_length.is_finite()) {
			return Err(ConfigError::RopeLength(self.rope_length));
		}
		if self.node_count < 2 {
			return Err(ConfigError::NodeCount(self.node_count));
		}
		if !(self.rope_radius > 0.0 && self.rope_radius.is_finite()) {
			return Err(ConfigError::RopeRadius(self.rope_radius));
		}
		if self.sub_steps < 1 {
			return Err(ConfigError::SubSteps(self.sub_steps));
		}
		if self.segment_sides < 3 {
			return Err(ConfigError::SegmentSides(self.segment_sides));
		}
		if !self.gravity.iter().all(|x| x.is_finite()) {
			return Err(ConfigError::Gravity(self.gravity.into()));
		}
		Ok(())
	}
}
