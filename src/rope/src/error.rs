//! Error types for rope setup and the collision backend.

use thiserror::Error;

pub type RopeResult<T> = Result<T, RopeError>;

/// A `RopeConfig` parameter outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("rope_length must be positive and finite, got {0}")]
	RopeLength(f32),

	#[error("node_count must be at least 2, got {0}")]
	NodeCount(usize),

	#[error("rope_radius must be positive and finite, got {0}")]
	RopeRadius(f32),

	#[error("sub_steps must be at least 1, got {0}")]
	SubSteps(usize),

	#[error("segment_sides must be at least 3, got {0}")]
	SegmentSides(usize),

	#[error("gravity must be finite, got {0:?}")]
	Gravity([f32; 3]),
}

/// Failure reported by a collision backend. The solver treats it as "no hit".
#[derive(Debug, Clone, PartialEq, Error)]
#[error("collision query failed: {0}")]
pub struct QueryError(pub String);

#[derive(Debug, Error)]
pub enum RopeError {
	#[error("invalid rope configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("expected {expected} node positions, got {actual}")]
	NodeCountMismatch { expected: usize, actual: usize },

	#[error("controller channel disconnected")]
	Disconnected,
}
