use rope::error::RopeError;
use thiserror::Error;

pub type RunnerResult<T> = Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
	#[error(transparent)]
	Rope(#[from] RopeError),

	#[error("{0} thread panicked")]
	Panicked(&'static str),

	#[error("simulation already stopped")]
	Stopped,

	#[error("bad command {0:?}")]
	Command(String),
}
