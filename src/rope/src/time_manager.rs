use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeModel {
	/// Fixed step, never waits. For offline capture and tests.
	VideoRender,
	/// Fixed step, sleeps out the rest of each frame to hold real time.
	RtFrameLock,
}

/// Paces the fixed simulation tick.
pub struct TimeManager {
	// seconds per frame
	pft: f32,
	model: TimeModel,
	start_time: Instant,
}

impl TimeManager {
	pub fn new(pft: f32, model: TimeModel) -> Self {
		Self {
			pft,
			model,
			start_time: Instant::now(),
		}
	}

	pub fn pft(&self) -> f32 {
		self.pft
	}

	/// Restart the frame clock, e.g. after a pause.
	pub fn reset(&mut self) {
		self.start_time = Instant::now();
	}

	/// Ends the current frame. Returns the fixed step and the load, the
	/// share of the frame budget spent since the last call.
	pub fn take_time(&mut self) -> (f32, f32) {
		let busy = self.start_time.elapsed();
		let budget = Duration::from_secs_f32(self.pft);
		let load = busy.as_secs_f32() / self.pft;
		if self.model == TimeModel::RtFrameLock && busy < budget {
			std::thread::sleep(budget - busy);
		}
		self.start_time = Instant::now();
		(self.pft, load)
	}
}

impl Default for TimeManager {
	fn default() -> Self {
		Self::new(0.02, TimeModel::RtFrameLock)
	}
}
