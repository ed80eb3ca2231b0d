use std::sync::mpsc::{channel, sync_channel, Sender};
use std::thread::JoinHandle;

use tracing::info;

use crate::error::{RunnerError, RunnerResult};
use protocol::pr_model::PrRope;
use protocol::sink::RenderSink;
use protocol::user_event::UpdateInfo;
use rope::controller_message::ControllerMessage;
use rope::error::RopeResult;
use rope::simulation::RopeSimulation;
use rope::time_manager::TimeManager;
use tube::mesher::TubeMesher;

// snapshots the simulation may run ahead of the mesher
pub const SNAPSHOT_BACKLOG: usize = 4;

/// A rope simulation on its own thread, with a second thread turning each
/// snapshot into a tube mesh for `sink`.
pub struct Runner<S> {
	controller: Sender<ControllerMessage>,
	simulation: JoinHandle<RopeResult<()>>,
	relay: JoinHandle<S>,
}

impl<S: RenderSink + Send + 'static> Runner<S> {
	pub fn spawn(simulation: RopeSimulation, time: TimeManager, sink: S) -> Self {
		let (controller, crx) = channel();
		let (tx, rx) = sync_channel::<PrRope>(SNAPSHOT_BACKLOG);
		let mut mesher = TubeMesher::new(simulation.config());
		let simulation = std::thread::spawn(move || {
			let mut simulation = simulation;
			simulation.run_thread(tx, crx, time)
		});
		let relay = std::thread::spawn(move || {
			let mut sink = sink;
			let mut frames = 0u64;
			while let Ok(rope) = rx.recv() {
				mesher.update_from(&rope);
				let info = UpdateInfo {
					frame: rope.frame,
					load: rope.load,
					node_len: rope.nodes.len(),
					max_stretch: rope.stretch,
				};
				if mesher.render(&mut sink, info) {
					frames += 1;
				}
			}
			info!(frames, "mesh relay stopped");
			sink
		});
		Self {
			controller,
			simulation,
			relay,
		}
	}

	/// A handle for steering the simulation from other threads.
	pub fn controller(&self) -> Sender<ControllerMessage> {
		self.controller.clone()
	}

	pub fn send(&self, msg: ControllerMessage) -> RunnerResult<()> {
		self.controller.send(msg).map_err(|_| RunnerError::Stopped)
	}

	/// Asks the simulation to quit, waits for both threads and returns the
	/// sink.
	pub fn stop(self) -> RunnerResult<S> {
		// already gone if it quit on its own
		let _ = self.controller.send(ControllerMessage::Quit);
		self.simulation
			.join()
			.map_err(|_| RunnerError::Panicked("simulation"))??;
		self.relay.join().map_err(|_| RunnerError::Panicked("relay"))
	}
}
