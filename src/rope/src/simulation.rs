use std::sync::mpsc::{Receiver, SyncSender, TryRecvError};

use tracing::{debug, info};

use crate::anchor::AnchorSource;
use crate::collision::{CollisionProvider, NoCollision};
use crate::config::RopeConfig;
use crate::constraint::contact::resolve_collisions;
use crate::constraint::distance::{max_stretch, DistanceConstraint};
use crate::controller_message::ControllerMessage;
use crate::error::{RopeError, RopeResult};
use crate::node::{integrate_all, Node};
use crate::time_manager::TimeManager;
use crate::V3;
use protocol::pr_model::PrRope;

/// A rope hanging from an anchor, advanced by fixed ticks.
///
/// Every substep integrates all nodes once, then alternates distance
/// relaxation with overlap resolution for `constraint_iterations` passes.
/// The node buffer is only touched by one phase at a time.
pub struct RopeSimulation {
	config: RopeConfig,
	nodes: Vec<Node>,
	distance: DistanceConstraint,
	anchor: Box<dyn AnchorSource>,
	collision: Box<dyn CollisionProvider>,
	frame: u64,
	load: f32,

	// -1: always play
	// 0: pause
	// n: play n frames
	forward_frames: i32,
}

impl RopeSimulation {
	/// Validates `config` and lays the nodes out in a straight line hanging
	/// down from the anchor, at rest.
	pub fn new(config: RopeConfig, anchor: impl AnchorSource + 'static) -> RopeResult<Self> {
		config.validate()?;
		let l0 = config.rest_length();
		let origin = anchor.position();
		let nodes = (0..config.node_count)
			.map(|i| Node::new(origin - V3::y() * (l0 * i as f32)))
			.collect();
		info!(
			nodes = config.node_count,
			rest_length = l0,
			sub_steps = config.sub_steps,
			iterations = config.constraint_iterations,
			"rope created"
		);
		Ok(Self {
			distance: DistanceConstraint::new(l0, config.relax_scheme),
			config,
			nodes,
			anchor: Box::new(anchor),
			collision: Box::new(NoCollision),
			frame: 0,
			load: 0.0,
			forward_frames: -1,
		})
	}

	pub fn with_collision(mut self, collision: impl CollisionProvider + 'static) -> Self {
		self.collision = Box::new(collision);
		self
	}

	pub fn with_paused(mut self) -> Self {
		self.forward_frames = 1; // provide first frame
		self
	}

	pub fn set_anchor(&mut self, anchor: impl AnchorSource + 'static) {
		self.anchor = Box::new(anchor);
	}

	pub fn config(&self) -> &RopeConfig {
		&self.config
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn positions(&self) -> Vec<V3> {
		self.nodes.iter().map(|n| n.get_pos()).collect()
	}

	pub fn rest_length(&self) -> f32 {
		self.distance.rest_length()
	}

	/// Worst deviation from the rest length over all segments.
	pub fn max_stretch(&self) -> f32 {
		max_stretch(&self.nodes, self.distance.rest_length())
	}

	/// Ticks completed so far.
	pub fn frame(&self) -> u64 {
		self.frame
	}

	/// Moves every node to `positions` and zeroes their velocity.
	pub fn reset_positions(&mut self, positions: &[V3]) -> RopeResult<()> {
		if positions.len() != self.nodes.len() {
			return Err(RopeError::NodeCountMismatch {
				expected: self.nodes.len(),
				actual: positions.len(),
			});
		}
		for (node, p) in self.nodes.iter_mut().zip(positions) {
			node.reset_pos(*p);
		}
		Ok(())
	}

	/// Advances the rope by `dt` seconds, split into `sub_steps` substeps.
	/// Non-positive or non-finite steps are ignored.
	pub fn tick(&mut self, dt: f32) {
		if !(dt > 0.0 && dt.is_finite()) {
			return;
		}
		let sub_dt = dt / self.config.sub_steps as f32;
		for _ in 0..self.config.sub_steps {
			self.substep(sub_dt);
		}
		self.frame += 1;
	}

	fn substep(&mut self, dt: f32) {
		let radius = self.config.rope_radius;
		let collision = self.collision.as_ref();
		integrate_all(&mut self.nodes, self.config.gravity, dt, radius, collision);
		let mut anchor = None;
		for iteration in 0..self.config.constraint_iterations {
			let pos = self.anchor.position();
			self.distance.step(&mut self.nodes, pos);
			if self.config.collides_on(iteration) {
				resolve_collisions(&mut self.nodes, radius, collision);
			}
			anchor = Some(pos);
		}
		// relaxation leaves node 0 half a correction off the anchor
		let anchor = anchor.unwrap_or_else(|| self.anchor.position());
		self.nodes[0].set_pos(anchor);
	}

	pub fn pr_rope(&self) -> PrRope {
		PrRope {
			frame: self.frame,
			load: self.load,
			stretch: self.max_stretch(),
			anchor: self.anchor.position().into(),
			nodes: self.nodes.iter().map(|n| n.render()).collect(),
		}
	}

	fn handle_message(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::TogglePause => {
				if self.forward_frames == 0 {
					self.forward_frames = -1;
				} else {
					self.forward_frames = 0;
				}
				debug!(paused = self.forward_frames == 0, "toggle pause");
			}
			ControllerMessage::FrameForward => {
				if self.forward_frames == 0 {
					self.forward_frames += 1;
				}
			}
			ControllerMessage::MoveAnchor(pos) => {
				debug!(?pos, "anchor moved");
				self.set_anchor(V3::from(pos));
			}
			ControllerMessage::Quit => {}
		}
	}

	/// Runs ticks at the pace of `time` until told to quit, sending a
	/// snapshot after every tick. The first snapshot is the initial state.
	///
	/// `tx` should be bounded: a full channel holds the simulation back until
	/// the consumer catches up. While paused the loop blocks on `rx`.
	pub fn run_thread(
		&mut self,
		tx: SyncSender<PrRope>,
		rx: Receiver<ControllerMessage>,
		mut time: TimeManager,
	) -> RopeResult<()> {
		info!(pft = time.pft(), "simulation loop started");
		let mut first_frame = true;
		loop {
			if self.forward_frames != 0 {
				if self.forward_frames > 0 {
					self.forward_frames -= 1;
				}
				if !first_frame {
					self.tick(time.pft());
				} else {
					first_frame = false;
				}
				if tx.send(self.pr_rope()).is_err() {
					info!(frame = self.frame, "snapshot receiver gone, stopping");
					return Ok(());
				}
			}

			let mut waited = false;
			loop {
				let msg = if self.forward_frames == 0 {
					waited = true;
					rx.recv().map_err(|_| RopeError::Disconnected)?
				} else {
					match rx.try_recv() {
						Ok(msg) => msg,
						Err(TryRecvError::Empty) => break,
						Err(TryRecvError::Disconnected) => return Err(RopeError::Disconnected),
					}
				};
				if msg == ControllerMessage::Quit {
					info!(frame = self.frame, "simulation loop stopped");
					return Ok(());
				}
				self.handle_message(msg);
			}
			if waited {
				// time spent paused is not load
				time.reset();
			}
			let (_, load) = time.take_time();
			self.load = load;
		}
	}
}
