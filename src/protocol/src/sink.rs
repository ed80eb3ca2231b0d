use std::sync::mpsc::SyncSender;

use crate::pr_model::PrMesh;
use crate::user_event::{UpdateInfo, UserEvent};

/// Receiver of finished tube meshes. Uploading, presentation and any
/// further processing belong to the implementor.
pub trait RenderSink {
	fn submit(&mut self, mesh: PrMesh, info: UpdateInfo);
}

/// Keeps only the most recent mesh.
#[derive(Default)]
pub struct LatestSink {
	pub mesh: Option<PrMesh>,
	pub info: UpdateInfo,
	pub submitted: usize,
}

impl RenderSink for LatestSink {
	fn submit(&mut self, mesh: PrMesh, info: UpdateInfo) {
		self.mesh = Some(mesh);
		self.info = info;
		self.submitted += 1;
	}
}

/// Forwards meshes to another thread as `UserEvent::Update`. The channel
/// is bounded, so a slow receiver holds the producer back.
pub struct ChannelSink {
	tx: SyncSender<UserEvent>,
	closed: bool,
}

impl ChannelSink {
	pub fn new(tx: SyncSender<UserEvent>) -> Self {
		Self { tx, closed: false }
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}
}

impl RenderSink for ChannelSink {
	fn submit(&mut self, mesh: PrMesh, info: UpdateInfo) {
		if self.closed {
			return;
		}
		if self.tx.send(UserEvent::Update(mesh, info)).is_err() {
			tracing::debug!("render channel closed, dropping further meshes");
			self.closed = true;
		}
	}
}

#[cfg(test)]
mod test {
	use std::sync::mpsc::sync_channel;
	use std::sync::Arc;

	use super::*;
	use crate::pr_model::Aabb;
	use crate::V3;

	fn empty_mesh() -> PrMesh {
		PrMesh {
			vertices: vec![],
			indices: Arc::from(vec![0u32, 1, 2]),
			bounds: Aabb {
				min: V3::zeros(),
				max: V3::zeros(),
			},
		}
	}

	#[test]
	fn test_latest_sink_keeps_last() {
		let mut sink = LatestSink::default();
		for frame in 0..3 {
			let info = UpdateInfo {
				frame,
				..Default::default()
			};
			sink.submit(empty_mesh(), info);
		}
		assert_eq!(sink.submitted, 3);
		assert_eq!(sink.info.frame, 2);
		assert!(sink.mesh.is_some());
	}

	#[test]
	fn test_channel_sink_closes_quietly() {
		let (tx, rx) = sync_channel(1);
		let mut sink = ChannelSink::new(tx);
		sink.submit(empty_mesh(), UpdateInfo::default());
		match rx.recv().unwrap() {
			UserEvent::Update(mesh, _) => assert_eq!(mesh.triangle_count(), 1),
		}
		drop(rx);
		sink.submit(empty_mesh(), UpdateInfo::default());
		assert!(sink.is_closed());
	}
}
