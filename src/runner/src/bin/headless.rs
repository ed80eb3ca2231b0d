use std::io::BufRead;
use std::sync::mpsc::sync_channel;

use tracing::{info, warn};

use protocol::sink::ChannelSink;
use protocol::user_event::UserEvent;
use rope::anchor::SharedAnchor;
use rope::collision::{ColliderSet, Shape};
use rope::config::RopeConfig;
use rope::simulation::RopeSimulation;
use rope::time_manager::{TimeManager, TimeModel};
use rope::V3;
use runner::command::parse_command;
use runner::runner::Runner;

// usage: headless [frames] [--realtime] [--interactive]
fn main() -> Result<(), Box<dyn std::error::Error>> {
	runner::logging::init();
	let mut frames = 250u64;
	let mut realtime = false;
	let mut interactive = false;
	for arg in std::env::args().skip(1) {
		match arg.as_str() {
			"--realtime" => realtime = true,
			"--interactive" => interactive = true,
			n => frames = n.parse()?,
		}
	}

	let config = RopeConfig::default()
		.with_rope_length(6.0)
		.with_node_count(24)
		.with_rope_radius(0.08)
		.with_segment_sides(12);
	let world = ColliderSet::default()
		.with_shape(Shape::plane(V3::y(), V3::new(0., -5., 0.)))
		.with_shape(Shape::sphere(V3::new(1.0, -3.0, 0.), 0.8))
		.with_trigger(Shape::cuboid(V3::new(-2., -2., 0.), V3::new(0.5, 0.5, 0.5)));
	let anchor = SharedAnchor::new(V3::zeros());
	let sim = RopeSimulation::new(config, anchor.clone())?.with_collision(world);
	let model = if realtime {
		TimeModel::RtFrameLock
	} else {
		TimeModel::VideoRender
	};

	let (tx, rx) = sync_channel(4);
	let runner = Runner::spawn(sim, TimeManager::new(0.02, model), ChannelSink::new(tx));
	if interactive {
		let controller = runner.controller();
		std::thread::spawn(move || {
			for line in std::io::stdin().lock().lines().map_while(Result::ok) {
				match parse_command(&line) {
					Ok(msg) => {
						if controller.send(msg).is_err() {
							break;
						}
					}
					Err(e) => warn!("{}", e),
				}
			}
		});
	}

	let mut peak_load = 0f32;
	let mut peak_stretch = 0f32;
	let mut triangles = 0;
	let mut last_frame = 0;
	for event in rx.iter() {
		let UserEvent::Update(mesh, info) = event;
		if !interactive {
			// sway the mount point back and forth
			let t = info.frame as f32 * 0.02;
			anchor.set(V3::new(1.5 * (t * 1.3).sin(), 0., 0.5 * t.cos() - 0.5));
		}
		peak_load = peak_load.max(info.load);
		peak_stretch = peak_stretch.max(info.max_stretch);
		triangles = mesh.triangle_count();
		last_frame = info.frame;
		if info.frame >= frames {
			break;
		}
	}
	drop(rx);
	runner.stop()?;
	info!(
		frames = last_frame,
		triangles,
		peak_stretch,
		peak_load = %format!("{:.2}%", peak_load * 100.0),
		"run finished"
	);
	Ok(())
}
