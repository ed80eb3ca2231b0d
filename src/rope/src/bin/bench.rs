use std::time::Instant;

use rope::collision::{ColliderSet, Shape};
use rope::config::RopeConfig;
use rope::simulation::RopeSimulation;
use rope::V3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = RopeConfig::default()
		.with_rope_length(20.0)
		.with_node_count(200)
		.with_constraint_iterations(12);
	let floor = ColliderSet::default()
		.with_shape(Shape::plane(V3::y(), V3::new(0., -12., 0.)))
		.with_shape(Shape::sphere(V3::new(0.5, -6., 0.), 1.0));
	let mut sim = RopeSimulation::new(config, V3::zeros())?.with_collision(floor);
	let dt = 0.02;
	let rframes = 500;
	let start = Instant::now();
	for i in 0..rframes {
		sim.set_anchor(V3::new((i as f32 * 0.05).sin(), 0., 0.));
		sim.tick(dt);
	}
	let time = rframes as f32 * dt;
	let duration = start.elapsed().as_secs_f32();
	eprintln!("{:.3}%", duration / time * 100.0);
	Ok(())
}
