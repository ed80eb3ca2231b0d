use approx::assert_relative_eq;
use rope::anchor::{AnchorSource, SharedAnchor};
use rope::collision::{ColliderSet, CollisionProvider, NoCollision, Shape};
use rope::config::RopeConfig;
use rope::simulation::RopeSimulation;
use rope::V3;

fn stretches(sim: &RopeSimulation) -> Vec<f32> {
	sim.nodes()
		.windows(2)
		.map(|w| (w[0].pos - w[1].pos).magnitude())
		.collect()
}

#[test]
fn hanging_rope_scenario() {
	let config = RopeConfig::default()
		.with_node_count(5)
		.with_rope_length(4.0)
		.with_gravity(V3::new(0., -9.81, 0.))
		.with_sub_steps(4)
		.with_constraint_iterations(6);
	let mut sim = RopeSimulation::new(config, V3::zeros()).unwrap();
	assert_relative_eq!(sim.rest_length(), 0.8);
	for _ in 0..100 {
		sim.tick(1.0 / 50.0);
	}
	for d in stretches(&sim) {
		assert!((0.79..=0.81).contains(&d), "segment length {}", d);
	}
	assert!(sim.nodes()[4].pos.y < sim.nodes()[0].pos.y);
}

#[test]
fn stretched_rope_converges_without_gravity() {
	let config = RopeConfig::default()
		.with_gravity(V3::zeros())
		.with_constraint_iterations(6);
	let mut sim = RopeSimulation::new(config, V3::zeros()).unwrap();
	let start: Vec<_> = (0..5)
		.map(|i| V3::new(0.3 * i as f32, -1.0 * i as f32, 0.1 * (i % 2) as f32))
		.collect();
	sim.reset_positions(&start).unwrap();
	for _ in 0..20 {
		sim.tick(1.0 / 50.0);
	}
	for d in stretches(&sim) {
		assert!((d - 0.8).abs() < 1e-3, "segment length {}", d);
	}
}

#[test]
fn anchor_pinned_after_every_tick() {
	let anchor = SharedAnchor::new(V3::new(0., 2., 0.));
	let mut sim = RopeSimulation::new(RopeConfig::default(), anchor.clone()).unwrap();
	// knock node 0 away; the next tick must put it back
	let mut displaced = sim.positions();
	displaced[0] += V3::new(3., -1., 0.5);
	sim.reset_positions(&displaced).unwrap();
	for i in 0..50 {
		anchor.set(V3::new((i as f32 * 0.3).sin(), 2., (i as f32 * 0.2).cos()));
		sim.tick(1.0 / 60.0);
		assert_eq!(sim.nodes()[0].pos, anchor.position());
	}
}

#[test]
fn rope_drapes_over_ball_without_sinking_in() {
	let center = V3::new(0.3, -2.5, 0.);
	let ball = Shape::sphere(center, 0.6);
	let world = ColliderSet::default().with_shape(ball);
	let config = RopeConfig::default()
		.with_rope_radius(0.1)
		.with_collision_interval(1);
	let mut sim = RopeSimulation::new(config, V3::zeros())
		.unwrap()
		.with_collision(world.clone());
	// start level to the side so the swing carries the rope onto the ball
	let start: Vec<_> = (0..5).map(|i| V3::new(-0.8 * i as f32, 0., 0.)).collect();
	sim.reset_positions(&start).unwrap();
	for _ in 0..150 {
		sim.tick(1.0 / 50.0);
		for n in sim.nodes() {
			let gap = (n.pos - center).magnitude() - 0.6;
			assert!(gap > 0.09, "node {:?} is {} from the surface", n.pos, gap);
		}
	}
	// resting on the ball, not hanging clear of it
	let touching = sim
		.nodes()
		.iter()
		.filter(|n| !world.overlap(n.pos, 0.11).unwrap().is_empty())
		.count();
	assert!(touching > 0);
	assert!(sim.nodes().iter().all(|n| ball.closest_point(n.pos) != n.pos));
}

#[test]
fn runs_are_deterministic() {
	let run = || {
		let mut sim = RopeSimulation::new(RopeConfig::default().with_node_count(12), V3::zeros())
			.unwrap()
			.with_collision(NoCollision);
		let start: Vec<_> = (0..12).map(|i| V3::new(0.3 * i as f32, 0., 0.)).collect();
		sim.reset_positions(&start).unwrap();
		for _ in 0..120 {
			sim.tick(1.0 / 60.0);
		}
		sim.positions()
	};
	let a = run();
	let b = run();
	assert_eq!(a, b);
}

#[test]
fn no_collider_means_no_queries_matter() {
	struct Empty;
	impl CollisionProvider for Empty {
		fn sweep(&self, _: V3, _: f32, _: V3, _: f32) -> rope::collision::SweepResult {
			Ok(None)
		}
		fn overlap(&self, _: V3, _: f32) -> rope::collision::Overlaps<'_> {
			Ok(Vec::new())
		}
	}
	let mut a = RopeSimulation::new(RopeConfig::default(), V3::zeros()).unwrap();
	let mut b = RopeSimulation::new(RopeConfig::default(), V3::zeros())
		.unwrap()
		.with_collision(Empty);
	for _ in 0..30 {
		a.tick(0.02);
		b.tick(0.02);
	}
	assert_eq!(a.positions(), b.positions());
}
