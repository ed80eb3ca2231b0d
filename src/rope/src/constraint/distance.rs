use crate::config::RelaxScheme;
use crate::node::Node;
use crate::V3;

/// Keeps neighbouring nodes `l0` apart, node 0 pinned to the anchor.
///
/// Relaxation is iterative: each pass only moves nodes halfway towards the
/// rest length per pair, so a loaded rope visibly stretches.
#[derive(Clone, Debug)]
pub struct DistanceConstraint {
	l0: f32,
	scheme: RelaxScheme,
	// Jacobi accumulation buffer
	corrections: Vec<V3>,
}

// half of the pair error, applied with opposite signs to both ends
fn correction(dp: V3, l0: f32) -> Option<V3> {
	let l = dp.magnitude();
	if l == 0.0 {
		return None;
	}
	Some(dp * (0.5 * (l - l0) / l))
}

impl DistanceConstraint {
	pub fn new(l0: f32, scheme: RelaxScheme) -> Self {
		Self {
			l0,
			scheme,
			corrections: Vec::new(),
		}
	}

	pub fn rest_length(&self) -> f32 {
		self.l0
	}

	/// `iterations` passes, re-pinning node 0 before each one.
	pub fn relax(&mut self, nodes: &mut [Node], anchor: V3, iterations: usize) {
		for _ in 0..iterations {
			self.step(nodes, anchor);
		}
	}

	/// One relaxation pass.
	pub fn step(&mut self, nodes: &mut [Node], anchor: V3) {
		if nodes.is_empty() {
			return;
		}
		nodes[0].set_pos(anchor);
		match self.scheme {
			RelaxScheme::GaussSeidel => self.step_gauss_seidel(nodes),
			RelaxScheme::Jacobi => self.step_jacobi(nodes),
		}
	}

	// must stay sequential: pair i reads what pair i - 1 just wrote
	fn step_gauss_seidel(&self, nodes: &mut [Node]) {
		for i in 1..nodes.len() {
			let dp = nodes[i - 1].get_pos() - nodes[i].get_pos();
			if let Some(correct) = correction(dp, self.l0) {
				nodes[i - 1].add_pos(-correct);
				nodes[i].add_pos(correct);
			}
		}
	}

	fn step_jacobi(&mut self, nodes: &mut [Node]) {
		self.corrections.clear();
		self.corrections.resize(nodes.len(), V3::zeros());
		for i in 1..nodes.len() {
			let dp = nodes[i - 1].get_pos() - nodes[i].get_pos();
			if let Some(correct) = correction(dp, self.l0) {
				self.corrections[i - 1] -= correct;
				self.corrections[i] += correct;
			}
		}
		for (node, dp) in nodes.iter_mut().zip(self.corrections.iter()) {
			node.add_pos(*dp);
		}
	}
}

/// Largest `|distance - l0|` over all neighbouring pairs.
pub fn max_stretch(nodes: &[Node], l0: f32) -> f32 {
	nodes
		.windows(2)
		.map(|w| ((w[0].get_pos() - w[1].get_pos()).magnitude() - l0).abs())
		.fold(0.0, f32::max)
}

#[cfg(test)]
mod test {
	use approx::assert_relative_eq;

	use super::*;

	fn column(n: usize, spacing: f32) -> Vec<Node> {
		(0..n)
			.map(|i| Node::new(V3::new(0., -spacing * i as f32, 0.)))
			.collect()
	}

	#[test]
	fn test_single_pair_moves_both_halfway() {
		let mut nodes = column(2, 2.0);
		let mut dc = DistanceConstraint::new(1.0, RelaxScheme::GaussSeidel);
		dc.step(&mut nodes, V3::zeros());
		assert_relative_eq!(nodes[0].pos, V3::new(0., -0.5, 0.));
		assert_relative_eq!(nodes[1].pos, V3::new(0., -1.5, 0.));
	}

	#[test]
	fn test_pins_first_node_each_pass() {
		let mut nodes = column(3, 1.0);
		let anchor = V3::new(5., 5., 5.);
		let mut dc = DistanceConstraint::new(1.0, RelaxScheme::GaussSeidel);
		dc.step(&mut nodes, anchor);
		// pair 0 pulls node 0 back towards node 1 after pinning
		assert!((nodes[0].pos - anchor).magnitude() < (nodes[1].pos - anchor).magnitude());
		assert_ne!(nodes[0].pos, anchor);
	}

	#[test]
	fn test_coincident_nodes_are_skipped() {
		let mut nodes = vec![Node::new(V3::zeros()), Node::new(V3::zeros())];
		let mut dc = DistanceConstraint::new(1.0, RelaxScheme::GaussSeidel);
		dc.relax(&mut nodes, V3::zeros(), 4);
		assert!(nodes.iter().all(|n| n.pos.iter().all(|x| x.is_finite())));
		assert_eq!(nodes[1].pos, V3::zeros());

		let mut dc = DistanceConstraint::new(1.0, RelaxScheme::Jacobi);
		dc.relax(&mut nodes, V3::zeros(), 4);
		assert_eq!(nodes[1].pos, V3::zeros());
	}

	#[test]
	fn test_gauss_seidel_converges_faster() {
		let start = column(8, 1.5);
		let mut gs_nodes = start.clone();
		let mut jacobi_nodes = start;
		DistanceConstraint::new(1.0, RelaxScheme::GaussSeidel).relax(&mut gs_nodes, V3::zeros(), 10);
		DistanceConstraint::new(1.0, RelaxScheme::Jacobi).relax(&mut jacobi_nodes, V3::zeros(), 10);
		let gs = max_stretch(&gs_nodes, 1.0);
		let jacobi = max_stretch(&jacobi_nodes, 1.0);
		assert!(gs < jacobi, "gauss-seidel {} jacobi {}", gs, jacobi);
		assert!(jacobi < 0.5);
	}

	#[test]
	fn test_relaxed_chain_satisfies_rest_length() {
		let mut nodes: Vec<_> = (0..6)
			.map(|i| Node::new(V3::new(0.3 * i as f32, -1.2 * i as f32, 0.)))
			.collect();
		let mut dc = DistanceConstraint::new(1.0, RelaxScheme::GaussSeidel);
		dc.relax(&mut nodes, V3::zeros(), 200);
		assert!(max_stretch(&nodes, 1.0) < 1e-3);
	}
}
