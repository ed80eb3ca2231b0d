use std::sync::{Arc, RwLock};

use crate::V3;

/// Mount point of the rope. Read once per relaxation iteration.
pub trait AnchorSource: Send + Sync {
	fn position(&self) -> V3;
}

impl AnchorSource for V3 {
	fn position(&self) -> V3 {
		*self
	}
}

/// Anchor the host can move while the simulation holds a clone.
#[derive(Clone, Debug, Default)]
pub struct SharedAnchor(Arc<RwLock<V3>>);

impl SharedAnchor {
	pub fn new(pos: V3) -> Self {
		Self(Arc::new(RwLock::new(pos)))
	}

	pub fn set(&self, pos: V3) {
		// a poisoned lock still holds a usable position
		let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
		*guard = pos;
	}
}

impl AnchorSource for SharedAnchor {
	fn position(&self) -> V3 {
		*self.0.read().unwrap_or_else(|e| e.into_inner())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_shared_anchor_moves_all_clones() {
		let a = SharedAnchor::new(V3::new(1., 2., 3.));
		let b = a.clone();
		assert_eq!(b.position(), V3::new(1., 2., 3.));
		a.set(V3::zeros());
		assert_eq!(b.position(), V3::zeros());
	}

	#[test]
	fn test_fixed_anchor() {
		let a = V3::new(0., 5., 0.);
		assert_eq!(AnchorSource::position(&a), a);
	}
}
