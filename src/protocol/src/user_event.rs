use crate::pr_model::PrMesh;

#[derive(Debug)]
pub enum UserEvent {
	Update(PrMesh, UpdateInfo),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UpdateInfo {
	pub frame: u64,
	// compute time / frame budget, above 1.0 means the loop is late
	pub load: f32,
	pub node_len: usize,
	pub max_stretch: f32,
}
