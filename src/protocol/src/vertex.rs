use bytemuck::{Pod, Zeroable};

use crate::V3;

#[repr(C)]
#[derive(Zeroable, Pod, Default, Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
	pub pos: [f32; 3],
	pub normal: [f32; 3],
}

impl Vertex {
	pub fn new(pos: V3, normal: V3) -> Self {
		Self {
			pos: pos.into(),
			normal: normal.into(),
		}
	}

	pub fn pos(&self) -> V3 {
		self.pos.into()
	}
}
