pub mod pr_model;
pub mod sink;
pub mod user_event;
pub mod vertex;

pub type V3 = nalgebra::Vector3<f32>;
