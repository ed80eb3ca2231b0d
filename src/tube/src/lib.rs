pub mod mesher;
pub mod render_model;
pub mod ring;
pub mod topology;

pub use protocol::V3;
