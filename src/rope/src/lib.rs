pub mod anchor;
pub mod collision;
pub mod config;
pub mod constraint;
pub mod controller_message;
pub mod error;
pub mod node;
pub mod simulation;
pub mod time_manager;

pub use protocol::V3;
