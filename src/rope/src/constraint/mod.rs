pub mod contact;
pub mod distance;
