pub mod command;
pub mod error;
pub mod logging;
pub mod runner;
