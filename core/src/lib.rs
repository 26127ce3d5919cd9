pub mod action;
pub mod compile;
pub mod config;
pub mod diff;
pub mod interactive;
pub mod problem;
pub mod report;
pub mod str_interp;
pub mod style;
pub mod testing;

pub use crate::config::Config;
