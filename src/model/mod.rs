pub mod config;
pub mod target;

pub use config::*;
pub use target::*;
