pub mod config_io;
pub mod file_service;
pub mod paths;
pub mod recovery;
pub mod store;
