//! Utility functions

pub mod fs;

pub use fs::write_user_file;
