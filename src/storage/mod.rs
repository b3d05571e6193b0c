//! Storage helpers for the local budget cache

pub mod file_io;

pub use file_io::{read_json_required, write_json_atomic};
