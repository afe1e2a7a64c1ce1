//! Storage adapters for the CLI frontend.

mod json_file_storage;

pub use json_file_storage::JsonFileStorage;
