//! Storage layer abstraction trait definition

mod id_generator;
mod key_value_storage;

pub use id_generator::{DefaultIdGenerator, IdGenerator};
pub use key_value_storage::{InMemoryStorage, KeyValueStorage};
