//! Account Form Core Library
//!
//! Provides the state container behind the editable account form:
//! - Account model (type-dependent password, parsed labels, touched flags)
//! - Account Store (mutations that persist after every change)
//! - Label parsing
//!
//! Storage and identifier generation are abstracted through traits, so the
//! same store runs against an in-memory map, a JSON file or any other
//! string-keyed local store.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{AccountStore, DEFAULT_STORAGE_KEY};
pub use traits::{DefaultIdGenerator, IdGenerator, InMemoryStorage, KeyValueStorage};
pub use types::{Account, AccountType, LabelItem, TouchedField, TouchedFlags};
