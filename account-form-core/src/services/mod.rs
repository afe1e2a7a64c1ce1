//! 业务逻辑服务层

mod account_store;

pub use account_store::{AccountStore, DEFAULT_STORAGE_KEY};
