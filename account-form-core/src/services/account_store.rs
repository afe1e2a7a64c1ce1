//! Account store
//!
//! Owns the editable account list. Every mutating operation ends with an
//! explicit `persist()`, which writes the whole list to one storage slot.
//! Nothing here returns an error: storage and decoding failures are logged
//! and absorbed, unknown ids are silent no-ops.

use std::sync::Arc;

use crate::traits::{DefaultIdGenerator, IdGenerator, KeyValueStorage};
use crate::types::{Account, AccountType, TouchedField};
use crate::utils::label::parse_label;

/// Storage slot holding the serialized account list
pub const DEFAULT_STORAGE_KEY: &str = "accounts_form_v1";

/// Account list state container
///
/// Construct once at startup, call `init_from_storage` once, then hand the
/// store to the UI layer by reference.
pub struct AccountStore {
    accounts: Vec<Account>,
    storage: Arc<dyn KeyValueStorage>,
    id_generator: Arc<dyn IdGenerator>,
    storage_key: String,
}

impl AccountStore {
    /// Create an empty store backed by `storage`
    ///
    /// Uses `DefaultIdGenerator` and `DEFAULT_STORAGE_KEY`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            accounts: Vec::new(),
            storage,
            id_generator: Arc::new(DefaultIdGenerator::new()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    // ===== Read access =====

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // ===== Persistence =====

    /// Load the account list from the storage slot
    ///
    /// An absent or unreadable slot leaves the in-memory list unchanged, and
    /// so does stored text that does not decode into an account list.
    pub fn init_from_storage(&mut self) {
        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                log::debug!("No stored accounts under {}", self.storage_key);
                return;
            }
            Err(e) => {
                log::warn!("Failed to read stored accounts, keeping current state: {e}");
                return;
            }
        };

        match serde_json::from_str::<Vec<Account>>(&raw) {
            Ok(accounts) => {
                log::info!("Loaded {} accounts from {}", accounts.len(), self.storage_key);
                self.accounts = accounts;
            }
            Err(e) => {
                // Discarded: no migration of foreign or legacy shapes
                log::warn!("Discarding unreadable stored accounts: {e}");
            }
        }
    }

    /// Write the whole account list to the storage slot
    pub fn persist(&self) {
        let raw = match serde_json::to_string(&self.accounts) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Failed to serialize accounts: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.storage_key, &raw) {
            log::error!("Failed to persist {} accounts: {e}", self.accounts.len());
            return;
        }
        log::debug!("Saved {} accounts to {}", self.accounts.len(), self.storage_key);
    }

    /// Drop every account and delete the storage slot
    pub fn clear(&mut self) {
        self.accounts.clear();
        if let Err(e) = self.storage.remove(&self.storage_key) {
            log::error!("Failed to remove {}: {e}", self.storage_key);
        }
    }

    // ===== Mutations =====

    /// Append a new LOCAL account with empty fields
    pub fn add_account(&mut self) {
        let account = Account::new(self.id_generator.generate());
        log::debug!("Adding account {}", account.id);
        self.accounts.push(account);
        self.persist();
    }

    /// Remove the account with `id`; persists even when nothing matched
    pub fn remove_account(&mut self, id: &str) {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        if self.accounts.len() == before {
            log::debug!("remove_account: no account {id}");
        }
        self.persist();
    }

    pub fn set_touched(&mut self, id: &str, field: TouchedField, value: bool) {
        let Some(account) = self.find_mut(id) else {
            log::debug!("set_touched: no account {id}");
            return;
        };
        account.touched.set(field, value);
        self.persist();
    }

    /// Change the account type
    ///
    /// Switching to LDAP clears the password; switching to LOCAL turns a
    /// cleared password into an empty string and keeps an existing one.
    pub fn set_type(&mut self, id: &str, account_type: AccountType) {
        let Some(account) = self.find_mut(id) else {
            log::debug!("set_type: no account {id}");
            return;
        };
        account.apply_type(account_type);
        self.persist();
    }

    pub fn set_login(&mut self, id: &str, login: &str) {
        let Some(account) = self.find_mut(id) else {
            log::debug!("set_login: no account {id}");
            return;
        };
        account.login = login.to_string();
        self.persist();
    }

    /// Set the password verbatim
    ///
    /// LDAP accounts carry no password, so the call is ignored for them.
    pub fn set_password(&mut self, id: &str, password: &str) {
        let Some(account) = self.find_mut(id) else {
            log::debug!("set_password: no account {id}");
            return;
        };
        if account.account_type == AccountType::Ldap {
            log::warn!("Ignoring password for LDAP account {id}");
            return;
        }
        account.password = Some(password.to_string());
        self.persist();
    }

    /// Replace the label list with the items parsed from `raw`
    pub fn set_label_from_raw(&mut self, id: &str, raw: &str) {
        let Some(account) = self.find_mut(id) else {
            log::debug!("set_label_from_raw: no account {id}");
            return;
        };
        account.label = parse_label(raw);
        self.persist();
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }
}
