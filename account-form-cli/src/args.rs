//! CLI argument definitions using clap.

use std::path::PathBuf;

use account_form_core::{AccountType, TouchedField, DEFAULT_STORAGE_KEY};
use clap::{Parser, Subcommand};

/// Edit the locally stored account list.
#[derive(Parser, Debug)]
#[command(name = "account-form")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    // === Global flags ===
    /// Directory holding the local store file
    #[arg(long, env = "ACCOUNT_FORM_DATA_DIR", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage slot the account list is kept under
    #[arg(
        long,
        env = "ACCOUNT_FORM_STORAGE_KEY",
        value_name = "KEY",
        default_value = DEFAULT_STORAGE_KEY,
        global = true
    )]
    pub storage_key: String,

    /// Print the resulting account list as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all accounts
    List,

    /// Show one account
    Show { id: String },

    /// Append an empty LOCAL account and print its id
    Add,

    /// Remove an account
    Remove { id: String },

    /// Change the account type (ldap or local)
    SetType {
        id: String,
        #[arg(value_name = "TYPE")]
        account_type: AccountType,
    },

    /// Set the login
    SetLogin { id: String, login: String },

    /// Set the password (LOCAL accounts only)
    SetPassword { id: String, password: String },

    /// Replace the labels from a `;`-separated string
    SetLabel {
        id: String,
        #[arg(value_name = "RAW", allow_hyphen_values = true)]
        raw: String,
    },

    /// Mark a field (label, type, login, password) as touched
    Touch {
        id: String,
        field: TouchedField,
        /// Clear the flag instead of setting it
        #[arg(long)]
        unset: bool,
    },

    /// Delete every account and the storage slot
    Reset,
}

impl Command {
    /// Whether the command changes the stored list
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::List | Self::Show { .. })
    }
}
