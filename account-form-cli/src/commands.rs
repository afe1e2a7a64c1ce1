//! Command execution against an initialised `AccountStore`.

use std::io::Write;

use account_form_core::utils::label::format_label;
use account_form_core::{Account, AccountStore, CoreError, TouchedField};
use anyhow::{Context, Result};
use serde::Serialize;

use crate::args::Command;

/// Apply `command` to `store` and write the outcome to `out`.
///
/// With `json` set, mutating commands print the resulting account list and
/// read commands print JSON instead of a table.
pub fn run(
    command: &Command,
    store: &mut AccountStore,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => {
            if json {
                return write_json(out, store.accounts());
            }
            write_table(out, store.accounts())?;
            return Ok(());
        }
        Command::Show { id } => {
            let account = store
                .get(id)
                .ok_or_else(|| CoreError::AccountNotFound(id.clone()))?;
            if json {
                return write_json(out, account);
            }
            write_table(out, std::slice::from_ref(account))?;
            return Ok(());
        }
        Command::Add => {
            store.add_account();
            if let Some(account) = store.accounts().last() {
                writeln!(out, "{}", account.id)?;
            }
        }
        Command::Remove { id } => store.remove_account(id),
        Command::SetType { id, account_type } => store.set_type(id, *account_type),
        Command::SetLogin { id, login } => store.set_login(id, login),
        Command::SetPassword { id, password } => store.set_password(id, password),
        Command::SetLabel { id, raw } => store.set_label_from_raw(id, raw),
        Command::Touch { id, field, unset } => store.set_touched(id, *field, !unset),
        Command::Reset => store.clear(),
    }

    if json {
        write_json(out, store.accounts())?;
    }
    Ok(())
}

/// Whether a failed command was caused by user input rather than the
/// environment; decides between `warn` and `error` when reporting it.
pub fn is_expected_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CoreError>()
        .is_some_and(CoreError::is_expected)
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

fn touched_summary(account: &Account) -> String {
    let touched: Vec<&str> = TouchedField::ALL
        .into_iter()
        .filter(|field| account.touched.get(*field))
        .map(TouchedField::as_str)
        .collect();
    if touched.is_empty() {
        "-".to_string()
    } else {
        touched.join(",")
    }
}

fn write_table(out: &mut impl Write, accounts: &[Account]) -> std::io::Result<()> {
    if accounts.is_empty() {
        return writeln!(out, "No accounts");
    }
    writeln!(
        out,
        "{:<36}  {:<5}  {:<16}  {:<8}  {:<24}  TOUCHED",
        "ID", "TYPE", "LOGIN", "PASSWORD", "LABEL"
    )?;
    for account in accounts {
        let password = match account.password.as_deref() {
            None => "-",
            Some("") => "(empty)",
            Some(_) => "****",
        };
        writeln!(
            out,
            "{:<36}  {:<5}  {:<16}  {:<8}  {:<24}  {}",
            account.id,
            account.account_type,
            account.login,
            password,
            format_label(&account.label),
            touched_summary(account)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use account_form_core::{AccountType, InMemoryStorage};

    fn run_to_string(command: &Command, store: &mut AccountStore, json: bool) -> String {
        let mut out = Vec::new();
        run(command, store, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn new_store() -> AccountStore {
        AccountStore::new(Arc::new(InMemoryStorage::new()))
    }

    #[test]
    fn add_prints_new_id() {
        let mut store = new_store();
        let printed = run_to_string(&Command::Add, &mut store, false);
        assert_eq!(printed.trim(), store.accounts()[0].id);
    }

    #[test]
    fn list_empty_store() {
        let mut store = new_store();
        assert_eq!(run_to_string(&Command::List, &mut store, false), "No accounts\n");
        assert_eq!(run_to_string(&Command::List, &mut store, true).trim(), "[]");
    }

    #[test]
    fn table_masks_password_and_shows_labels() {
        let mut store = new_store();
        store.add_account();
        let id = store.accounts()[0].id.clone();
        store.set_password(&id, "hunter2");
        store.set_label_from_raw(&id, "ops;eu");
        store.set_touched(&id, TouchedField::Login, true);

        let table = run_to_string(&Command::List, &mut store, false);
        assert!(table.contains("****"));
        assert!(!table.contains("hunter2"));
        assert!(table.contains("ops; eu"));
        assert!(table.contains("login"));
    }

    #[test]
    fn mutation_with_json_prints_state() {
        let mut store = new_store();
        store.add_account();
        let id = store.accounts()[0].id.clone();

        let printed = run_to_string(
            &Command::SetType {
                id: id.clone(),
                account_type: AccountType::Ldap,
            },
            &mut store,
            true,
        );

        let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value[0]["id"], id.as_str());
        assert_eq!(value[0]["type"], "LDAP");
        assert!(value[0]["password"].is_null());
    }

    #[test]
    fn touch_unset_clears_flag() {
        let mut store = new_store();
        store.add_account();
        let id = store.accounts()[0].id.clone();

        let touch = |unset| Command::Touch {
            id: id.clone(),
            field: TouchedField::Label,
            unset,
        };
        run_to_string(&touch(false), &mut store, false);
        assert!(store.accounts()[0].touched.label);
        run_to_string(&touch(true), &mut store, false);
        assert!(!store.accounts()[0].touched.label);
    }

    #[test]
    fn show_unknown_id_fails() {
        let mut store = new_store();
        let mut out = Vec::new();
        let err = run(
            &Command::Show {
                id: "ghost".to_string(),
            },
            &mut store,
            false,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::AccountNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn unknown_id_failure_is_expected() {
        let mut store = new_store();
        let err = run(
            &Command::Show {
                id: "ghost".to_string(),
            },
            &mut store,
            false,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(is_expected_failure(&err));

        let storage_err = anyhow::Error::new(CoreError::StorageError("disk".to_string()));
        assert!(!is_expected_failure(&storage_err));
        assert!(!is_expected_failure(&anyhow::anyhow!("io failure")));
    }

    #[test]
    fn unknown_id_mutations_succeed_silently() {
        let mut store = new_store();
        let printed = run_to_string(
            &Command::SetLogin {
                id: "ghost".to_string(),
                login: "root".to_string(),
            },
            &mut store,
            false,
        );
        assert!(printed.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn reset_clears_accounts() {
        let mut store = new_store();
        store.add_account();
        run_to_string(&Command::Reset, &mut store, false);
        assert!(store.is_empty());
    }
}
