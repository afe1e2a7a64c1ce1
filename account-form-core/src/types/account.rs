//! 账户相关类型定义

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 账户类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// 目录账户，不保存密码
    Ldap,
    /// 本地账户，必须有密码字段
    Local,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ldap => "LDAP",
            Self::Local => "LOCAL",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LDAP" => Ok(Self::Ldap),
            "LOCAL" => Ok(Self::Local),
            _ => Err(CoreError::ValidationError(format!(
                "Unknown account type: {s}"
            ))),
        }
    }
}

/// 标签项
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelItem {
    pub text: String,
}

impl LabelItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 字段交互标记
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TouchedFlags {
    pub label: bool,
    #[serde(rename = "type")]
    pub account_type: bool,
    pub login: bool,
    pub password: bool,
}

impl TouchedFlags {
    /// 读取指定字段的标记
    pub fn get(&self, field: TouchedField) -> bool {
        match field {
            TouchedField::Label => self.label,
            TouchedField::Type => self.account_type,
            TouchedField::Login => self.login,
            TouchedField::Password => self.password,
        }
    }

    /// 设置指定字段的标记
    pub fn set(&mut self, field: TouchedField, value: bool) {
        let flag = match field {
            TouchedField::Label => &mut self.label,
            TouchedField::Type => &mut self.account_type,
            TouchedField::Login => &mut self.login,
            TouchedField::Password => &mut self.password,
        };
        *flag = value;
    }
}

/// 可编辑字段名
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TouchedField {
    Label,
    Type,
    Login,
    Password,
}

impl TouchedField {
    pub const ALL: [Self; 4] = [Self::Label, Self::Type, Self::Login, Self::Password];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Type => "type",
            Self::Login => "login",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for TouchedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TouchedField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown field: {s}")))
    }
}

/// 账户信息
///
/// `password` 为 `None` 当且仅当 `account_type` 为 `Ldap`，
/// 该约束由 `AccountStore::set_type` 维护。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// 账户 ID
    pub id: String,
    /// 标签列表（按解析顺序）
    pub label: Vec<LabelItem>,
    /// 账户类型
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// 登录名
    pub login: String,
    /// 密码（LDAP 账户为 null）
    pub password: Option<String>,
    /// 字段交互标记
    pub touched: TouchedFlags,
}

impl Account {
    /// 以默认值创建新账户：本地类型、空密码、无标签
    pub fn new(id: String) -> Self {
        Self {
            id,
            label: Vec::new(),
            account_type: AccountType::Local,
            login: String::new(),
            password: Some(String::new()),
            touched: TouchedFlags::default(),
        }
    }

    /// 切换账户类型并维护密码的可空约束
    pub fn apply_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
        match account_type {
            AccountType::Ldap => self.password = None,
            AccountType::Local => {
                if self.password.is_none() {
                    self.password = Some(String::new());
                }
            }
        }
    }

    /// LDAP iff password is null
    pub fn is_consistent(&self) -> bool {
        (self.account_type == AccountType::Ldap) == self.password.is_none()
    }
}
