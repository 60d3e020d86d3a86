//! Key and namespace types
//!
//! - [`Key`]: a user key, validated once at the API boundary
//! - [`Namespace`]: the scope a store writes into (one per origin)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum key length in bytes.
pub const MAX_KEY_LEN: usize = 1024;

/// A validated user key.
///
/// Keys are non-empty, at most [`MAX_KEY_LEN`] bytes, and contain no NUL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(String);

impl Key {
    /// Validate and wrap a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage_core::Key;
    ///
    /// assert!(Key::new("user:1").is_ok());
    /// assert!(Key::new("").is_err());
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate(&key, "key")?;
        Ok(Key(key))
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned key text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Isolation scope inside a backend.
///
/// Two stores over the same backend with different namespaces never see
/// each other's entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Validate and wrap a namespace name. Same rules as [`Key`].
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name, "namespace")?;
        Ok(Namespace(name))
    }

    /// Borrow the namespace name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace(crate::config::DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate(text: &str, what: &str) -> Result<()> {
    let reason = if text.is_empty() {
        format!("{} must not be empty", what)
    } else if text.len() > MAX_KEY_LEN {
        format!("{} exceeds {} bytes", what, MAX_KEY_LEN)
    } else if text.contains('\0') {
        format!("{} must not contain NUL", what)
    } else {
        return Ok(());
    };
    Err(Error::InvalidKey {
        key: text.to_string(),
        reason,
    })
}
