//! Caller identity
//!
//! Policies are owned by the display name the identity provider reports for the
//! caller. Wrapping it in a newtype keeps store keys from being mixed up with
//! arbitrary strings coming off the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Display name of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Creates a user name, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty after trimming
    pub fn parse(name: impl AsRef<str>) -> Result<Self, CoreError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation("user name must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UserName {
    type Error = CoreError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::parse(name)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> String {
        name.0
    }
}
