//! Decentralized identifiers.
//!
//! Every BrainShare participant is addressed by a DID. The wire carries
//! them as plain strings; [`Did`] checks the `did:method:identifier`
//! shape once, at the boundary, and the rest of the workspace works with
//! values that are known well-formed. Anything beyond shape (resolving
//! the DID, comparing methods) is out of scope here.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A shape-checked decentralized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Did {
    /// Check the `did:method:identifier` shape and wrap the string.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidDid`] when the prefix is wrong, the
    /// method is empty or not lowercase alphanumeric, or the identifier
    /// part is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let invalid = || ValidationError::InvalidDid(s.clone());

        let Some((method, identifier)) = s
            .strip_prefix("did:")
            .and_then(|rest| rest.split_once(':'))
        else {
            return Err(invalid());
        };
        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            || identifier.is_empty()
        {
            return Err(invalid());
        }

        Ok(Self(s))
    }

    /// The full DID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The method label (`web` in `did:web:example.com`).
    pub fn method(&self) -> &str {
        self.parts().0
    }

    /// Everything after the method label.
    pub fn method_specific_id(&self) -> &str {
        self.parts().1
    }

    fn parts(&self) -> (&str, &str) {
        // Shape was checked in `new`, so the split cannot miss.
        self.0["did:".len()..].split_once(':').unwrap_or(("", ""))
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
