//! Email address newtype.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an email address.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email is longer than {} characters", Email::MAX_LENGTH)]
    TooLong,
    #[error("email needs an @ separating local part and domain")]
    MissingSeparator,
    #[error("email has nothing before the @")]
    MissingLocal,
    #[error("email has nothing after the @")]
    MissingDomain,
}

/// A structurally plausible email address.
///
/// Checks only that a non-empty local part and domain sit either side of an
/// @ within the RFC 5321 length limit. Accounts are matched by exact string
/// equality, so no case folding or other normalization happens here.
///
/// ```
/// use versiq_core::Email;
///
/// let email: Email = "shopper@versiq.shop".parse().unwrap();
/// assert_eq!(email.local_part(), "shopper");
/// assert_eq!(email.domain(), "versiq.shop");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// RFC 5321 upper bound on address length.
    pub const MAX_LENGTH: usize = 254;

    /// Validate and wrap an address.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input trips over: empty input,
    /// over-length input, a missing @, or an empty side of the @.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        if input.is_empty() {
            return Err(EmailError::Empty);
        }
        if input.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        let (local, domain) = input.split_once('@').ok_or(EmailError::MissingSeparator)?;
        if local.is_empty() {
            return Err(EmailError::MissingLocal);
        }
        if domain.is_empty() {
            return Err(EmailError::MissingDomain);
        }
        Ok(Self(input.to_owned()))
    }

    /// The full address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the @.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.split().0
    }

    /// Everything after the @.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Parsing guaranteed the separator; a deserialized value may lack it,
        // in which case the whole string counts as the local part.
        self.0.split_once('@').unwrap_or((&self.0, ""))
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
