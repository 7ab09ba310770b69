//! Web address of a bookmark.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::ValidationError;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme regex"));
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[^\s/?#@]+(?:[/?#]\S*)?$").expect("valid url regex")
});

/// An absolute `http` or `https` address.
///
/// Urls are compared exactly as written (after trimming), so
/// `https://nusmods.com` and `https://nusmods.com/` are different urls.
///
/// ```
/// use mark::domain::Url;
///
/// let url = Url::new("https://nusmods.com").unwrap();
/// assert_eq!(url.as_str(), "https://nusmods.com");
/// assert!(Url::new("nusmods.com").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Url(String);

impl Url {
    /// Validates and wraps a url.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidUrl` when the scheme is not http(s),
    /// the host is missing, or the url contains whitespace.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let invalid = |reason| ValidationError::InvalidUrl {
            value: trimmed.to_string(),
            reason,
        };

        if !SCHEME_RE.is_match(trimmed) {
            return Err(invalid("url must start with http:// or https://"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid("url cannot contain whitespace"));
        }
        if !URL_RE.is_match(trimmed) {
            return Err(invalid("url is missing a host"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Url(\"{}\")", self.0)
    }
}

impl FromStr for Url {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Url {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.0
    }
}
