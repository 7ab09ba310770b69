//! Bookmark value type, identified by its name and url.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Tag, Url, ValidationError};

/// Display name of a bookmark. Never blank.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Creates a name from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if the input is blank.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if any whitespace-separated word of the name equals
    /// `keyword`, ignoring case.
    pub fn contains_word(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.0
            .split_whitespace()
            .any(|word| word.to_lowercase() == keyword)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{}\")", self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

/// A saved web page.
///
/// Two bookmarks are equal when their name and url are equal; remark and
/// tags do not take part in equality or hashing.
///
/// ```
/// use mark::domain::{Bookmark, Name, Url};
///
/// let a = Bookmark::builder(Name::new("NUSMods").unwrap(), Url::new("https://nusmods.com").unwrap())
///     .remark(Some("Module planner"))
///     .build();
/// let b = Bookmark::new(Name::new("NUSMods").unwrap(), Url::new("https://nusmods.com").unwrap());
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Bookmark {
    name: Name,
    url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remark: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<Tag>,
}

impl Bookmark {
    /// Creates a bookmark with no remark and no tags.
    pub fn new(name: Name, url: Url) -> Self {
        Self::builder(name, url).build()
    }

    pub fn builder(name: Name, url: Url) -> BookmarkBuilder {
        BookmarkBuilder {
            name,
            url,
            remark: None,
            tags: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Starts a builder pre-filled with this bookmark's fields.
    pub fn to_builder(&self) -> BookmarkBuilder {
        BookmarkBuilder {
            name: self.name.clone(),
            url: self.url.clone(),
            remark: self.remark.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl PartialEq for Bookmark {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.url == other.url
    }
}

impl Eq for Bookmark {}

impl Hash for Bookmark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.url.hash(state);
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.url)?;
        if let Some(remark) = &self.remark {
            write!(f, " Remark: {}", remark)?;
        }
        for tag in &self.tags {
            write!(f, " [{}]", tag)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bookmark")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("remark", &self.remark)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Builder for bookmarks with optional fields.
pub struct BookmarkBuilder {
    name: Name,
    url: Url,
    remark: Option<String>,
    tags: Vec<Tag>,
}

impl BookmarkBuilder {
    pub fn name(mut self, name: Name) -> Self {
        self.name = name;
        self
    }

    pub fn url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Sets the remark. Blank remarks are normalized to `None`.
    pub fn remark(mut self, remark: Option<impl Into<String>>) -> Self {
        self.remark = remark
            .map(|s| s.into().trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// Sets the tags, keeping the first occurrence of each.
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        let mut unique = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        self.tags = unique;
        self
    }

    pub fn build(self) -> Bookmark {
        Bookmark {
            name: self.name,
            url: self.url,
            remark: self.remark,
            tags: self.tags,
        }
    }
}
