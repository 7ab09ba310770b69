//! Builder for test bookmarks with sensible defaults.

use mark::domain::{Bookmark, Name, Tag, Url};

/// Builder for creating test bookmarks.
///
/// The url defaults to one derived from the name, so most tests only need
/// `TestBookmark::new("Name")`.
#[derive(Debug)]
pub struct TestBookmark {
    name: String,
    url: String,
    remark: Option<String>,
    tags: Vec<String>,
}

impl TestBookmark {
    /// Creates a new test bookmark with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self {
            url: format!("https://{slug}.example.com"),
            name,
            remark: None,
            tags: Vec::new(),
        }
    }

    /// Sets an explicit url.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the remark.
    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    /// Builds the domain bookmark.
    ///
    /// # Panics
    ///
    /// Panics if any field is invalid.
    pub fn to_bookmark(&self) -> Bookmark {
        let tags = self
            .tags
            .iter()
            .map(|t| Tag::new(t).expect("Invalid tag"))
            .collect();
        Bookmark::builder(
            Name::new(&self.name).expect("Invalid name"),
            Url::new(&self.url).expect("Invalid url"),
        )
        .remark(self.remark.clone())
        .tags(tags)
        .build()
    }
}
