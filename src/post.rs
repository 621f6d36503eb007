//! Defines the [`Post`] and [`Image`] types. Posts are produced by
//! [`crate::parser::Parser`] and are read-only from then on.

use chrono::NaiveDate;
use url::Url;

/// A single blog post as it appears on the index page.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The post's identifier: its source path relative to the posts directory,
    /// less the `.md` extension (e.g., `2021/hello` for `2021/hello.md`).
    pub id: String,

    /// The title of the post.
    pub title: String,

    /// A short, plain-text summary shown in the post list.
    pub summary: String,

    /// The display-formatted date, e.g., `2021.04.16.`.
    pub date: String,

    /// The parsed date. Used for ordering.
    pub sort_date: NaiveDate,

    /// The categories the post belongs to, in source order. May be empty.
    pub categories: Vec<String>,

    /// The post's thumbnail, if any.
    pub thumbnail: Option<Image>,

    /// The URL of the post's page.
    pub url: Url,
}

impl Post {
    /// Returns `true` if `category` is one of the post's categories. The
    /// comparison is case-sensitive.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// A reference to an image by URL. Images are never loaded or transformed.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub url: Url,
    pub alt: Option<String>,
}
