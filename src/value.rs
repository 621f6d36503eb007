//! Conversions from [`Post`] and [`Image`] into template [`Value`]s.

use crate::post::{Image, Post};
use gtmpl_value::Value;
use std::collections::HashMap;
use url::Url;

impl From<&Image> for Value {
    fn from(image: &Image) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("url".to_owned(), url_to_value(&image.url));
        m.insert("alt".to_owned(), option_to_value(&image.alt));
        Value::Object(m)
    }
}

impl From<&Post> for Value {
    /// Converts a [`Post`] into an object with the fields `id`, `url`,
    /// `title`, `summary`, `date`, `categories`, and `thumbnail` (`nil` when
    /// the post has none).
    fn from(post: &Post) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), Value::String(post.id.clone()));
        m.insert("url".to_owned(), url_to_value(&post.url));
        m.insert("title".to_owned(), Value::String(post.title.clone()));
        m.insert("summary".to_owned(), Value::String(post.summary.clone()));
        m.insert("date".to_owned(), Value::String(post.date.clone()));
        m.insert(
            "categories".to_owned(),
            Value::Array(
                post.categories
                    .iter()
                    .map(|c| Value::String(c.clone()))
                    .collect(),
            ),
        );
        m.insert(
            "thumbnail".to_owned(),
            match &post.thumbnail {
                Some(image) => image.into(),
                None => Value::Nil,
            },
        );
        Value::Object(m)
    }
}

pub(crate) fn option_to_value(opt: &Option<String>) -> Value {
    match opt {
        Some(s) => Value::String(s.clone()),
        None => Value::Nil,
    }
}

// `From<&Url> for Value` would break the orphan rule since we own neither type.
pub(crate) fn url_to_value(url: &Url) -> Value {
    Value::String(url.to_string())
}
