//! Composes the index page from its collaborators: the introduction banner,
//! the category chooser, the filtered post list, and the footer. See
//! [`IndexPage::to_value`] for the shape templates see.

use gtmpl_value::Value;
use std::collections::HashMap;
use url::Url;

use crate::category::{CategoryCounts, ALL};
use crate::post::{Image, Post};
use crate::selection::CATEGORY_PARAM;
use crate::value::{option_to_value, url_to_value};

/// One entry of the category chooser.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryLink {
    pub name: String,
    pub count: usize,

    /// Whether this is the currently selected category.
    pub selected: bool,

    /// The index page URL which selects this category.
    pub url: Url,
}

/// Builds the category chooser entries in [`CategoryCounts`] iteration order
/// ([`ALL`] first). Each entry links to `home_page` with the `category` query
/// parameter set. Any existing query on `home_page` is replaced.
pub fn category_links(
    counts: &CategoryCounts,
    selected: &str,
    home_page: &Url,
) -> Vec<CategoryLink> {
    counts
        .iter()
        .map(|(name, count)| {
            let mut url = home_page.clone();
            url.query_pairs_mut()
                .clear()
                .append_pair(CATEGORY_PARAM, name);
            CategoryLink {
                name: name.to_owned(),
                count,
                selected: name == selected,
                url,
            }
        })
        .collect()
}

/// Returns the posts visible under `selected`, preserving order. [`ALL`]
/// selects every post; a category no post uses selects none.
pub fn filter_posts<'a>(posts: &'a [Post], selected: &str) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| selected == ALL || post.has_category(selected))
        .collect()
}

/// The introduction banner.
#[derive(Clone, Debug)]
pub struct Introduction {
    pub title: String,
    pub profile_image: Option<Image>,
}

/// The footer.
#[derive(Clone, Debug)]
pub struct Footer {
    pub author: Option<String>,
    pub year: i32,
}

/// Everything rendered on the index page for one selected category.
pub struct IndexPage<'a> {
    pub introduction: Introduction,
    pub categories: Vec<CategoryLink>,
    pub posts: Vec<&'a Post>,
    pub selected_category: String,
    pub footer: Footer,
    pub home_page: &'a Url,
    pub static_url: &'a Url,
}

impl<'a> IndexPage<'a> {
    /// Composes the page for `selected_category` from all `posts` and their
    /// `counts`.
    pub fn new(
        posts: &'a [Post],
        counts: &CategoryCounts,
        selected_category: String,
        introduction: Introduction,
        footer: Footer,
        home_page: &'a Url,
        static_url: &'a Url,
    ) -> IndexPage<'a> {
        IndexPage {
            categories: category_links(counts, &selected_category, home_page),
            posts: filter_posts(posts, &selected_category),
            selected_category,
            introduction,
            footer,
            home_page,
            static_url,
        }
    }

    /// Converts the page into a [`Value::Object`] with the fields:
    ///
    /// * `introduction`: `{title, profile_image}`; `profile_image` is
    ///   `{url, alt}` or `nil`
    /// * `categories`: a list of `{name, count, selected, url}`
    /// * `posts`: a list of `{id, url, title, summary, date, categories,
    ///   thumbnail}`
    /// * `selected_category`: the selected category name
    /// * `footer`: `{author, year}`
    /// * `home_page` and `static_url`
    pub fn to_value(&self) -> Value {
        let mut introduction: HashMap<String, Value> = HashMap::new();
        introduction.insert(
            "title".to_owned(),
            Value::String(self.introduction.title.clone()),
        );
        introduction.insert(
            "profile_image".to_owned(),
            match &self.introduction.profile_image {
                Some(image) => image.into(),
                None => Value::Nil,
            },
        );

        let mut footer: HashMap<String, Value> = HashMap::new();
        footer.insert("author".to_owned(), option_to_value(&self.footer.author));
        footer.insert("year".to_owned(), Value::from(self.footer.year as i64));

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("introduction".to_owned(), Value::Object(introduction));
        m.insert(
            "categories".to_owned(),
            Value::Array(self.categories.iter().map(category_link_to_value).collect()),
        );
        m.insert(
            "posts".to_owned(),
            Value::Array(self.posts.iter().map(|&post| post.into()).collect()),
        );
        m.insert(
            "selected_category".to_owned(),
            Value::String(self.selected_category.clone()),
        );
        m.insert("footer".to_owned(), Value::Object(footer));
        m.insert("home_page".to_owned(), url_to_value(self.home_page));
        m.insert("static_url".to_owned(), url_to_value(self.static_url));
        Value::Object(m)
    }
}

fn category_link_to_value(link: &CategoryLink) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("name".to_owned(), Value::String(link.name.clone()));
    m.insert("count".to_owned(), Value::from(link.count as u64));
    m.insert("selected".to_owned(), Value::Bool(link.selected));
    m.insert("url".to_owned(), url_to_value(&link.url));
    Value::Object(m)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::category::aggregate;

    fn post(id: &str, categories: &[&str]) -> Post {
        Post {
            id: id.to_owned(),
            title: id.to_uppercase(),
            summary: String::new(),
            date: "2021.01.01.".to_owned(),
            sort_date: chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            thumbnail: None,
            url: Url::parse(&format!("https://example.org/posts/{}.html", id)).unwrap(),
        }
    }

    fn posts() -> Vec<Post> {
        vec![post("a", &["Web"]), post("b", &["Mobile", "Web"]), post("c", &[])]
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_filter_posts_all() {
        let posts = posts();
        assert_eq!(vec!["a", "b", "c"], ids(&filter_posts(&posts, ALL)));
    }

    #[test]
    fn test_filter_posts_category() {
        let posts = posts();
        assert_eq!(vec!["a", "b"], ids(&filter_posts(&posts, "Web")));
        assert_eq!(vec!["b"], ids(&filter_posts(&posts, "Mobile")));
    }

    #[test]
    fn test_filter_posts_unknown_category() {
        let posts = posts();
        assert!(filter_posts(&posts, "Nonexistent").is_empty());
        assert!(filter_posts(&posts, "web").is_empty());
    }

    #[test]
    fn test_category_links() -> Result<(), url::ParseError> {
        let posts = posts();
        let home_page = Url::parse("https://example.org/blog/")?;
        let links = category_links(&aggregate(&posts), "Web", &home_page);

        let summary: Vec<(&str, usize, bool)> = links
            .iter()
            .map(|l| (l.name.as_str(), l.count, l.selected))
            .collect();
        assert_eq!(
            vec![("All", 3, false), ("Mobile", 1, false), ("Web", 2, true)],
            summary,
        );
        assert_eq!("https://example.org/blog/?category=All", links[0].url.as_str());
        Ok(())
    }

    #[test]
    fn test_category_links_encode_names() -> Result<(), url::ParseError> {
        let posts = vec![post("a", &["C++ & Rust"])];
        let home_page = Url::parse("https://example.org/?category=Old")?;
        let links = category_links(&aggregate(&posts), ALL, &home_page);
        assert!(links[0].selected);
        assert_eq!(
            "https://example.org/?category=C%2B%2B+%26+Rust",
            links[1].url.as_str(),
        );
        Ok(())
    }

    #[test]
    fn test_index_page_unknown_selection() -> Result<(), url::ParseError> {
        let posts = posts();
        let home_page = Url::parse("https://example.org/")?;
        let static_url = home_page.join("static/")?;
        let page = IndexPage::new(
            &posts,
            &aggregate(&posts),
            "Nonexistent".to_owned(),
            Introduction {
                title: "Blog".to_owned(),
                profile_image: None,
            },
            Footer {
                author: None,
                year: 2021,
            },
            &home_page,
            &static_url,
        );
        assert!(page.posts.is_empty());
        assert!(page.categories.iter().all(|c| !c.selected));
        Ok(())
    }

    #[test]
    fn test_index_page_to_value() -> Result<(), url::ParseError> {
        let posts = posts();
        let home_page = Url::parse("https://example.org/")?;
        let static_url = home_page.join("static/")?;
        let page = IndexPage::new(
            &posts,
            &aggregate(&posts),
            "Mobile".to_owned(),
            Introduction {
                title: "Blog".to_owned(),
                profile_image: None,
            },
            Footer {
                author: Some("Jane".to_owned()),
                year: 2021,
            },
            &home_page,
            &static_url,
        );

        let m = match page.to_value() {
            Value::Object(m) => m,
            _ => panic!("page value should be an object"),
        };
        match m.get("posts") {
            Some(Value::Array(posts)) => assert_eq!(1, posts.len()),
            _ => panic!("`posts` should be an array"),
        }
        match m.get("categories") {
            Some(Value::Array(categories)) => assert_eq!(3, categories.len()),
            _ => panic!("`categories` should be an array"),
        }
        match m.get("selected_category") {
            Some(Value::String(selected)) => assert_eq!("Mobile", selected.as_str()),
            _ => panic!("`selected_category` should be a string"),
        }
        Ok(())
    }
}
