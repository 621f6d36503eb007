//! Defines the [`Parser`] and [`Error`] types, and the logic for loading
//! [`Post`]s from the file system into memory.

use std::{
    fmt,
    fs::File,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use url::Url;
use walkdir::WalkDir;

use crate::post::{Image, Post};

const MARKDOWN_EXTENSION: &str = "md";

/// The date format used in post frontmatter.
const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";

/// The date format shown on the index page, e.g. `2021.04.16.`.
const DISPLAY_DATE_FORMAT: &str = "%Y.%m.%d.";

/// Parses [`Post`] objects from source files.
pub struct Parser<'a> {
    /// `posts_url` is the base URL for post pages. It's used to prefix post
    /// page URLs (i.e., the URL for a post is `{posts_url}/{post_id}.html`).
    /// Relative thumbnail paths are resolved against the post page URL.
    posts_url: &'a Url,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(posts_url: &'a Url) -> Parser<'a> {
        Parser { posts_url }
    }

    /// Searches `source_directory` recursively for post files (extension =
    /// `.md`) and returns a list of [`Post`] objects, most recent first. Posts
    /// sharing a date are ordered by title, descending. Each post file must
    /// be structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with fields `title`, `date`, and optionally
    ///    `summary`, `categories`, `thumbnail`, and `thumbnail_alt`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Post body (ignored here)
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// date: 2021-04-16
    /// summary: A first post.
    /// categories: [Web]
    /// thumbnail: ./hello.png
    /// ---
    /// # Hello
    /// ```
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for result in WalkDir::new(source_directory).sort_by_file_name() {
            let entry = result?;
            if !entry.file_type().is_file()
                || entry.path().extension().and_then(|e| e.to_str()) != Some(MARKDOWN_EXTENSION)
            {
                continue;
            }

            // strip_prefix() should never fail since WalkDir yields paths
            // under `source_directory`
            let relative_path = entry
                .path()
                .strip_prefix(source_directory)
                .map_err(|_| InvalidFileNameError(entry.path().to_owned()))?;
            let post = self.parse_post(source_directory, relative_path)?;
            debug!(id = %post.id, categories = ?post.categories, "parsed post");
            posts.push(post);
        }

        posts.sort_by(|a, b| {
            b.sort_date
                .cmp(&a.sort_date)
                .then_with(|| b.title.cmp(&a.title))
        });
        Ok(posts)
    }

    /// Parses a single [`Post`] from the file at `relative_path` (relative to
    /// `posts_source_directory`), annotating any error with the path.
    fn parse_post(&self, posts_source_directory: &Path, relative_path: &Path) -> Result<Post> {
        match self._parse_post(posts_source_directory, relative_path) {
            Ok(p) => Ok(p),
            Err(e) => Err(Error::Annotated(
                format!("parsing post `{}`", relative_path.display()),
                Box::new(e),
            )),
        }
    }

    fn _parse_post(&self, posts_source_directory: &Path, relative_path: &Path) -> Result<Post> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(posts_source_directory.join(relative_path))?.read_to_string(&mut contents)?;
        let frontmatter = parse_frontmatter(&contents)?;

        let id = post_id(relative_path)?;
        let url = self.posts_url.join(&format!("{}.html", id))?;
        let date = NaiveDate::parse_from_str(&frontmatter.date, SOURCE_DATE_FORMAT)
            .map_err(|err| Error::InvalidDate(frontmatter.date.clone(), err))?;

        Ok(Post {
            thumbnail: match &frontmatter.thumbnail {
                Some(thumbnail) => Some(Image {
                    url: url.join(thumbnail)?,
                    alt: frontmatter.thumbnail_alt,
                }),
                None => None,
            },
            id,
            title: frontmatter.title,
            summary: frontmatter.summary,
            date: date.format(DISPLAY_DATE_FORMAT).to_string(),
            sort_date: date,
            categories: frontmatter.categories,
            url,
        })
    }
}

/// Derives a post ID from the post's path relative to the posts directory:
/// `foo/bar.md` becomes `foo/bar`, and a bundle's `foo/index.md` becomes
/// `foo`. Path components are joined with `/` regardless of platform.
fn post_id(relative_path: &Path) -> Result<String> {
    let is_bundle =
        relative_path.ends_with("index.md") && relative_path.parent() != Some(Path::new(""));
    let without_extension = if is_bundle {
        relative_path
            .parent()
            .ok_or_else(|| InvalidFileNameError(relative_path.to_owned()))?
            .to_owned()
    } else {
        relative_path.with_extension("")
    };

    let mut components = Vec::new();
    for component in without_extension.iter() {
        components.push(
            component
                .to_str()
                .ok_or_else(|| InvalidFileNameError(relative_path.to_owned()))?,
        );
    }
    Ok(components.join("/"))
}

fn parse_frontmatter(input: &str) -> Result<Frontmatter> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Err(Error::FrontmatterMissingStartFence);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::FrontmatterMissingEndFence),
        Some(offset) => Ok(serde_yaml::from_str(&input[FENCE.len()..FENCE.len() + offset])?),
    }
}

#[derive(Deserialize, Clone)]
struct Frontmatter {
    /// The title of the post.
    title: String,

    /// The date of the post (`YYYY-MM-DD`).
    date: String,

    /// A short summary for the post list.
    #[serde(default)]
    summary: String,

    /// The categories associated with the post.
    #[serde(default)]
    categories: Vec<String>,

    /// Path or URL of the post's thumbnail, relative to the post.
    #[serde(default)]
    thumbnail: Option<String>,

    #[serde(default)]
    thumbnail_alt: Option<String>,
}

#[derive(Debug)]
pub struct InvalidFileNameError(PathBuf);

impl fmt::Display for InvalidFileNameError {
    /// Displays an [`InvalidFileNameError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid file name: {:?}", &self.0)
    }
}

impl std::error::Error for InvalidFileNameError {
    /// Implements the [`std::error::Error`] trait for [`InvalidFileNameError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one was
    /// missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when the frontmatter `date` isn't a `YYYY-MM-DD` date.
    InvalidDate(String, chrono::ParseError),

    /// Returned when there is a problem parsing URLs.
    UrlParse(url::ParseError),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(InvalidFileNameError),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::InvalidDate(date, err) => {
                write!(f, "invalid date `{}`: {}", date, err)
            }
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::InvalidFileName(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::InvalidDate(_, err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::InvalidFileName(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<InvalidFileNameError> for Error {
    fn from(err: InvalidFileNameError) -> Error {
        Error::InvalidFileName(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL parsing and joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`].
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_posts() -> Result<()> {
        let posts_url = Url::parse("https://example.org/blog/posts/")?;
        let posts = Parser::new(&posts_url).parse_posts(Path::new("./testdata/posts/"))?;

        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(vec!["uncategorized", "mobile-web", "hello-web"], ids);

        let mobile_web = &posts[1];
        assert_eq!("Building for Mobile and Web", mobile_web.title);
        assert_eq!("2021.05.02.", mobile_web.date);
        assert_eq!(vec!["Mobile", "Web"], mobile_web.categories);
        assert_eq!(
            "https://example.org/blog/posts/mobile-web.html",
            mobile_web.url.as_str(),
        );
        assert_eq!(
            Some("https://example.org/blog/posts/images/phone.png"),
            mobile_web.thumbnail.as_ref().map(|t| t.url.as_str()),
        );

        assert!(posts[0].categories.is_empty());
        assert_eq!(None, posts[0].thumbnail);
        assert_eq!("", posts[0].summary);
        Ok(())
    }

    #[test]
    fn test_parse_posts_ordered_by_parsed_date_then_title() -> Result<()> {
        let posts_url = Url::parse("https://example.org/posts/")?;
        let posts = Parser::new(&posts_url).parse_posts(Path::new("./testdata/ordering/"))?;

        let got: Vec<(&str, &str)> = posts
            .iter()
            .map(|p| (p.title.as_str(), p.date.as_str()))
            .collect();
        assert_eq!(
            vec![
                ("October", "2021.10.01."),
                ("Beta", "2021.06.01."),
                ("Alpha", "2021.06.01."),
                ("April", "2021.04.16."),
            ],
            got,
        );
        Ok(())
    }

    #[test]
    fn test_parse_frontmatter_missing_start_fence() {
        match parse_frontmatter("title: x\n---\n") {
            Err(Error::FrontmatterMissingStartFence) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_parse_frontmatter_missing_end_fence() {
        match parse_frontmatter("---\ntitle: x\ndate: 2021-01-01\n") {
            Err(Error::FrontmatterMissingEndFence) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_parse_frontmatter_defaults() -> Result<()> {
        let frontmatter = parse_frontmatter("---\ntitle: Hi\ndate: 2021-01-01\n---\nbody")?;
        assert_eq!("Hi", frontmatter.title);
        assert_eq!("2021-01-01", frontmatter.date);
        assert!(frontmatter.categories.is_empty());
        assert_eq!(None, frontmatter.thumbnail);
        Ok(())
    }

    #[test]
    fn test_post_id() -> Result<()> {
        assert_eq!("hello", post_id(Path::new("hello.md"))?);
        assert_eq!("2021/hello", post_id(Path::new("2021/hello.md"))?);
        assert_eq!("bundle", post_id(Path::new("bundle/index.md"))?);
        assert_eq!("index", post_id(Path::new("index.md"))?);
        Ok(())
    }
}
