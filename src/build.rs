//! Exports the [`build_index`] function which stitches together the high-level
//! steps of building the index page: parsing the posts ([`crate::parser`]),
//! counting categories ([`crate::category`]), resolving the selected category
//! ([`crate::selection`]), and rendering the page ([`crate::index`] and
//! [`crate::write`]).

use chrono::Datelike;
use std::fmt;
use tracing::{debug, info};

use crate::category::aggregate;
use crate::config::Config;
use crate::index::{Footer, IndexPage, Introduction};
use crate::parser::{Error as ParseError, Parser as PostParser};
use crate::post::Image;
use crate::selection::resolve_selection;
use crate::write::{parse_template, Error as WriteError, Writer};

/// Builds the index page from a [`Config`] object for the page address's
/// `raw_query` (e.g., `?category=Web`), writing the result to
/// [`Config::output_file`].
pub fn build_index(config: &Config, raw_query: &str) -> Result<()> {
    let posts = PostParser::new(&config.posts_url).parse_posts(&config.posts_source_directory)?;
    let counts = aggregate(&posts);
    for (category, count) in counts.iter() {
        debug!(category, count, "category count");
    }

    let selected_category = resolve_selection(raw_query);
    info!(
        posts = posts.len(),
        categories = counts.len() - 1,
        selected = %selected_category,
        "building index page"
    );

    let page = IndexPage::new(
        &posts,
        &counts,
        selected_category,
        Introduction {
            title: config.title.clone(),
            profile_image: config.profile_image.as_ref().map(|url| Image {
                url: url.clone(),
                alt: config.profile_image_alt.clone(),
            }),
        },
        Footer {
            author: config.author.clone(),
            year: chrono::Local::now().year(),
        },
        &config.home_page,
        &config.static_url,
    );

    let index_template = parse_template(config.index_template.iter())?;
    Writer {
        index_template: &index_template,
    }
    .write_page(&page, &config.output_file)?;

    info!(path = %config.output_file.display(), "wrote index page");
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the index page. Errors can be during parsing
/// or writing.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during parsing.
    Parse(ParseError),

    /// Returned for errors templating or writing the page.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
