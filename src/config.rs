//! Loads the project configuration (`blogindex.yaml`) and the theme
//! configuration (`theme/theme.yaml`) into a [`Config`].

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

const PROJECT_FILE: &str = "blogindex.yaml";

#[derive(Deserialize)]
struct Project {
    site_root: Url,

    title: String,

    #[serde(default)]
    author: Option<String>,

    #[serde(default)]
    home_page: String,

    #[serde(default)]
    profile_image: Option<String>,

    #[serde(default)]
    profile_image_alt: Option<String>,
}

#[derive(Deserialize)]
struct Theme {
    index_template: Vec<PathBuf>,
}

/// Everything needed to build the index page. Usually created by
/// [`Config::from_directory`].
#[derive(Clone, Debug)]
pub struct Config {
    /// The site title, shown in the introduction.
    pub title: String,

    /// The site author, shown in the footer.
    pub author: Option<String>,

    /// The directory searched for post source files.
    pub posts_source_directory: PathBuf,

    /// The URL of the index page. Category links are built from it.
    pub home_page: Url,

    /// The URL prefix for post pages (`{site_root}/posts/`).
    pub posts_url: Url,

    /// The URL prefix for static assets (`{site_root}/static/`).
    pub static_url: Url,

    /// The image shown in the introduction banner.
    pub profile_image: Option<Url>,

    /// Alt text for the profile image.
    pub profile_image_alt: Option<String>,

    /// The template files, concatenated in order before parsing.
    pub index_template: Vec<PathBuf>,

    /// The file the rendered page is written to.
    pub output_file: PathBuf,
}

impl Config {
    /// Searches `dir` and its ancestors for a `blogindex.yaml` file and loads
    /// it with [`Config::from_project_file`].
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(Error::ProjectFileNotFound),
            }
        }
    }

    /// Loads the project file at `path` and the theme file in the `theme`
    /// directory beside it.
    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path
            .parent()
            .ok_or_else(|| Error::NoParentDirectory(path.to_owned()))?;

        let theme_dir = project_root.join("theme");
        let theme: Theme = serde_yaml::from_reader(open(&theme_dir.join("theme.yaml"), "theme")?)?;

        let site_root = with_trailing_slash(project.site_root);
        Ok(Config {
            title: project.title,
            author: project.author,
            posts_source_directory: project_root.join("posts"),
            home_page: site_root.join(&project.home_page)?,
            posts_url: site_root.join("posts/")?,
            static_url: site_root.join("static/")?,
            profile_image: match &project.profile_image {
                Some(relpath) => Some(site_root.join(relpath)?),
                None => None,
            },
            profile_image_alt: project.profile_image_alt,
            index_template: theme
                .index_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            output_file: output_directory.join("index.html"),
        })
    }
}

// [`Url::join`] treats the last path segment as a file name unless the path
// ends with a slash, so `https://example.org/blog` would lose `blog`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn open(path: &Path, kind: &'static str) -> Result<File> {
    File::open(path).map_err(|err| Error::Open {
        kind,
        path: path.to_owned(),
        err,
    })
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when no `blogindex.yaml` exists in the directory or any of
    /// its ancestors.
    ProjectFileNotFound,

    /// Returned when the project file path has no parent directory.
    NoParentDirectory(PathBuf),

    /// Returned when a configuration file can't be opened.
    Open {
        kind: &'static str,
        path: PathBuf,
        err: std::io::Error,
    },

    /// Returned when a configuration file isn't valid YAML or is missing
    /// required fields.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a configured URL can't be joined to the site root.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ProjectFileNotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::NoParentDirectory(path) => write!(
                f,
                "Can't get parent directory for project file '{}'",
                path.display()
            ),
            Error::Open { kind, path, err } => {
                write!(f, "Opening {} file `{}`: {}", kind, path.display(), err)
            }
            Error::DeserializeYaml(err) => write!(f, "Loading configuration: {}", err),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProjectFileNotFound => None,
            Error::NoParentDirectory(_) => None,
            Error::Open { err, .. } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`].
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
