//! The library code for the `blogindex` generator, which renders a single
//! category-filtered blog index page. The architecture can be broken down into
//! three steps:
//!
//! 1. Loading posts from source files on disk ([`crate::parser`])
//! 2. Deriving the page state: counting posts per category
//!    ([`crate::category`]) and resolving the selected category from the
//!    page's query string ([`crate::selection`])
//! 3. Composing and rendering the page ([`crate::index`] and
//!    [`crate::write`])
//!
//! The second step is the only one with interesting invariants. Both of its
//! functions are total: every post list has a category count and every query
//! string has a selection (falling back to [`category::ALL`]).
//!
//! [`crate::build`] stitches the steps together for the command-line tool.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod category;
pub mod config;
pub mod index;
pub mod parser;
pub mod post;
pub mod selection;
mod value;
pub mod write;
