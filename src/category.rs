//! Defines [`CategoryCounts`] and the [`aggregate`] function which counts
//! posts per category.

use std::collections::BTreeMap;

use crate::post::Post;

/// The reserved, synthetic category which every post belongs to.
pub const ALL: &str = "All";

/// Anything that can be counted by [`aggregate`].
pub trait Categorized {
    /// The categories the item belongs to.
    fn categories(&self) -> &[String];
}

impl Categorized for Post {
    fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// A mapping from category name to the number of posts in that category.
/// The [`ALL`] key is always present and holds the total number of posts.
///
/// Iterating yields [`ALL`] first and then the remaining categories in
/// ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCounts {
    all: usize,
    counts: BTreeMap<String, usize>,
}

impl CategoryCounts {
    fn new() -> CategoryCounts {
        CategoryCounts {
            all: 0,
            counts: BTreeMap::new(),
        }
    }

    /// Returns the count for `category`, or `None` if no post belongs to it.
    /// `get(ALL)` always returns `Some`.
    pub fn get(&self, category: &str) -> Option<usize> {
        if category == ALL {
            Some(self.all)
        } else {
            self.counts.get(category).copied()
        }
    }

    /// The total number of posts counted.
    pub fn total(&self) -> usize {
        self.all
    }

    /// The number of entries, including [`ALL`].
    pub fn len(&self) -> usize {
        self.counts.len() + 1
    }

    /// Always `false`; [`ALL`] is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over `(category, count)` pairs, [`ALL`] first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        std::iter::once((ALL, self.all))
            .chain(self.counts.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    fn increment(&mut self, category: &str) {
        // A post categorized as `All` is still only counted once under `All`.
        if category == ALL {
            return;
        }
        match self.counts.get_mut(category) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(category.to_owned(), 1);
            }
        }
    }
}

/// Counts posts per category. Each post adds one to every distinct category
/// it lists and one to [`ALL`], so `aggregate(posts).total()` always equals
/// `posts.len()`. The result does not depend on the order of `posts`. A post
/// listing the same category more than once adds one to that category, not
/// one per listing.
pub fn aggregate<T: Categorized>(posts: &[T]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for post in posts {
        let categories = post.categories();
        for (i, category) in categories.iter().enumerate() {
            // duplicates within one post count once
            if !categories[..i].contains(category) {
                counts.increment(category);
            }
        }
        counts.all += 1;
    }
    counts
}
