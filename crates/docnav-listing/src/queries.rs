//! Read-only query operations over a [`SiteListing`].
//!
//! All operations are explicit linear scans with early exit on first
//! match. Routes are unique within a listing, so route equality is a
//! reliable identity for articles.

use serde::Serialize;

use crate::model::{Article, Category, SiteListing, Subcategory};

/// Lookup result bundling an article with its owners.
///
/// Borrowed view produced on demand; nothing in the tree holds
/// back-references.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ArticleHandle<'a> {
    /// Owning category.
    pub category: &'a Category,
    /// Owning subcategory.
    pub subcategory: &'a Subcategory,
    /// The article itself.
    pub article: &'a Article,
}

impl SiteListing {
    /// Find a category by slug.
    #[must_use]
    pub fn find_category(&self, slug: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.slug == slug)
    }

    /// Find an article by category and article slug.
    ///
    /// Scans every subcategory of the matching category.
    #[must_use]
    pub fn find_article(&self, category_slug: &str, article_slug: &str) -> Option<&Article> {
        let category = self.find_category(category_slug)?;
        for subcategory in &category.subcategories {
            for article in &subcategory.articles {
                if article.slug == article_slug {
                    return Some(article);
                }
            }
        }
        None
    }

    /// Find an article by exact route, returning it with its owners.
    #[must_use]
    pub fn find_article_by_route(&self, route: &str) -> Option<ArticleHandle<'_>> {
        for category in self.categories() {
            for subcategory in &category.subcategories {
                for article in &subcategory.articles {
                    if article.route == route {
                        return Some(ArticleHandle {
                            category,
                            subcategory,
                            article,
                        });
                    }
                }
            }
        }
        None
    }

    /// Iterate all articles in the flattened reading order:
    /// category order, then subcategory order, then article order.
    pub fn articles(&self) -> impl Iterator<Item = ArticleHandle<'_>> {
        self.categories().iter().flat_map(|category| {
            category.subcategories.iter().flat_map(move |subcategory| {
                subcategory.articles.iter().map(move |article| ArticleHandle {
                    category,
                    subcategory,
                    article,
                })
            })
        })
    }

    /// Previous and next article in the flattened reading order.
    ///
    /// Crosses subcategory and category boundaries: the predecessor of the
    /// first article in a subcategory is the last article of the previous
    /// subcategory (or the previous category's last subcategory), and
    /// symmetrically for the successor. The very first article has no
    /// predecessor and the very last has no successor.
    #[must_use]
    pub fn neighbors(&self, handle: &ArticleHandle<'_>) -> (Option<&Article>, Option<&Article>) {
        let mut prev = None;
        let mut iter = self.articles();
        while let Some(current) = iter.next() {
            if current.article.route == handle.article.route {
                let next = iter.next().map(|h| h.article);
                return (prev, next);
            }
            prev = Some(current.article);
        }
        (None, None)
    }
}
