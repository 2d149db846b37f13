//! Listing tree types and structural validation.
//!
//! The tree is plain owned data with public fields so that generated
//! source files can construct it literally. Validation is performed once
//! by the generator before anything reads the listing; runtime consumers
//! never re-validate.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Article title as recorded in the listing.
///
/// The `InheritsSubcategory` variant makes the original empty-string
/// convention explicit: the article is represented in navigation by its
/// subcategory's heading rather than a heading of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleTitle {
    /// Title taken from the document's front matter.
    Titled(String),
    /// The article has no title of its own; the subcategory heading stands in.
    InheritsSubcategory,
}

impl ArticleTitle {
    /// Resolve the display title against the owning subcategory.
    ///
    /// For `InheritsSubcategory` inside an untitled subcategory this
    /// returns the empty string; [`SiteListing::validate`] rejects that
    /// combination, so it is unreachable in generated listings.
    #[must_use]
    pub fn resolve<'a>(&'a self, subcategory: &'a Subcategory) -> &'a str {
        match self {
            Self::Titled(title) => title,
            Self::InheritsSubcategory => subcategory.title.as_deref().unwrap_or_default(),
        }
    }
}

/// A single documentation article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// URL- and filesystem-safe identifier (lowercased file stem).
    pub slug: String,
    /// Display title, resolved from the document's front matter.
    pub title: ArticleTitle,
    /// URL path identifying this article (globally unique).
    pub route: String,
    /// Source file path relative to the content root.
    pub source_path: PathBuf,
}

/// An ordered group of articles inside a category.
///
/// `title: None` means the group renders without a subheading and its
/// articles merge into the category level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Optional subheading shown above the group's articles.
    pub title: Option<String>,
    /// Articles in reading order.
    pub articles: Vec<Article>,
}

/// A top-level navigation category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// URL prefix segment identifying the category (unique).
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Subcategories in navigation order.
    pub subcategories: Vec<Subcategory>,
}

/// The full navigational tree of the documentation site.
///
/// Immutable after construction; safe to share across threads without
/// coordination since no field is ever mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteListing {
    categories: Vec<Category>,
}

/// Structural validation failure for a [`SiteListing`].
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// A category declares no subcategories.
    #[error("category '{0}' declares no subcategories")]
    EmptyCategory(String),
    /// A subcategory declares no articles.
    #[error("subcategory '{subcategory}' in category '{category}' declares no articles")]
    EmptySubcategory {
        /// Owning category slug.
        category: String,
        /// Subcategory title, or "(untitled)".
        subcategory: String,
    },
    /// Two categories share a slug.
    #[error("duplicate category slug '{0}'")]
    DuplicateCategorySlug(String),
    /// Two articles share a route.
    #[error("duplicate route '{0}'")]
    DuplicateRoute(String),
    /// An article inherits its subcategory title, but the subcategory has none.
    #[error("article '{route}' inherits its subcategory title, but the subcategory is untitled")]
    UntitledInheritance {
        /// Route of the offending article.
        route: String,
    },
}

impl SiteListing {
    /// Create a listing from categories in navigation order.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Categories in navigation order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Check the structural invariants of the tree.
    ///
    /// Called by the generator before the listing is emitted. Checks:
    /// every category has at least one subcategory, every subcategory at
    /// least one article, category slugs are unique, routes are globally
    /// unique, and no article inherits a title from an untitled
    /// subcategory.
    ///
    /// # Errors
    ///
    /// Returns the first [`ListingError`] encountered, walking categories
    /// in order.
    pub fn validate(&self) -> Result<(), ListingError> {
        let mut category_slugs = HashSet::new();
        let mut routes = HashSet::new();

        for category in &self.categories {
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(ListingError::DuplicateCategorySlug(category.slug.clone()));
            }
            if category.subcategories.is_empty() {
                return Err(ListingError::EmptyCategory(category.slug.clone()));
            }

            for subcategory in &category.subcategories {
                if subcategory.articles.is_empty() {
                    return Err(ListingError::EmptySubcategory {
                        category: category.slug.clone(),
                        subcategory: subcategory
                            .title
                            .clone()
                            .unwrap_or_else(|| "(untitled)".to_owned()),
                    });
                }

                for article in &subcategory.articles {
                    if !routes.insert(article.route.as_str()) {
                        return Err(ListingError::DuplicateRoute(article.route.clone()));
                    }
                    if article.title == ArticleTitle::InheritsSubcategory
                        && subcategory.title.is_none()
                    {
                        return Err(ListingError::UntitledInheritance {
                            route: article.route.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, route: &str) -> Article {
        Article {
            slug: slug.to_owned(),
            title: ArticleTitle::Titled(slug.to_owned()),
            route: route.to_owned(),
            source_path: PathBuf::from(format!("{slug}.md")),
        }
    }

    fn valid_listing() -> SiteListing {
        SiteListing::new(vec![Category {
            slug: "guides".to_owned(),
            title: "Guides".to_owned(),
            subcategories: vec![Subcategory {
                title: Some("Basics".to_owned()),
                articles: vec![article("install", "/docs/guides/install")],
            }],
        }])
    }

    #[test]
    fn test_validate_accepts_valid_listing() {
        assert!(valid_listing().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_listing_is_valid() {
        // A site with no categories is unusual but not malformed.
        assert!(SiteListing::new(Vec::new()).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let listing = SiteListing::new(vec![Category {
            slug: "guides".to_owned(),
            title: "Guides".to_owned(),
            subcategories: Vec::new(),
        }]);

        let err = listing.validate().unwrap_err();
        assert!(matches!(err, ListingError::EmptyCategory(slug) if slug == "guides"));
    }

    #[test]
    fn test_validate_rejects_empty_subcategory() {
        let listing = SiteListing::new(vec![Category {
            slug: "guides".to_owned(),
            title: "Guides".to_owned(),
            subcategories: vec![Subcategory {
                title: None,
                articles: Vec::new(),
            }],
        }]);

        let err = listing.validate().unwrap_err();
        assert!(matches!(
            err,
            ListingError::EmptySubcategory { category, subcategory }
                if category == "guides" && subcategory == "(untitled)"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_category_slug() {
        let mut categories = vec![valid_listing().categories()[0].clone()];
        let mut dup = categories[0].clone();
        // Same slug, different routes so only the slug collides.
        dup.subcategories[0].articles[0].route = "/docs/guides/other".to_owned();
        categories.push(dup);

        let err = SiteListing::new(categories).validate().unwrap_err();
        assert!(matches!(err, ListingError::DuplicateCategorySlug(slug) if slug == "guides"));
    }

    #[test]
    fn test_validate_rejects_duplicate_route() {
        let listing = SiteListing::new(vec![Category {
            slug: "guides".to_owned(),
            title: "Guides".to_owned(),
            subcategories: vec![Subcategory {
                title: None,
                articles: vec![
                    article("install", "/docs/guides/install"),
                    article("setup", "/docs/guides/install"),
                ],
            }],
        }]);

        let err = listing.validate().unwrap_err();
        assert!(matches!(err, ListingError::DuplicateRoute(route) if route == "/docs/guides/install"));
    }

    #[test]
    fn test_validate_rejects_inheritance_in_untitled_subcategory() {
        let listing = SiteListing::new(vec![Category {
            slug: "guides".to_owned(),
            title: "Guides".to_owned(),
            subcategories: vec![Subcategory {
                title: None,
                articles: vec![Article {
                    slug: "install".to_owned(),
                    title: ArticleTitle::InheritsSubcategory,
                    route: "/docs/guides/install".to_owned(),
                    source_path: PathBuf::from("guides/install.md"),
                }],
            }],
        }]);

        let err = listing.validate().unwrap_err();
        assert!(matches!(
            err,
            ListingError::UntitledInheritance { route } if route == "/docs/guides/install"
        ));
    }

    #[test]
    fn test_resolve_titled() {
        let subcategory = Subcategory {
            title: Some("Basics".to_owned()),
            articles: Vec::new(),
        };
        let title = ArticleTitle::Titled("Installation".to_owned());

        assert_eq!(title.resolve(&subcategory), "Installation");
    }

    #[test]
    fn test_resolve_inherits_subcategory_title() {
        let subcategory = Subcategory {
            title: Some("Basics".to_owned()),
            articles: Vec::new(),
        };

        assert_eq!(ArticleTitle::InheritsSubcategory.resolve(&subcategory), "Basics");
    }

    #[test]
    fn test_empty_title_is_not_the_sentinel() {
        // A genuinely blank title stays distinct from inheritance.
        let subcategory = Subcategory {
            title: Some("Basics".to_owned()),
            articles: Vec::new(),
        };
        let title = ArticleTitle::Titled(String::new());

        assert_eq!(title.resolve(&subcategory), "");
        assert_ne!(title, ArticleTitle::InheritsSubcategory);
    }
}
