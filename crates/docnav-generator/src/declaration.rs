//! Hand-authored listing declaration.
//!
//! The declaration fixes slugs and nesting only; titles are resolved from
//! document front matter during generation. Example:
//!
//! ```toml
//! [[category]]
//! slug = "guides"
//! title = "Guides"
//!
//! [[category.subcategory]]
//! title = "Getting started"
//! articles = ["installation", "quick-start"]
//!
//! [[category.subcategory]]
//! articles = ["faq"]
//! ```
//!
//! A subcategory without a `title` renders without a subheading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Parsed declaration file: categories in navigation order.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingDecl {
    /// Declared categories in navigation order.
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryDecl>,
}

/// One declared category.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDecl {
    /// Category slug (unique, lowercase).
    pub slug: String,
    /// Category display title.
    pub title: String,
    /// Subcategories in navigation order.
    #[serde(default, rename = "subcategory")]
    pub subcategories: Vec<SubcategoryDecl>,
}

/// One declared subcategory.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubcategoryDecl {
    /// Optional subheading; absent means the articles merge into the
    /// category level.
    #[serde(default)]
    pub title: Option<String>,
    /// Article slugs in reading order.
    pub articles: Vec<String>,
}

/// Declaration loading or validation error.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    /// Declaration file not found.
    #[error("Declaration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the file.
    #[error("I/O error reading declaration: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("Declaration parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Structural validation error.
    #[error("Declaration error: {0}")]
    Validation(String),
}

impl ListingDecl {
    /// Load and validate a declaration file.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError`] if the file is missing, unreadable,
    /// not valid TOML, or structurally invalid.
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        if !path.exists() {
            return Err(DeclarationError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate declaration text.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError`] on TOML or structural errors.
    pub fn parse(text: &str) -> Result<Self, DeclarationError> {
        let decl: Self = toml::from_str(text)?;
        decl.validate()?;
        Ok(decl)
    }

    /// True if `(category_slug, article_slug)` is declared.
    #[must_use]
    pub fn contains(&self, category_slug: &str, article_slug: &str) -> bool {
        self.categories
            .iter()
            .filter(|c| c.slug == category_slug)
            .flat_map(|c| &c.subcategories)
            .flat_map(|s| &s.articles)
            .any(|a| a == article_slug)
    }

    /// Check structural invariants of the declaration.
    ///
    /// Slugs must be lowercase kebab-case identifiers; every category
    /// needs at least one subcategory and every subcategory at least one
    /// article; category slugs are unique, and an article slug may appear
    /// only once within its category.
    fn validate(&self) -> Result<(), DeclarationError> {
        let mut category_slugs = std::collections::HashSet::new();

        for category in &self.categories {
            if !is_valid_slug(&category.slug) {
                return Err(DeclarationError::Validation(format!(
                    "invalid category slug '{}' (expected lowercase letters, digits, '-')",
                    category.slug
                )));
            }
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(DeclarationError::Validation(format!(
                    "duplicate category slug '{}'",
                    category.slug
                )));
            }
            if category.subcategories.is_empty() {
                return Err(DeclarationError::Validation(format!(
                    "category '{}' declares no subcategories",
                    category.slug
                )));
            }

            let mut article_slugs = std::collections::HashSet::new();
            for subcategory in &category.subcategories {
                if subcategory.articles.is_empty() {
                    return Err(DeclarationError::Validation(format!(
                        "subcategory '{}' in category '{}' declares no articles",
                        subcategory.title.as_deref().unwrap_or("(untitled)"),
                        category.slug
                    )));
                }
                for article in &subcategory.articles {
                    if !is_valid_slug(article) {
                        return Err(DeclarationError::Validation(format!(
                            "invalid article slug '{article}' in category '{}'",
                            category.slug
                        )));
                    }
                    if !article_slugs.insert(article.as_str()) {
                        return Err(DeclarationError::Validation(format!(
                            "article '{article}' declared twice in category '{}'",
                            category.slug
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// URL- and filesystem-safe lowercase identifier.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[[category]]
slug = "guides"
title = "Guides"

[[category.subcategory]]
title = "Getting started"
articles = ["installation", "quick-start"]

[[category.subcategory]]
articles = ["faq"]

[[category]]
slug = "reference"
title = "Reference"

[[category.subcategory]]
articles = ["cli"]
"#;

    #[test]
    fn test_parse_valid_declaration() {
        let decl = ListingDecl::parse(VALID).unwrap();

        assert_eq!(decl.categories.len(), 2);
        assert_eq!(decl.categories[0].slug, "guides");
        assert_eq!(decl.categories[0].subcategories.len(), 2);
        assert_eq!(
            decl.categories[0].subcategories[0].title.as_deref(),
            Some("Getting started")
        );
        assert!(decl.categories[0].subcategories[1].title.is_none());
    }

    #[test]
    fn test_contains() {
        let decl = ListingDecl::parse(VALID).unwrap();

        assert!(decl.contains("guides", "installation"));
        assert!(decl.contains("guides", "faq"));
        assert!(decl.contains("reference", "cli"));
        assert!(!decl.contains("guides", "cli"));
        assert!(!decl.contains("missing", "installation"));
    }

    #[test]
    fn test_empty_declaration_is_valid() {
        let decl = ListingDecl::parse("").unwrap();

        assert!(decl.categories.is_empty());
    }

    #[test]
    fn test_duplicate_category_slug_rejected() {
        let text = r#"
[[category]]
slug = "guides"
title = "Guides"
[[category.subcategory]]
articles = ["a"]

[[category]]
slug = "guides"
title = "More Guides"
[[category.subcategory]]
articles = ["b"]
"#;

        let err = ListingDecl::parse(text).unwrap_err();

        assert!(matches!(err, DeclarationError::Validation(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_duplicate_article_in_category_rejected() {
        let text = r#"
[[category]]
slug = "guides"
title = "Guides"
[[category.subcategory]]
articles = ["install"]
[[category.subcategory]]
title = "Advanced"
articles = ["install"]
"#;

        let err = ListingDecl::parse(text).unwrap_err();

        assert!(matches!(err, DeclarationError::Validation(msg) if msg.contains("twice")));
    }

    #[test]
    fn test_same_article_slug_in_different_categories_allowed() {
        let text = r#"
[[category]]
slug = "guides"
title = "Guides"
[[category.subcategory]]
articles = ["overview"]

[[category]]
slug = "reference"
title = "Reference"
[[category.subcategory]]
articles = ["overview"]
"#;

        assert!(ListingDecl::parse(text).is_ok());
    }

    #[test]
    fn test_category_without_subcategories_rejected() {
        let text = "[[category]]\nslug = \"guides\"\ntitle = \"Guides\"\n";

        let err = ListingDecl::parse(text).unwrap_err();

        assert!(matches!(err, DeclarationError::Validation(msg) if msg.contains("subcategories")));
    }

    #[test]
    fn test_subcategory_without_articles_rejected() {
        let text = r#"
[[category]]
slug = "guides"
title = "Guides"
[[category.subcategory]]
title = "Empty"
articles = []
"#;

        let err = ListingDecl::parse(text).unwrap_err();

        assert!(matches!(err, DeclarationError::Validation(msg) if msg.contains("no articles")));
    }

    #[test]
    fn test_uppercase_slug_rejected() {
        let text = r#"
[[category]]
slug = "Guides"
title = "Guides"
[[category.subcategory]]
articles = ["a"]
"#;

        let err = ListingDecl::parse(text).unwrap_err();

        assert!(matches!(err, DeclarationError::Validation(msg) if msg.contains("invalid category slug")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        // Article titles are never declared here; catch the attempt early.
        let text = r#"
[[category]]
slug = "guides"
title = "Guides"
[[category.subcategory]]
articles = ["a"]
article_titles = ["A"]
"#;

        let err = ListingDecl::parse(text).unwrap_err();

        assert!(matches!(err, DeclarationError::Parse(_)));
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("quick-start"));
        assert!(is_valid_slug("v2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Quick"));
        assert!(!is_valid_slug("quick start"));
        assert!(!is_valid_slug("-quick"));
        assert!(!is_valid_slug("quick-"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = ListingDecl::load(&dir.path().join("listing.toml")).unwrap_err();

        assert!(matches!(err, DeclarationError::NotFound(_)));
    }
}
