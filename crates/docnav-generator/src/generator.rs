//! Reconciliation of the discovered corpus against the declaration.
//!
//! The generator walks the corpus, resolves each document's title from
//! front matter, cross-validates against the declaration in both
//! directions, and builds the finalized [`SiteListing`]. Fatal mismatches
//! abort the whole step; no partial listing or artifact is ever produced.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use docnav_frontmatter::FrontMatter;
use docnav_listing::{Article, ArticleTitle, Category, ListingError, SiteListing, Subcategory};

use crate::codegen::{self, WriteOutcome};
use crate::declaration::{DeclarationError, ListingDecl};
use crate::scanner::Scanner;

/// Fatal generation error. Any of these aborts the build step.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The configured content root is missing or not a directory.
    #[error("Content root not found: {}", .0.display())]
    ContentRootNotFound(PathBuf),
    /// I/O failure reading the corpus or writing the artifact.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Declaration file failed to load or validate.
    #[error("{0}")]
    Declaration(#[from] DeclarationError),
    /// A document exists on disk with no declared navigation entry.
    ///
    /// Build-breaking: an undeclared article would be unreachable from
    /// navigation.
    #[error(
        "document '{}' has no declared navigation entry \
         (expected article '{article_slug}' under category '{category_slug}' in the declaration)",
        .path.display()
    )]
    UndeclaredDocument {
        /// Source file, relative to the content root.
        path: PathBuf,
        /// Category slug derived from the directory name.
        category_slug: String,
        /// Article slug derived from the file name.
        article_slug: String,
    },
    /// The declaration names an article with no corresponding document.
    ///
    /// Build-breaking: the entry points at a deleted or renamed file.
    #[error(
        "navigation declares article '{article_slug}' under category '{category_slug}', \
         but no matching document exists"
    )]
    OrphanedDeclaration {
        /// Declared category slug.
        category_slug: String,
        /// Declared article slug.
        article_slug: String,
    },
    /// The finalized listing failed structural validation.
    #[error("{0}")]
    Listing(#[from] ListingError),
}

/// Why a document was excluded from indexing. Non-fatal.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    /// Front matter has no `title` field.
    #[error("no 'title' field in front matter")]
    MissingTitle,
    /// Front matter could not be parsed.
    #[error("invalid front matter: {0}")]
    InvalidFrontMatter(String),
}

/// A document excluded from indexing, reported but not fatal.
#[derive(Debug)]
pub struct SkippedDocument {
    /// Source file, relative to the content root.
    pub path: PathBuf,
    /// Exclusion reason.
    pub reason: SkipReason,
}

/// Result of a successful generation or check run.
#[derive(Debug)]
pub struct GenerateReport {
    /// The finalized, validated listing.
    pub listing: SiteListing,
    /// Documents excluded from indexing.
    pub skipped: Vec<SkippedDocument>,
    /// Artifact path, `None` in check mode.
    pub output: Option<PathBuf>,
    /// True if the artifact already held identical content.
    pub unchanged: bool,
}

/// Title and source location discovered for one declared article.
#[derive(Debug)]
struct DiscoveredArticle {
    title: String,
    source_path: PathBuf,
}

/// Per-category metadata discovered from the corpus.
///
/// Transient build-time structure; never persisted beyond the run.
#[derive(Debug, Default)]
struct DiscoveredMetadata {
    by_category: BTreeMap<String, BTreeMap<String, DiscoveredArticle>>,
}

impl DiscoveredMetadata {
    fn insert(&mut self, category_slug: String, article_slug: String, article: DiscoveredArticle) {
        self.by_category
            .entry(category_slug)
            .or_default()
            .insert(article_slug, article);
    }

    fn get(&self, category_slug: &str, article_slug: &str) -> Option<&DiscoveredArticle> {
        self.by_category.get(category_slug)?.get(article_slug)
    }
}

/// One-shot listing generator.
///
/// Construction is cheap; each [`Generator::generate`] or
/// [`Generator::check`] call performs a full scan-and-reconcile pass.
pub struct Generator {
    content_root: PathBuf,
    route_prefix: String,
}

impl Generator {
    /// Create a generator for a content root and route prefix.
    #[must_use]
    pub fn new(content_root: PathBuf, route_prefix: impl Into<String>) -> Self {
        Self {
            content_root,
            route_prefix: route_prefix.into(),
        }
    }

    /// Build, validate, and emit the listing artifact.
    ///
    /// If the artifact already holds identical content, nothing is
    /// rewritten and the report says so.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] on any fatal condition; the artifact is
    /// not touched in that case.
    pub fn generate(
        &self,
        decl: &ListingDecl,
        output: &Path,
    ) -> Result<GenerateReport, GenerateError> {
        let (listing, skipped) = self.build(decl)?;

        let outcome = codegen::write_artifact(output, &listing).map_err(|source| {
            GenerateError::Io {
                path: output.to_path_buf(),
                source,
            }
        })?;

        let unchanged = outcome == WriteOutcome::Unchanged;
        if unchanged {
            tracing::info!(path = %output.display(), "Listing artifact already up to date");
        } else {
            tracing::info!(path = %output.display(), "Wrote listing artifact");
        }

        Ok(GenerateReport {
            listing,
            skipped,
            output: Some(output.to_path_buf()),
            unchanged,
        })
    }

    /// Build and validate the listing without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] on any fatal condition.
    pub fn check(&self, decl: &ListingDecl) -> Result<GenerateReport, GenerateError> {
        let (listing, skipped) = self.build(decl)?;
        Ok(GenerateReport {
            listing,
            skipped,
            output: None,
            unchanged: false,
        })
    }

    /// Scan the corpus and reconcile it against the declaration.
    fn build(
        &self,
        decl: &ListingDecl,
    ) -> Result<(SiteListing, Vec<SkippedDocument>), GenerateError> {
        let documents = Scanner::new(self.content_root.clone()).scan()?;

        let mut discovered = DiscoveredMetadata::default();
        let mut skipped = Vec::new();

        for doc in documents {
            let text = fs::read_to_string(&doc.path).map_err(|source| GenerateError::Io {
                path: doc.path.clone(),
                source,
            })?;

            let front_matter = match FrontMatter::parse(&text) {
                Ok(front_matter) => front_matter,
                Err(e) => {
                    tracing::warn!(
                        path = %doc.rel_path.display(),
                        error = %e,
                        "Skipping document with malformed front matter"
                    );
                    skipped.push(SkippedDocument {
                        path: doc.rel_path,
                        reason: SkipReason::InvalidFrontMatter(e.to_string()),
                    });
                    continue;
                }
            };

            let Some(title) = front_matter.title else {
                tracing::warn!(
                    path = %doc.rel_path.display(),
                    "Skipping document without a front-matter title"
                );
                skipped.push(SkippedDocument {
                    path: doc.rel_path,
                    reason: SkipReason::MissingTitle,
                });
                continue;
            };

            if !decl.contains(&doc.category_slug, &doc.article_slug) {
                return Err(GenerateError::UndeclaredDocument {
                    path: doc.rel_path,
                    category_slug: doc.category_slug,
                    article_slug: doc.article_slug,
                });
            }

            discovered.insert(
                doc.category_slug,
                doc.article_slug,
                DiscoveredArticle {
                    title,
                    source_path: doc.rel_path,
                },
            );
        }

        let listing = self.assemble(decl, &discovered)?;
        listing.validate()?;
        Ok((listing, skipped))
    }

    /// Assemble the finalized listing in declaration order, pulling titles
    /// from the discovered metadata.
    fn assemble(
        &self,
        decl: &ListingDecl,
        discovered: &DiscoveredMetadata,
    ) -> Result<SiteListing, GenerateError> {
        let mut categories = Vec::with_capacity(decl.categories.len());

        for category_decl in &decl.categories {
            let mut subcategories = Vec::with_capacity(category_decl.subcategories.len());

            for subcategory_decl in &category_decl.subcategories {
                let mut articles = Vec::with_capacity(subcategory_decl.articles.len());

                for article_slug in &subcategory_decl.articles {
                    let Some(found) = discovered.get(&category_decl.slug, article_slug) else {
                        return Err(GenerateError::OrphanedDeclaration {
                            category_slug: category_decl.slug.clone(),
                            article_slug: article_slug.clone(),
                        });
                    };

                    let title = if found.title.is_empty() {
                        ArticleTitle::InheritsSubcategory
                    } else {
                        ArticleTitle::Titled(found.title.clone())
                    };

                    articles.push(Article {
                        slug: article_slug.clone(),
                        title,
                        route: self.route(&category_decl.slug, article_slug),
                        source_path: found.source_path.clone(),
                    });
                }

                subcategories.push(Subcategory {
                    title: subcategory_decl.title.clone(),
                    articles,
                });
            }

            categories.push(Category {
                slug: category_decl.slug.clone(),
                title: category_decl.title.clone(),
                subcategories,
            });
        }

        Ok(SiteListing::new(categories))
    }

    /// Route for an article: `{prefix}/{category}/{article}`.
    fn route(&self, category_slug: &str, article_slug: &str) -> String {
        let prefix = self.route_prefix.trim_end_matches('/');
        format!("{prefix}/{category_slug}/{article_slug}")
    }
}
