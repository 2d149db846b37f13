//! Navigation listing model for the docnav documentation engine.
//!
//! This crate provides the immutable tree describing a documentation
//! site's table of contents:
//!
//! - [`SiteListing`] owns ordered [`Category`] entries, which own ordered
//!   [`Subcategory`] entries, which own ordered [`Article`] entries.
//! - Query operations ([`SiteListing::find_category`],
//!   [`SiteListing::find_article`], [`SiteListing::find_article_by_route`],
//!   [`SiteListing::neighbors`]) are read-only linear scans; corpora are
//!   documentation-scale, so no secondary index is kept.
//!
//! The listing is produced once by `docnav-generator` (which validates it
//! with [`SiteListing::validate`]) and never mutated afterwards. Queries
//! treat the data as trusted: a miss is an ordinary `None`, never an error.

mod model;
mod queries;

pub use model::{Article, ArticleTitle, Category, ListingError, SiteListing, Subcategory};
pub use queries::ArticleHandle;
