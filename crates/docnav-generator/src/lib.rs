//! Listing generation pipeline for the docnav documentation engine.
//!
//! The generator reconciles two sources of truth:
//!
//! - the **corpus**: markdown documents on disk, one directory level per
//!   category, each document carrying its title in YAML front matter;
//! - the **declaration**: a hand-authored TOML file fixing category /
//!   subcategory / article slugs and their navigation order (never
//!   titles — those live in the documents).
//!
//! A document without a declaration entry and a declaration entry without
//! a document are both build-breaking: the first would be unreachable
//! from navigation, the second points at a deleted or renamed file. A
//! document whose front matter lacks a `title` is merely skipped and
//! reported. On success the generator emits a Rust source file
//! constructing the finalized [`docnav_listing::SiteListing`] together
//! with route and slug lookup helpers.
//!
//! Generation is a one-shot, single-threaded step: it either completes
//! with a fully validated listing or fails without writing anything.

mod codegen;
mod declaration;
mod generator;
mod scanner;

pub use declaration::{CategoryDecl, DeclarationError, ListingDecl, SubcategoryDecl};
pub use generator::{
    GenerateError, GenerateReport, Generator, SkipReason, SkippedDocument,
};
