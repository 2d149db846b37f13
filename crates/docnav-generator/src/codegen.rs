//! Emission of the generated listing source file.
//!
//! The artifact is a standalone Rust module constructing the finalized
//! [`SiteListing`] from `docnav-listing` types, plus the two lookup
//! helpers consumers reach for first. It is a derived file: checked in,
//! overwritten on regeneration, never hand-edited. Output is fully
//! deterministic so regenerating an unchanged corpus yields a byte-equal
//! file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Component, Path};

use docnav_listing::{ArticleTitle, SiteListing};

/// Result of writing the artifact.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    /// File was created or rewritten.
    Written,
    /// Existing file already held identical content.
    Unchanged,
}

/// Write the generated source file, creating parent directories as needed.
///
/// Skips the write when the file already holds identical content, so an
/// unchanged corpus does not dirty build timestamps.
pub(crate) fn write_artifact(path: &Path, listing: &SiteListing) -> std::io::Result<WriteOutcome> {
    let source = render(listing);

    if let Ok(existing) = fs::read_to_string(path)
        && existing == source
    {
        return Ok(WriteOutcome::Unchanged);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, source)?;
    Ok(WriteOutcome::Written)
}

/// Render the listing as Rust source text.
pub(crate) fn render(listing: &SiteListing) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "// Generated by `docnav generate`. Do not edit; regenerating overwrites this file.\n\
         //\n\
         // Structure and order come from the listing declaration; titles come\n\
         // from each document's front matter.\n\
         \n\
         use std::path::PathBuf;\n\
         use std::sync::OnceLock;\n\
         \n\
         use docnav_listing::{{Article, ArticleHandle, ArticleTitle, Category, SiteListing, Subcategory}};\n\
         \n\
         /// The site listing, built once per process and shared read-only.\n\
         pub fn site_listing() -> &'static SiteListing {{\n\
         {I}static LISTING: OnceLock<SiteListing> = OnceLock::new();\n\
         {I}LISTING.get_or_init(build_listing)\n\
         }}\n\
         \n\
         /// Look up an article by category and article slug.\n\
         pub fn find_article(category_slug: &str, article_slug: &str) -> Option<&'static Article> {{\n\
         {I}site_listing().find_article(category_slug, article_slug)\n\
         }}\n\
         \n\
         /// Look up an article by route, together with its owning category and subcategory.\n\
         pub fn find_article_by_route(route: &str) -> Option<ArticleHandle<'static>> {{\n\
         {I}site_listing().find_article_by_route(route)\n\
         }}\n\
         \n\
         #[rustfmt::skip]\n\
         fn build_listing() -> SiteListing {{\n\
         {I}SiteListing::new(vec![",
        I = INDENT
    );

    for category in listing.categories() {
        let _ = writeln!(out, "{}Category {{", indent(2));
        let _ = writeln!(out, "{}slug: {}.to_owned(),", indent(3), str_literal(&category.slug));
        let _ = writeln!(out, "{}title: {}.to_owned(),", indent(3), str_literal(&category.title));
        let _ = writeln!(out, "{}subcategories: vec![", indent(3));

        for subcategory in &category.subcategories {
            let _ = writeln!(out, "{}Subcategory {{", indent(4));
            match &subcategory.title {
                Some(title) => {
                    let _ = writeln!(
                        out,
                        "{}title: Some({}.to_owned()),",
                        indent(5),
                        str_literal(title)
                    );
                }
                None => {
                    let _ = writeln!(out, "{}title: None,", indent(5));
                }
            }
            let _ = writeln!(out, "{}articles: vec![", indent(5));

            for article in &subcategory.articles {
                let _ = writeln!(out, "{}Article {{", indent(6));
                let _ = writeln!(out, "{}slug: {}.to_owned(),", indent(7), str_literal(&article.slug));
                match &article.title {
                    ArticleTitle::Titled(title) => {
                        let _ = writeln!(
                            out,
                            "{}title: ArticleTitle::Titled({}.to_owned()),",
                            indent(7),
                            str_literal(title)
                        );
                    }
                    ArticleTitle::InheritsSubcategory => {
                        let _ = writeln!(
                            out,
                            "{}title: ArticleTitle::InheritsSubcategory,",
                            indent(7)
                        );
                    }
                }
                let _ = writeln!(out, "{}route: {}.to_owned(),", indent(7), str_literal(&article.route));
                let _ = writeln!(
                    out,
                    "{}source_path: PathBuf::from({}),",
                    indent(7),
                    str_literal(&path_literal(&article.source_path))
                );
                let _ = writeln!(out, "{}}},", indent(6));
            }

            let _ = writeln!(out, "{}],", indent(5));
            let _ = writeln!(out, "{}}},", indent(4));
        }

        let _ = writeln!(out, "{}],", indent(3));
        let _ = writeln!(out, "{}}},", indent(2));
    }

    let _ = writeln!(out, "{}])", indent(1));
    let _ = writeln!(out, "}}");

    out
}

const INDENT: &str = "    ";

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

/// Render a string as a Rust string literal (Debug formatting escapes
/// quotes, backslashes, and control characters).
fn str_literal(value: &str) -> String {
    format!("{value:?}")
}

/// Render a relative path with forward slashes regardless of host OS.
fn path_literal(path: &Path) -> String {
    let segments: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    segments.join("/")
}
