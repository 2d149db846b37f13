//! YAML front-matter extraction for markdown documents.
//!
//! A front-matter block is a YAML mapping delimited by `---` lines at the
//! very start of a document:
//!
//! ```md
//! ---
//! title: Installation
//! authors: [alice, bob]
//! ---
//! # Installation
//! ```
//!
//! [`FrontMatter::parse`] is pure over the document text. A document with
//! no front-matter block yields an empty [`FrontMatter`], not an error;
//! only a present-but-malformed block fails. The `title` field is the one
//! field the indexing pipeline consumes; every other key is kept in a
//! generic field map so multi-valued metadata (author lists, tags)
//! survives extraction.

use std::collections::BTreeMap;

/// Parsed front matter of one markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    /// Declared `title`, if any.
    ///
    /// `Some("")` is meaningful downstream (the article inherits its
    /// subcategory heading) and is preserved as-is; `None` means the key
    /// was absent.
    pub title: Option<String>,
    /// All remaining fields, in declaration-independent sorted order.
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Error parsing a front-matter block.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// An opening `---` fence without a closing one.
    #[error("unterminated front matter block (missing closing '---')")]
    Unterminated,
    /// The block is present but is not valid YAML.
    #[error("invalid YAML in front matter: {0}")]
    Yaml(String),
    /// The block parsed, but to something other than a mapping.
    #[error("front matter must be a YAML mapping")]
    NotAMapping,
    /// The `title` key holds a non-string value.
    #[error("front matter 'title' must be a single string value")]
    TitleType,
}

impl FrontMatter {
    /// Parse the front-matter block of a document, if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error only for a block that exists but is malformed:
    /// unterminated fence, invalid YAML, a non-mapping document, or a
    /// non-string `title`.
    pub fn parse(text: &str) -> Result<Self, FrontMatterError> {
        let Some(block) = split_front_matter(text)? else {
            return Ok(Self::default());
        };

        let trimmed = block.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(trimmed).map_err(|e| FrontMatterError::Yaml(e.to_string()))?;
        let serde_yaml::Value::Mapping(mapping) = value else {
            return Err(FrontMatterError::NotAMapping);
        };

        let mut front_matter = Self::default();
        for (key, value) in mapping {
            let serde_yaml::Value::String(key) = key else {
                return Err(FrontMatterError::Yaml("non-string mapping key".to_owned()));
            };
            if key == "title" {
                let serde_yaml::Value::String(title) = value else {
                    return Err(FrontMatterError::TitleType);
                };
                front_matter.title = Some(title);
            } else {
                let json = serde_json::to_value(&value)
                    .map_err(|e| FrontMatterError::Yaml(e.to_string()))?;
                front_matter.fields.insert(key, json);
            }
        }

        Ok(front_matter)
    }

    /// True if the document declared no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.fields.is_empty()
    }
}

/// Split off the front-matter block body, if the document opens with one.
///
/// Returns `Ok(None)` when the document does not start with a `---` fence
/// on a line of its own; such documents simply have no front matter. A
/// later `---` in the body is a markdown thematic break, not a fence.
fn split_front_matter(text: &str) -> Result<Option<&str>, FrontMatterError> {
    let Some(rest) = text.strip_prefix("---") else {
        return Ok(None);
    };
    // The opening fence must be alone on its line.
    let Some(body) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Ok(Some(&body[..offset]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}
