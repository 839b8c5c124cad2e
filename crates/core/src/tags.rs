//! Codec for the flavor tag blob stored on tasting notes.
//!
//! The blob is a JSON array of strings: flavor wheel ids plus user tags
//! carrying the `custom:` prefix.

use crate::FlavorTaxonomy;
use tracing::debug;

/// Prefix marking a user-entered tag.
pub const CUSTOM_TAG_PREFIX: &str = "custom:";

/// One decoded tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlavorTag {
    /// Flavor wheel node id
    Taxonomy(String),
    /// User label, without prefix
    Custom(String),
}

impl FlavorTag {
    fn from_raw(raw: String) -> Self {
        match raw.strip_prefix(CUSTOM_TAG_PREFIX) {
            Some(label) => Self::Custom(label.to_string()),
            None => Self::Taxonomy(raw),
        }
    }

    /// Display name, `None` for ids not in the wheel.
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Taxonomy(id) => FlavorTaxonomy::find_by_id(id).map(|n| n.name.to_string()),
            Self::Custom(label) => Some(label.clone()),
        }
    }
}

/// Decode a tag blob. Empty or malformed blobs decode to no tags.
pub fn decode_flavor_tags(blob: &str) -> Vec<FlavorTag> {
    if blob.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(blob) {
        Ok(raw) => raw.into_iter().map(FlavorTag::from_raw).collect(),
        Err(e) => {
            debug!("Ignoring malformed flavor tag blob: {}", e);
            Vec::new()
        }
    }
}

/// Encode wheel ids and custom labels into a tag blob.
///
/// Ids come first, sorted, then custom tags, sorted, each with its prefix.
pub fn encode_flavor_tags<I, C>(ids: I, custom: C) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let mut ids: Vec<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
    ids.sort();
    ids.dedup();

    let mut custom: Vec<String> = custom
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}{}", CUSTOM_TAG_PREFIX, s))
        .collect();
    custom.sort();
    custom.dedup();

    ids.extend(custom);
    serde_json::Value::from(ids).to_string()
}

/// Display names for a tag blob, dropping ids the wheel does not know.
pub fn resolve_tag_names(blob: &str) -> Vec<String> {
    decode_flavor_tags(blob)
        .iter()
        .filter_map(FlavorTag::display_name)
        .collect()
}
