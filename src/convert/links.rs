//! Reference link resolution
//!
//! Entry links resolve to the target's slug. Asset links resolve against
//! media that was uploaded successfully, matched on asset id and locale.

use crate::models::{Link, LinkType, ResolvedLink, UploadedMedia};
use std::collections::HashMap;

/// Uploaded media keyed by (source asset id, locale).
#[derive(Debug, Clone, Default)]
pub struct MediaIndex {
    by_asset: HashMap<(String, String), String>,
}

impl MediaIndex {
    /// Build the index. The first upload seen for an (asset, locale) pair wins.
    pub fn new(media: &[UploadedMedia]) -> Self {
        let mut by_asset = HashMap::new();
        for item in media {
            by_asset
                .entry((
                    item.metadata.contentful_id.clone(),
                    item.metadata.locale.clone(),
                ))
                .or_insert_with(|| item.name.clone());
        }
        Self { by_asset }
    }

    /// Assigned media name of `asset_id` in `locale`.
    pub fn name(&self, asset_id: &str, locale: &str) -> Option<&str> {
        self.by_asset
            .get(&(asset_id.to_string(), locale.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_asset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_asset.is_empty()
    }
}

/// Resolve a link for `locale`.
///
/// Returns `None` for asset links without uploaded media and for links of
/// any other kind.
pub fn resolve_link(link: &Link, media: &MediaIndex, locale: &str) -> Option<ResolvedLink> {
    match link.link_type {
        LinkType::Entry => Some(ResolvedLink::Link {
            slug: link.id.clone(),
        }),
        LinkType::Asset => media.name(&link.id, locale).map(|name| ResolvedLink::Media {
            name: name.to_string(),
        }),
        LinkType::Other(_) => None,
    }
}
