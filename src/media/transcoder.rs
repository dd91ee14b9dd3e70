//! Asset transcoding
//!
//! Every (asset, locale) pair with a file is fetched concurrently; the call
//! returns once all fetches have settled.

use super::{AssetFetcher, DEFAULT_CONTENT_TYPE, MediaItem};
use crate::models::{Asset, AssetFile, Locale, MediaMetadata, MediaUpload};
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Turns export assets into uploadable media.
pub struct MediaTranscoder<'a, F: AssetFetcher + ?Sized> {
    fetcher: &'a F,
}

impl<'a, F: AssetFetcher + ?Sized> MediaTranscoder<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Fetch and package all assets in all locales.
    ///
    /// Locales in which an asset has no file produce no item; a file entry
    /// without a URL or file name produces a failed item. Items come back
    /// asset-major, then in locale order.
    pub async fn transcode(&self, assets: &[Asset], locales: &[Locale]) -> Vec<MediaItem> {
        let pending = assets.iter().flat_map(|asset| {
            locales
                .iter()
                .filter(move |locale| asset.has_file(&locale.code))
                .map(move |locale| async move {
                    match asset.file(&locale.code) {
                        Some(file) => self.transcode_one(asset, &locale.code, file).await,
                        None => {
                            warn!(
                                "Asset {} ({}) has an unusable file entry",
                                asset.id(),
                                locale.code
                            );
                            MediaItem::Failed {
                                title: asset.file_name(&locale.code),
                            }
                        }
                    }
                })
        });

        let items = join_all(pending).await;

        let failed = items.iter().filter(|item| item.is_failed()).count();
        info!(
            "Transcoded {} media items from {} assets ({} failed)",
            items.len(),
            assets.len(),
            failed
        );

        items
    }

    async fn transcode_one(&self, asset: &Asset, locale: &str, file: AssetFile) -> MediaItem {
        let url = fetch_url(&file.url);
        debug!("Fetching asset {} ({}) from {}", asset.id(), locale, url);

        match self.fetcher.fetch(&url).await {
            Ok(fetched) => {
                let content_type = fetched
                    .content_type
                    .or(file.content_type)
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

                MediaItem::Ready(MediaUpload {
                    payload: fetched.bytes,
                    filename: file.file_name,
                    content_type,
                    metadata: MediaMetadata {
                        description: asset.description(locale).unwrap_or_default(),
                        contentful_id: asset.id().to_string(),
                        locale: locale.to_string(),
                        title: asset.title(locale).unwrap_or_default(),
                        original_url: file.url,
                    },
                })
            }
            Err(e) => {
                warn!(
                    "Failed to fetch asset {} ({}) from {}: {}",
                    asset.id(),
                    locale,
                    url,
                    e
                );
                MediaItem::Failed {
                    title: file.file_name,
                }
            }
        }
    }
}

/// Exports reference files with protocol-relative URLs.
pub(crate) fn fetch_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

/// Fetch and package all assets in all locales with `fetcher`.
pub async fn transcode_assets<F: AssetFetcher + ?Sized>(
    fetcher: &F,
    assets: &[Asset],
    locales: &[Locale],
) -> Vec<MediaItem> {
    MediaTranscoder::new(fetcher).transcode(assets, locales).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_relative_url_gets_https() {
        assert_eq!(
            fetch_url("//images.ctfassets.net/space/a.png"),
            "https://images.ctfassets.net/space/a.png"
        );
        assert_eq!(fetch_url("http://host/a.png"), "http://host/a.png");
    }
}
