// SPDX-License-Identifier: MPL-2.0
//! Thumbnail URL derivation and async image fetching.
//!
//! Video tiles render the platform thumbnail for their id. Gallery grids
//! render a derived "thumbs" URL when the image host follows the
//! originals/thumbs layout; the lightbox always loads the original URL.
//! Fetched and decoded images are kept in a bounded in-memory cache.

use crate::catalog::MediaItem;
use crate::error::Result;
use iced::widget::image::Handle;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Path segment marking a full-resolution image directory.
const ORIGINALS_SEGMENT: &str = "originals";

/// Path segment marking a pre-scaled thumbnail directory.
const THUMBS_SEGMENT: &str = "thumbs";

/// Decoded thumbnail handles kept in memory, by URL.
const THUMB_CACHE_CAPACITY: usize = 512;

/// Platform thumbnail URL for a canonical video id.
///
/// Ids are already restricted to the URL-safe token charset by extraction,
/// so no escaping is needed here.
#[must_use]
pub fn video_thumb_url(id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id)
}

/// Derives the grid/preview URL for a gallery image.
///
/// When the URL's path goes through an `originals` directory and does not
/// already reference a `thumbs` directory, the filename's parent directory
/// is rewritten to its `thumbs` equivalent. All other URLs pass through
/// unchanged. The lightbox never uses this derivation.
#[must_use]
pub fn gallery_thumb_url(url: &str) -> String {
    if url.contains(&format!("/{}/", THUMBS_SEGMENT)) {
        return url.to_string();
    }
    let Some((parent, file)) = url.rsplit_once('/') else {
        return url.to_string();
    };
    let mut segments: Vec<&str> = parent.split('/').collect();
    let Some(last_originals) = segments
        .iter()
        .rposition(|seg| *seg == ORIGINALS_SEGMENT)
    else {
        return url.to_string();
    };
    segments[last_originals] = THUMBS_SEGMENT;
    format!("{}/{}", segments.join("/"), file)
}

/// Grid thumbnail URL for a wall tile: platform thumbnail for videos, the
/// derived thumbs URL of the first image for galleries.
#[must_use]
pub fn tile_thumb_url(item: &MediaItem) -> String {
    match item {
        MediaItem::Video { id } => video_thumb_url(id),
        MediaItem::Gallery { images, .. } => gallery_thumb_url(&images[0]),
    }
}

/// A fetched image decoded into an Iced handle, with its natural pixel size.
///
/// The natural size is what the loupe compares against the displayed size
/// to decide whether there is anything to magnify.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Fetches an image URL and decodes it. One attempt; a failure leaves the
/// tile on its placeholder.
pub async fn fetch_image(url: String) -> Result<FetchedImage> {
    let response = reqwest::get(&url).await?;
    let bytes = response.error_for_status()?.bytes().await?;
    decode_image(&bytes)
}

/// Decodes raw image bytes into a handle plus natural dimensions.
pub fn decode_image(bytes: &[u8]) -> Result<FetchedImage> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FetchedImage {
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}

/// Bounded cache of fetched images, with bookkeeping for in-flight and
/// failed URLs so each URL is fetched at most once per session.
pub struct ThumbCache {
    images: LruCache<String, FetchedImage>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl std::fmt::Debug for ThumbCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbCache")
            .field("cached", &self.images.len())
            .field("pending", &self.pending.len())
            .field("failed", &self.failed.len())
            .finish()
    }
}

impl Default for ThumbCache {
    fn default() -> Self {
        Self::new(THUMB_CACHE_CAPACITY)
    }
}

impl ThumbCache {
    /// Creates a cache bounded to `capacity` decoded images.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            images: LruCache::new(NonZeroUsize::new(capacity).expect("capacity must be non-zero")),
            pending: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Returns the cached image for `url` without touching recency, so the
    /// view layer can read during rendering.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&FetchedImage> {
        self.images.peek(url)
    }

    /// Whether a fetch for `url` failed this session.
    #[must_use]
    pub fn is_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Marks `url` as in flight. Returns `false` when the URL is already
    /// cached, pending, or known to fail; the caller should not spawn a
    /// fetch in that case.
    pub fn begin_fetch(&mut self, url: &str) -> bool {
        if self.images.contains(url) || self.failed.contains(url) {
            return false;
        }
        self.pending.insert(url.to_string())
    }

    /// Stores a completed fetch.
    pub fn insert(&mut self, url: String, image: FetchedImage) {
        self.pending.remove(&url);
        self.images.put(url, image);
    }

    /// Records a failed fetch; the URL will not be retried this session.
    pub fn mark_failed(&mut self, url: String) {
        self.pending.remove(&url);
        self.failed.insert(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_thumb_url_follows_platform_pattern() {
        assert_eq!(
            video_thumb_url("dQw4w9WgXcQ"),
            "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[test]
    fn originals_parent_directory_is_rewritten_to_thumbs() {
        assert_eq!(
            gallery_thumb_url("https://host/images/originals/a.jpg"),
            "https://host/images/thumbs/a.jpg"
        );
    }

    #[test]
    fn deeper_originals_segment_is_rewritten() {
        assert_eq!(
            gallery_thumb_url("https://host/originals/2024/a.jpg"),
            "https://host/thumbs/2024/a.jpg"
        );
    }

    #[test]
    fn urls_already_referencing_thumbs_pass_through() {
        let url = "https://host/images/thumbs/a.jpg";
        assert_eq!(gallery_thumb_url(url), url);

        let mixed = "https://host/thumbs/originals/a.jpg";
        assert_eq!(gallery_thumb_url(mixed), mixed);
    }

    #[test]
    fn urls_without_originals_pass_through() {
        let url = "https://host/images/full/a.jpg";
        assert_eq!(gallery_thumb_url(url), url);
    }

    #[test]
    fn filename_matching_the_marker_is_not_rewritten() {
        // Only directories are rewritten, never the file itself.
        let url = "https://host/images/originals";
        assert_eq!(gallery_thumb_url(url), url);
    }

    #[test]
    fn tile_thumb_url_covers_both_item_kinds() {
        let video = MediaItem::Video {
            id: "dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(tile_thumb_url(&video), video_thumb_url("dQw4w9WgXcQ"));

        let gallery = MediaItem::Gallery {
            id: "g1".to_string(),
            title: "T".to_string(),
            images: vec!["https://host/images/originals/a.jpg".to_string()],
        };
        assert_eq!(
            tile_thumb_url(&gallery),
            "https://host/images/thumbs/a.jpg"
        );
    }

    #[test]
    fn decode_rejects_garbage_bytes() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[test]
    fn cache_round_trip() {
        let mut cache = ThumbCache::new(4);
        assert!(cache.peek("u").is_none());
        assert!(cache.begin_fetch("u"));

        let image = FetchedImage {
            handle: Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            width: 1,
            height: 1,
        };
        cache.insert("u".to_string(), image);
        assert!(cache.peek("u").is_some());
        assert!(!cache.begin_fetch("u"));
    }

    #[test]
    fn begin_fetch_dedupes_in_flight_urls() {
        let mut cache = ThumbCache::new(4);
        assert!(cache.begin_fetch("u"));
        assert!(!cache.begin_fetch("u"));
    }

    #[test]
    fn failed_urls_are_not_retried() {
        let mut cache = ThumbCache::new(4);
        assert!(cache.begin_fetch("u"));
        cache.mark_failed("u".to_string());
        assert!(cache.is_failed("u"));
        assert!(!cache.begin_fetch("u"));
    }

    #[test]
    fn cache_evicts_least_recently_used_beyond_capacity() {
        let mut cache = ThumbCache::new(2);
        let image = || FetchedImage {
            handle: Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            width: 1,
            height: 1,
        };
        cache.insert("a".to_string(), image());
        cache.insert("b".to_string(), image());
        cache.insert("c".to_string(), image());
        assert!(cache.peek("a").is_none());
        assert!(cache.peek("c").is_some());
    }
}
