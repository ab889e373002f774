// SPDX-License-Identifier: MPL-2.0
//! Catalog loading: turns the raw JSON manifest into typed media items.
//!
//! The manifest is fetched once per launch, with no retry. Entries that fail
//! id extraction or gallery validation are dropped silently; a manifest that
//! cannot be fetched or parsed at all surfaces as an empty catalog error so
//! the wall can show its static "no content" message instead of a partial
//! grid.

use crate::error::{Error, ManifestError, Result};
use crate::video_id::parse_video_id;
use serde_json::Value;
use std::path::PathBuf;

/// Manifest field holding the item array.
const ITEMS_KEY: &str = "items";

/// Legacy manifest field, tried when the primary key is absent.
const LEGACY_ITEMS_KEY: &str = "videos";

/// One entry on the wall.
///
/// `id` is unique across the catalog and is the join key into the
/// watch-state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaItem {
    /// A single video, identified by its canonical platform id.
    Video { id: String },
    /// An ordered image gallery. `images` is non-empty by construction:
    /// empty galleries are dropped during loading.
    Gallery {
        id: String,
        title: String,
        images: Vec<String>,
    },
}

impl MediaItem {
    /// The catalog-wide identity of this item.
    pub fn id(&self) -> &str {
        match self {
            MediaItem::Video { id } => id,
            MediaItem::Gallery { id, .. } => id,
        }
    }

    /// Whether this item is a gallery.
    pub fn is_gallery(&self) -> bool {
        matches!(self, MediaItem::Gallery { .. })
    }
}

/// Where the manifest comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// A local JSON file.
    Path(PathBuf),
    /// An HTTP(S) URL.
    Url(String),
}

impl CatalogSource {
    /// Builds a source from a CLI argument: URLs are detected by scheme,
    /// everything else is treated as a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            CatalogSource::Url(arg.to_string())
        } else {
            CatalogSource::Path(PathBuf::from(arg))
        }
    }
}

/// Fetches and parses the manifest. Single attempt, no retry.
///
/// Fetch and top-level parse failures are errors (rendered as "no content");
/// per-entry failures are not; those entries are just dropped.
pub async fn load(source: CatalogSource) -> Result<Vec<MediaItem>> {
    let body = match source {
        CatalogSource::Path(path) => std::fs::read_to_string(&path)
            .map_err(|e| ManifestError::Unreachable(format!("{}: {}", path.display(), e)))?,
        CatalogSource::Url(url) => fetch_manifest(&url).await?,
    };
    parse_manifest(&body)
}

async fn fetch_manifest(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| ManifestError::Unreachable(e.to_string()))?;
    response
        .error_for_status()
        .map_err(|e| ManifestError::Unreachable(e.to_string()))?
        .text()
        .await
        .map_err(|e| Error::from(ManifestError::Unreachable(e.to_string())))
}

/// Parses a manifest body into media items.
///
/// The item array is read from the `items` field, falling back to the legacy
/// `videos` field. Each element is either a string (bare id or URL, resolved
/// through [`parse_video_id`]) or a gallery object. Unusable elements are
/// dropped without failing the rest of the catalog.
pub fn parse_manifest(body: &str) -> Result<Vec<MediaItem>> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| ManifestError::Malformed(e.to_string()))?;

    let entries = root
        .get(ITEMS_KEY)
        .or_else(|| root.get(LEGACY_ITEMS_KEY))
        .and_then(Value::as_array)
        .ok_or(ManifestError::MissingItems)?;

    let mut items = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;

    for entry in entries {
        match parse_entry(entry) {
            Some(item) => items.push(item),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        eprintln!("Dropped {} unusable manifest entries", dropped);
    }

    Ok(items)
}

/// Parses one manifest element, or `None` if it is unusable.
fn parse_entry(entry: &Value) -> Option<MediaItem> {
    match entry {
        Value::String(s) => parse_video_id(s).map(|id| MediaItem::Video { id }),
        Value::Object(obj) => {
            if obj.get("type").and_then(Value::as_str) != Some("gallery") {
                return None;
            }
            let id = obj.get("id").and_then(Value::as_str)?.trim();
            if id.is_empty() {
                return None;
            }
            let images: Vec<String> = obj
                .get("images")
                .and_then(Value::as_array)?
                .iter()
                .filter_map(Value::as_str)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect();
            if images.is_empty() {
                // An unopenable gallery tile would also break circular
                // navigation; it never reaches the wall.
                return None;
            }
            let title = obj
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(id)
                .to_string();
            Some(MediaItem::Gallery {
                id: id.to_string(),
                title,
                images,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_bare_ids_under_primary_key() {
        let items = parse_manifest(r#"{ "items": ["dQw4w9WgXcQ"] }"#).expect("parse failed");
        assert_eq!(
            items,
            vec![MediaItem::Video {
                id: "dQw4w9WgXcQ".to_string()
            }]
        );
    }

    #[test]
    fn falls_back_to_legacy_key() {
        let items = parse_manifest(r#"{ "videos": ["dQw4w9WgXcQ"] }"#).expect("parse failed");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn primary_key_wins_over_legacy_key() {
        let items = parse_manifest(
            r#"{ "items": ["dQw4w9WgXcQ"], "videos": ["dQw4w9WgXcQ", "9bZkp7q19f0"] }"#,
        )
        .expect("parse failed");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn parses_watch_urls() {
        let items =
            parse_manifest(r#"{ "items": ["https://www.youtube.com/watch?v=9bZkp7q19f0"] }"#)
                .expect("parse failed");
        assert_eq!(items[0].id(), "9bZkp7q19f0");
    }

    #[test]
    fn drops_unparsable_entries_keeping_the_rest() {
        let items = parse_manifest(
            r#"{ "items": ["dQw4w9WgXcQ", "not a video!", 42, "https://example.com/x"] }"#,
        )
        .expect("parse failed");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parses_gallery_objects() {
        let items = parse_manifest(
            r#"{ "items": [{ "type": "gallery", "id": "g1", "title": "T", "images": ["a.jpg", "b.jpg"] }] }"#,
        )
        .expect("parse failed");
        assert_eq!(
            items,
            vec![MediaItem::Gallery {
                id: "g1".to_string(),
                title: "T".to_string(),
                images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            }]
        );
    }

    #[test]
    fn gallery_without_images_is_dropped() {
        let items = parse_manifest(
            r#"{ "items": [{ "type": "gallery", "id": "g1", "title": "T", "images": [] }] }"#,
        )
        .expect("parse failed");
        assert!(items.is_empty());
    }

    #[test]
    fn gallery_without_id_is_dropped() {
        let items = parse_manifest(
            r#"{ "items": [{ "type": "gallery", "title": "T", "images": ["a.jpg"] }] }"#,
        )
        .expect("parse failed");
        assert!(items.is_empty());
    }

    #[test]
    fn gallery_title_defaults_to_id() {
        let items =
            parse_manifest(r#"{ "items": [{ "type": "gallery", "id": "g1", "images": ["a.jpg"] }] }"#)
                .expect("parse failed");
        match &items[0] {
            MediaItem::Gallery { title, .. } => assert_eq!(title, "g1"),
            other => panic!("expected gallery, got {:?}", other),
        }
    }

    #[test]
    fn object_without_gallery_tag_is_dropped() {
        let items = parse_manifest(r#"{ "items": [{ "id": "g1", "images": ["a.jpg"] }] }"#)
            .expect("parse failed");
        assert!(items.is_empty());
    }

    #[test]
    fn malformed_json_is_a_manifest_error() {
        let err = parse_manifest("not json").unwrap_err();
        assert!(matches!(
            err,
            Error::Manifest(ManifestError::Malformed(_))
        ));
    }

    #[test]
    fn missing_item_keys_is_a_manifest_error() {
        let err = parse_manifest(r#"{ "other": [] }"#).unwrap_err();
        assert!(matches!(err, Error::Manifest(ManifestError::MissingItems)));
    }

    #[test]
    fn item_order_is_preserved() {
        let items = parse_manifest(
            r#"{ "items": ["dQw4w9WgXcQ", { "type": "gallery", "id": "g1", "images": ["a.jpg"] }, "9bZkp7q19f0"] }"#,
        )
        .expect("parse failed");
        let ids: Vec<&str> = items.iter().map(MediaItem::id).collect();
        assert_eq!(ids, vec!["dQw4w9WgXcQ", "g1", "9bZkp7q19f0"]);
    }

    #[tokio::test]
    async fn load_reads_a_local_manifest_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        write!(file, r#"{{ "items": ["dQw4w9WgXcQ"] }}"#).expect("failed to write manifest");

        let items = load(CatalogSource::Path(file.path().to_path_buf()))
            .await
            .expect("load failed");
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn load_reports_missing_file_as_unreachable() {
        let err = load(CatalogSource::Path(PathBuf::from("/nonexistent/videos.json")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Manifest(ManifestError::Unreachable(_))
        ));
    }

    #[test]
    fn source_from_arg_detects_urls() {
        assert!(matches!(
            CatalogSource::from_arg("https://example.com/videos.json"),
            CatalogSource::Url(_)
        ));
        assert!(matches!(
            CatalogSource::from_arg("videos.json"),
            CatalogSource::Path(_)
        ));
    }
}
