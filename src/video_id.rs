// SPDX-License-Identifier: MPL-2.0
//! Canonical video-id extraction.
//!
//! Manifest entries refer to videos in several historical shapes: bare ids,
//! full watch URLs, short-link URLs, shorts and embed paths. This module maps
//! all of them onto the canonical id, or `None` for anything unrecognized.
//! The mapping is stable: the same input always yields the same id.

/// Shortest accepted bare-id length.
const ID_MIN_LEN: usize = 8;

/// Longest accepted bare-id length.
const ID_MAX_LEN: usize = 15;

/// Extracts a canonical video id from a manifest entry.
///
/// Accepted inputs:
/// - a bare id: 8–15 characters from `[A-Za-z0-9_-]`
/// - `https://youtu.be/<id>`
/// - `https://www.youtube.com/watch?v=<id>` (any query position)
/// - `https://www.youtube.com/shorts/<id>`
/// - `https://www.youtube.com/embed/<id>`
///
/// Returns `None` for empty input, unrecognized hosts, and malformed URLs.
pub fn parse_video_id(input: &str) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if is_bare_id(s) && !s.contains("http") {
        return Some(s.to_string());
    }

    let (host, path, query) = split_url(s)?;

    if host.contains("youtu.be") {
        return first_path_segment(path).map(str::to_string);
    }

    if host.contains("youtube.com") {
        if let Some(v) = query_param(query, "v") {
            return Some(v.to_string());
        }
        if let Some(id) = segment_after(path, "shorts") {
            return Some(id.to_string());
        }
        if let Some(id) = segment_after(path, "embed") {
            return Some(id.to_string());
        }
    }

    None
}

/// Whether the string looks like a bare video id (token charset, bounded length).
fn is_bare_id(s: &str) -> bool {
    (ID_MIN_LEN..=ID_MAX_LEN).contains(&s.len())
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Splits an absolute URL into `(host, path, query)`.
///
/// This intentionally handles just enough URL structure for the recognized
/// hosts; anything without a scheme separator is rejected.
fn split_url(s: &str) -> Option<(&str, &str, &str)> {
    let rest = s.split_once("://").map(|(_, rest)| rest)?;
    let (host_and_path, query) = match rest.split_once('?') {
        Some((hp, q)) => (hp, q),
        None => (rest, ""),
    };
    let (host, path) = match host_and_path.split_once('/') {
        Some((h, p)) => (h, p),
        None => (host_and_path, ""),
    };
    if host.is_empty() {
        return None;
    }
    Some((host, path, query))
}

/// Returns the first non-empty path segment.
fn first_path_segment(path: &str) -> Option<&str> {
    path.split('/').find(|seg| !seg.is_empty())
}

/// Returns the segment immediately following `marker` in the path.
fn segment_after<'a>(path: &'a str, marker: &str) -> Option<&'a str> {
    let mut segments = path.split('/').filter(|seg| !seg.is_empty());
    while let Some(seg) = segments.next() {
        if seg == marker {
            return segments.next().filter(|id| !id.is_empty());
        }
    }
    None
}

/// Returns the value of `key` in a raw query string.
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}
