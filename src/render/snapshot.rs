//! Request snapshot extraction.
//!
//! # Responsibilities
//! - Define the narrow read interface renderers need from a request
//! - Capture the four echoed fields into an owned, immutable value
//! - Serialize with a fixed key order (headers, url, baseUrl, originalUrl)
//!
//! # Design Decisions
//! - Missing fields serialize as `null`; capture never fails
//! - Header names are stored lowercase, first-arrival order is kept
//! - A repeated header becomes an array of its values in arrival order

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Read accessors a renderer needs from an inbound request.
///
/// Any HTTP framework's request type can be adapted to this with a thin
/// wrapper; see [`crate::http::request::AxumRequestView`].
pub trait RequestView {
    /// Request headers, or `None` when the source has none to offer.
    fn headers(&self) -> Option<HeaderSnapshot>;

    /// Path and query below the mount point.
    fn url(&self) -> Option<&str>;

    /// Mount path prefix the handler is registered under.
    fn base_url(&self) -> Option<&str>;

    /// Path and query as originally received.
    fn original_url(&self) -> Option<&str>;
}

/// Value of a single header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderEntry {
    /// Header seen once.
    Single(String),
    /// Header seen more than once, values in arrival order.
    Multiple(Vec<String>),
}

impl HeaderEntry {
    fn push(&mut self, value: String) {
        match self {
            HeaderEntry::Single(first) => {
                let first = std::mem::take(first);
                *self = HeaderEntry::Multiple(vec![first, value]);
            }
            HeaderEntry::Multiple(values) => values.push(value),
        }
    }
}

/// Ordered header name to value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSnapshot {
    entries: Vec<(String, HeaderEntry)>,
}

impl HeaderSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, merging with an earlier header of the same name.
    /// Names compare case-insensitively.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, entry)) => entry.push(value),
            None => self.entries.push((name, HeaderEntry::Single(value))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, entry)| entry)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = HeaderSnapshot::new();
        for (name, value) in iter {
            snapshot.append(name, value);
        }
        snapshot
    }
}

impl From<&axum::http::HeaderMap> for HeaderSnapshot {
    fn from(headers: &axum::http::HeaderMap) -> Self {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

impl Serialize for HeaderSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// The request fields shown by the echo page.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    pub headers: Option<HeaderSnapshot>,
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub original_url: Option<String>,
}

impl RequestSnapshot {
    /// Copy the echoed fields out of `request`.
    pub fn capture<R: RequestView + ?Sized>(request: &R) -> Self {
        Self {
            headers: request.headers(),
            url: request.url().map(str::to_owned),
            base_url: request.base_url().map(str::to_owned),
            original_url: request.original_url().map(str::to_owned),
        }
    }

    /// Header count for logging; zero when headers are absent.
    pub fn header_count(&self) -> usize {
        self.headers.as_ref().map_or(0, HeaderSnapshot::len)
    }
}

impl RequestView for RequestSnapshot {
    fn headers(&self) -> Option<HeaderSnapshot> {
        self.headers.clone()
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn original_url(&self) -> Option<&str> {
        self.original_url.as_deref()
    }
}
