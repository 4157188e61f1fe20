use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::album::assemble::ImageRef;
use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Title shown when an album does not name itself.
pub const DEFAULT_TITLE: &str = "Photo Album";

/// Album metadata as served by the album endpoint.
///
/// Only the fields the book needs are modelled; anything else in the payload is
/// ignored.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct AlbumData {
    /// Image URLs keyed by arbitrary names (or a plain array).
    #[serde(rename = "ImagesServer", default)]
    pub images_server: Value,
    /// `true` selects full-image pages; absent or `false` selects split pages.
    ///
    /// `Some(Value::Null)` records an explicit `null`, which is neither.
    #[serde(
        rename = "SingleSided",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub single_sided: Option<Value>,
    #[serde(rename = "ProjectTitle", default)]
    pub project_title: Option<String>,
    /// Background music URL.
    #[serde(rename = "MusicServer", default)]
    pub music_server: Option<String>,
}

impl AlbumData {
    /// Parse album JSON from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlipbookResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    #[tracing::instrument(skip(s), fields(bytes = s.len()))]
    pub fn from_json_str(s: &str) -> FlipbookResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FlipbookResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlipbookError::album(format!("open album JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Image URLs in display order.
    ///
    /// Object keys follow JavaScript property enumeration: integer-like keys in
    /// ascending numeric order first, then the remaining keys as written.
    /// Values that are not strings are skipped.
    pub fn image_urls(&self) -> Vec<ImageRef> {
        match &self.images_server {
            Value::Array(items) => items.iter().filter_map(string_ref).collect(),
            Value::Object(map) => {
                let mut indexed: Vec<(u32, &Value)> = Vec::new();
                let mut named: Vec<&Value> = Vec::new();
                for (k, v) in map {
                    match array_index(k) {
                        Some(i) => indexed.push((i, v)),
                        None => named.push(v),
                    }
                }
                indexed.sort_by_key(|(i, _)| *i);
                indexed
                    .into_iter()
                    .map(|(_, v)| v)
                    .chain(named)
                    .filter_map(string_ref)
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Split pages unless the album is explicitly single sided.
    pub fn split_mode(&self) -> bool {
        matches!(self.single_sided, None | Some(Value::Bool(false)))
    }

    pub fn title(&self) -> &str {
        match self.project_title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TITLE,
        }
    }

    pub fn music_url(&self) -> Option<&str> {
        self.music_server.as_deref().filter(|s| !s.is_empty())
    }
}

/// Endpoint URL for `code` under `base`, e.g. `https://host/ealbum/ABC.json`.
pub fn album_json_url(base: &str, code: &str) -> FlipbookResult<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(FlipbookError::validation("album code must be non-empty"));
    }
    Ok(format!("{}/{code}.json", base.trim_end_matches('/')))
}

/// Keep a present field as `Some` even when its value is `null`.
fn present<'de, D>(d: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(d).map(Some)
}

fn string_ref(v: &Value) -> Option<ImageRef> {
    v.as_str().map(ImageRef::from)
}

/// Canonical array index: decimal without leading zeros, below 2^32 - 1.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/album/source.rs"]
mod tests;
