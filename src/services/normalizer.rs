// src/services/normalizer.rs

//! URL normalization: decode, trim, deduplicate.
//!
//! The stages run strictly in that order, so two raw strings that decode
//! and trim to the same text collapse into one canonical URL. Decoding and
//! trimming repeat until the string settles, which makes `normalize` a
//! fixed point on its own output.

use std::collections::HashSet;

use crate::error::{AppError, Result};

/// Marker every canonical URL starts with.
const SCHEME_MARKER: &str = "http";

/// Run all three stages over raw `href` values.
pub fn normalize<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let trimmed: Vec<String> = raw.iter().filter_map(|u| settle(u.as_ref())).collect();
    let kept = trimmed.len();
    let canonical = dedup(trimmed);
    log::info!(
        "Normalized {} raw URLs: {} kept after trim, {} unique",
        raw.len(),
        kept,
        canonical.len()
    );
    canonical
}

/// Decode then trim `raw` until neither stage changes it.
///
/// Trimming can cut away a malformed prefix that made decoding fail, so the
/// loop runs again on the shorter string. Every change shortens the string,
/// which bounds the loop.
fn settle(raw: &str) -> Option<String> {
    let mut current = raw.to_string();
    loop {
        let trimmed = trim(&decode_fully(&current))?.to_string();
        if trimmed == current {
            return Some(trimmed);
        }
        current = trimmed;
    }
}

/// Percent-decode every string down to its last decodable layer.
pub fn decode_all<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter().map(|u| decode_fully(u.as_ref())).collect()
}

/// Decode `input` repeatedly until it stops changing.
///
/// When a layer fails to decode, the last good value is kept.
pub fn decode_fully(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        match decode(&current) {
            Ok(next) if next == current => return current,
            Ok(next) => current = next,
            Err(e) => {
                log::warn!("{e}");
                return current;
            }
        }
    }
}

/// Percent-decode one string.
///
/// Fails on a `%` not followed by two hex digits, or when the decoded
/// bytes are not UTF-8.
pub fn decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Err(AppError::decode(input, format!("invalid escape at byte {i}")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| AppError::decode(input, e))
}

/// Keep each string from its first `http` onward; drop strings without one.
pub fn trim_all<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    urls.iter()
        .filter_map(|u| trim(u.as_ref()))
        .map(str::to_string)
        .collect()
}

/// The suffix of `url` starting at the first `http`, if any.
pub fn trim(url: &str) -> Option<&str> {
    url.find(SCHEME_MARKER).map(|idx| &url[idx..])
}

/// Drop repeated strings, keeping first occurrences in order.
pub fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|u| seen.insert(u.clone()))
        .collect()
}
