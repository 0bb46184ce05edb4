//! Interface translations
//!
//! Menu and form text is written in English and translated at render time
//! through catalogs embedded from `locales/`. Untranslated strings fall
//! back to the English original, so a missing or partial catalog degrades
//! gracefully instead of failing.
//!
//! # Features
//!
//! - TOML catalogs (`locales/<tag>.toml`) compiled into the binary
//! - `language` query parameter, then `Accept-Language`, then the
//!   configured default
//! - Exact tag match first, then the primary subtag (`de-AT` -> `de`)

use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, HashMap};

/// Language the interface strings are written in
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(RustEmbed)]
#[folder = "locales/"]
struct LocaleAssets;

/// Catalogs by normalized tag, loaded once on first use
static CATALOGS: Lazy<BTreeMap<String, HashMap<String, String>>> = Lazy::new(|| {
    let mut catalogs = BTreeMap::new();
    for name in LocaleAssets::iter() {
        let Some(stem) = name.strip_suffix(".toml") else {
            continue;
        };
        let Some(file) = LocaleAssets::get(&name) else {
            continue;
        };
        let content = String::from_utf8_lossy(&file.data);
        match toml::from_str::<HashMap<String, String>>(&content) {
            Ok(map) => {
                catalogs.insert(normalize(stem), map);
            }
            Err(e) => {
                tracing::warn!("ignoring malformed catalog {}: {}", name, e);
            }
        }
    }
    catalogs
});

/// One resolved interface language
#[derive(Debug, Clone)]
pub struct Locale {
    tag: String,
    catalog: Option<&'static HashMap<String, String>>,
}

impl Locale {
    fn english() -> Self {
        Self {
            tag: DEFAULT_LANGUAGE.to_string(),
            catalog: None,
        }
    }

    /// Normalized language tag, usable as the page's `lang` attribute
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Translate one interface string, falling back to the original
    pub fn tr<'a>(&self, text: &'a str) -> &'a str {
        self.catalog
            .and_then(|catalog| catalog.get(text))
            .map(String::as_str)
            .unwrap_or(text)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

/// Look one tag up, exact match first, then its primary subtag
pub fn lookup(tag: &str) -> Option<Locale> {
    let tag = normalize(tag);
    if tag.is_empty() {
        return None;
    }
    if let Some(locale) = exact(&tag) {
        return Some(locale);
    }
    match tag.find('-') {
        Some(i) => exact(&tag[..i]),
        None => None,
    }
}

fn exact(tag: &str) -> Option<Locale> {
    if tag == DEFAULT_LANGUAGE {
        return Some(Locale::english());
    }
    CATALOGS.get(tag).map(|catalog| Locale {
        tag: tag.to_string(),
        catalog: Some(catalog),
    })
}

/// Pick the interface language for one request.
///
/// The `language` query parameter wins, then the `Accept-Language` header
/// in descending q order, then the configured fallback tag. Unknown tags
/// at every stage fall through to the next one.
pub fn resolve(query: Option<&str>, accept_language: Option<&str>, fallback: &str) -> Locale {
    if let Some(locale) = query.and_then(lookup) {
        return locale;
    }
    if let Some(header) = accept_language {
        for tag in preferred_tags(header) {
            if let Some(locale) = lookup(&tag) {
                return locale;
            }
        }
    }
    lookup(fallback).unwrap_or_default()
}

/// Tags that have a catalog, the default language included, sorted
pub fn available() -> Vec<String> {
    let mut tags: Vec<String> = CATALOGS.keys().cloned().collect();
    if !tags.iter().any(|t| t == DEFAULT_LANGUAGE) {
        tags.push(DEFAULT_LANGUAGE.to_string());
    }
    tags.sort();
    tags
}

fn normalize(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('_', "-")
}

/// `Accept-Language` tags in descending q order; wildcards and q=0 entries
/// are dropped, ties keep their arrival order.
fn preferred_tags(header: &str) -> Vec<String> {
    let mut entries: Vec<(f64, String)> = Vec::new();
    for item in header.split(',') {
        let mut parts = item.split(';');
        let tag = parts.next().unwrap_or("").trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let mut q = 1.0;
        for param in parts {
            if let Some(value) = param.trim().strip_prefix("q=") {
                q = value.trim().parse().unwrap_or(0.0);
            }
        }
        if q > 0.0 {
            entries.push((q, tag.to_string()));
        }
    }
    entries.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    entries.into_iter().map(|(_, tag)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_is_identity() {
        let locale = Locale::default();
        assert_eq!(locale.tag(), "en");
        assert_eq!(locale.tr("Generators"), "Generators");
        assert_eq!(locale.tr("no such string"), "no such string");
    }

    #[test]
    fn test_german_catalog_translates() {
        let locale = lookup("de").expect("de catalog is embedded");
        assert_eq!(locale.tag(), "de");
        assert_eq!(locale.tr("Generators"), "Generatoren");
        // untranslated strings pass through
        assert_eq!(locale.tr("completely unknown"), "completely unknown");
    }

    #[test]
    fn test_primary_subtag_fallback() {
        let locale = lookup("de-AT").expect("falls back to de");
        assert_eq!(locale.tag(), "de");
        assert!(lookup("xx-YY").is_none());
    }

    #[test]
    fn test_normalization() {
        assert_eq!(lookup("DE").unwrap().tag(), "de");
        assert_eq!(lookup("de_AT").unwrap().tag(), "de");
        assert!(lookup("").is_none());
        assert!(lookup("   ").is_none());
    }

    #[test]
    fn test_query_beats_header() {
        let locale = resolve(Some("fr"), Some("de"), "en");
        assert_eq!(locale.tag(), "fr");
    }

    #[test]
    fn test_unknown_query_falls_through_to_header() {
        let locale = resolve(Some("xx"), Some("de"), "en");
        assert_eq!(locale.tag(), "de");
    }

    #[test]
    fn test_header_q_ordering() {
        let locale = resolve(None, Some("fr;q=0.6, de;q=0.9"), "en");
        assert_eq!(locale.tag(), "de");
        // unknown high-q tags are skipped
        let locale = resolve(None, Some("xx;q=1.0, fr;q=0.5"), "en");
        assert_eq!(locale.tag(), "fr");
    }

    #[test]
    fn test_header_wildcard_and_zero_q_dropped() {
        let locale = resolve(None, Some("*, de;q=0"), "en");
        assert_eq!(locale.tag(), "en");
    }

    #[test]
    fn test_header_with_regions() {
        let locale = resolve(None, Some("de-AT, en;q=0.5"), "en");
        assert_eq!(locale.tag(), "de");
    }

    #[test]
    fn test_fallback_used_when_nothing_matches() {
        let locale = resolve(None, None, "fr");
        assert_eq!(locale.tag(), "fr");
        // even the fallback can be unknown
        let locale = resolve(Some("xx"), None, "zz");
        assert_eq!(locale.tag(), "en");
    }

    #[test]
    fn test_available_lists_embedded_catalogs() {
        let tags = available();
        assert!(tags.contains(&"en".to_string()));
        assert!(tags.contains(&"de".to_string()));
        assert!(tags.contains(&"fr".to_string()));
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }
}
