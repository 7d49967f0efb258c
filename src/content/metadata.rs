//! Front matter metadata decoding.
//!
//! The metadata block is TOML. Recognized keys: `title`, `date`, `tags`,
//! `slug`, `draft`, `summary`. Unrecognized keys are ignored so documents
//! written for a newer loma keep decoding on an older one.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Characters that make a slug unsafe as a file name or URL path segment.
const FORBIDDEN_SLUG_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '"', '\t', '\r', '\n', ' ',
];

/// The post listing is written to `posts/index.html`, so no post may claim it.
const RESERVED_SLUGS: &[&str] = &["index", ".", ".."];

/// Front matter decode failure. The document is skipped, not the build.
#[derive(Debug, Error)]
pub enum MetadataDecodeError {
    #[error("invalid front matter TOML")]
    Toml(#[from] toml::de::Error),

    #[error("invalid `slug`: {0}")]
    InvalidSlug(String),
}

/// Decoded front matter for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub date: Option<PostDate>,
    pub tags: Vec<String>,
    pub slug: String,
    pub draft: bool,
    pub summary: Option<String>,
}

/// Serde-facing shape. Kept separate so slug validation runs exactly once,
/// in [`decode`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    title: String,
    date: Option<PostDate>,
    tags: Vec<String>,
    slug: Option<String>,
    draft: bool,
    summary: Option<String>,
}

/// Decode a front matter block into [`Metadata`].
///
/// `draft` defaults to false, `tags` to empty, `title` to the empty string.
/// A missing, empty, or filesystem-unsafe `slug` is an error: the slug names
/// the output file, so rendering with a silently-empty one is never allowed.
pub fn decode(front_matter: &str) -> Result<Metadata, MetadataDecodeError> {
    let raw: RawMetadata = toml::from_str(front_matter)?;
    let slug = validate_slug(raw.slug)?;

    Ok(Metadata {
        title: raw.title,
        date: raw.date,
        tags: raw.tags,
        slug,
        draft: raw.draft,
        summary: raw.summary,
    })
}

fn validate_slug(slug: Option<String>) -> Result<String, MetadataDecodeError> {
    let slug = slug.unwrap_or_default();

    if slug.is_empty() {
        return Err(MetadataDecodeError::InvalidSlug(
            "missing or empty".to_owned(),
        ));
    }
    if let Some(bad) = slug.chars().find(|c| FORBIDDEN_SLUG_CHARS.contains(c)) {
        return Err(MetadataDecodeError::InvalidSlug(format!(
            "`{slug}` contains forbidden character `{}`",
            bad.escape_default()
        )));
    }
    if RESERVED_SLUGS.contains(&slug.as_str()) {
        return Err(MetadataDecodeError::InvalidSlug(format!(
            "`{slug}` is reserved"
        )));
    }

    Ok(slug)
}

// ============================================================================
// Post dates
// ============================================================================

/// Publish timestamp decoded from a TOML native datetime.
///
/// A date without a time component is taken as midnight UTC; an explicit
/// offset is normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostDate(DateTime<Utc>);

impl PostDate {
    #[allow(dead_code)] // exercised by tests, kept for date-based features
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Calendar-date form used in rendered pages, e.g. `2024-01-01`.
    pub fn display_date(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl<'de> Deserialize<'de> for PostDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = toml::value::Datetime::deserialize(deserializer)?;
        from_toml_datetime(&raw)
            .map(PostDate)
            .map_err(serde::de::Error::custom)
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_date())
    }
}

/// Convert a TOML datetime into UTC. Offset-less datetimes are taken as
/// already being UTC.
fn from_toml_datetime(value: &toml::value::Datetime) -> Result<DateTime<Utc>, String> {
    let date = value
        .date
        .ok_or_else(|| "date must include a calendar date".to_owned())?;

    let naive_date = NaiveDate::from_ymd_opt(
        i32::from(date.year),
        u32::from(date.month),
        u32::from(date.day),
    )
    .ok_or_else(|| format!("invalid calendar date {date}"))?;

    let naive_time = match value.time {
        Some(time) => NaiveTime::from_hms_nano_opt(
            u32::from(time.hour),
            u32::from(time.minute),
            u32::from(time.second),
            time.nanosecond,
        )
        .ok_or_else(|| format!("invalid time of day {time}"))?,
        None => NaiveTime::MIN,
    };

    let naive = naive_date.and_time(naive_time);
    let utc = match value.offset {
        Some(toml::value::Offset::Custom { minutes }) => {
            (naive - Duration::minutes(i64::from(minutes))).and_utc()
        }
        _ => naive.and_utc(),
    };

    Ok(utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_fields() {
        let meta = decode(
            r#"
title = "Hello"
date = 2024-01-01
tags = ["rust", "ssg", "rust"]
slug = "hello"
draft = true
summary = "a greeting"
"#,
        )
        .unwrap();

        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.date.unwrap().display_date(), "2024-01-01");
        // Order preserved, duplicates permitted
        assert_eq!(meta.tags, vec!["rust", "ssg", "rust"]);
        assert_eq!(meta.slug, "hello");
        assert!(meta.draft);
        assert_eq!(meta.summary.as_deref(), Some("a greeting"));
    }

    #[test]
    fn test_decode_defaults() {
        let meta = decode("slug = \"a\"\n").unwrap();
        assert_eq!(meta.title, "");
        assert!(meta.date.is_none());
        assert!(meta.tags.is_empty());
        assert!(!meta.draft);
        assert!(meta.summary.is_none());
    }

    #[test]
    fn test_decode_ignores_unrecognized_fields() {
        let meta = decode("slug = \"a\"\nlayout = \"wide\"\n[extra]\nweight = 3\n").unwrap();
        assert_eq!(meta.slug, "a");
    }

    #[test]
    fn test_decode_missing_slug_fails() {
        let err = decode("title = \"A\"\n").unwrap_err();
        assert!(matches!(err, MetadataDecodeError::InvalidSlug(_)));
    }

    #[test]
    fn test_decode_empty_slug_fails() {
        assert!(matches!(
            decode("slug = \"\"\n").unwrap_err(),
            MetadataDecodeError::InvalidSlug(_)
        ));
    }

    #[test]
    fn test_decode_unsafe_slug_fails() {
        for slug in ["a/b", "a b", "a\\b", "a?b", "index", ".."] {
            let input = format!("slug = \"{}\"\n", slug.replace('\\', "\\\\"));
            assert!(
                matches!(
                    decode(&input).unwrap_err(),
                    MetadataDecodeError::InvalidSlug(_)
                ),
                "slug `{slug}` should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_type_mismatch_fails() {
        // draft must be a boolean
        assert!(matches!(
            decode("slug = \"a\"\ndraft = \"yes\"\n").unwrap_err(),
            MetadataDecodeError::Toml(_)
        ));
        // tags must be an array of strings
        assert!(matches!(
            decode("slug = \"a\"\ntags = \"rust\"\n").unwrap_err(),
            MetadataDecodeError::Toml(_)
        ));
    }

    #[test]
    fn test_decode_date_as_string_fails() {
        // Dates use the TOML native datetime type, not quoted strings
        assert!(matches!(
            decode("slug = \"a\"\ndate = \"2024-01-01\"\n").unwrap_err(),
            MetadataDecodeError::Toml(_)
        ));
    }

    #[test]
    fn test_decode_invalid_date_fails() {
        assert!(decode("slug = \"a\"\ndate = 2024-02-31\n").is_err());
    }

    #[test]
    fn test_date_with_time_and_offset_normalizes_to_utc() {
        let meta = decode("slug = \"a\"\ndate = 2024-03-10T12:30:00+02:00\n").unwrap();
        let utc = meta.date.unwrap().as_utc();
        assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 10:30");
    }

    #[test]
    fn test_date_without_time_is_midnight_utc() {
        let meta = decode("slug = \"a\"\ndate = 2024-01-01\n").unwrap();
        let utc = meta.date.unwrap().as_utc();
        assert_eq!(
            utc.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-01-01 00:00:00"
        );
    }

    #[test]
    fn test_post_date_serializes_as_display_date() {
        let meta = decode("slug = \"a\"\ndate = 2024-06-05T08:00:00Z\n").unwrap();
        let value = toml::Value::try_from(meta.date.unwrap()).unwrap();
        assert_eq!(value.as_str(), Some("2024-06-05"));
    }
}
