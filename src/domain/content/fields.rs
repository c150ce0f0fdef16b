//! Editable field set of a content item.
//!
//! The same shape is used for the live authoritative fields, the autosave
//! edit buffer, the serialized `draft_snapshot`, and the local draft slot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum length for a title.
pub const MAX_TITLE_LENGTH: usize = 300;

/// Maximum length for a slug.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Maximum length for an excerpt.
pub const MAX_EXCERPT_LENGTH: usize = 1000;

/// Upper bound for the advertised read time, in minutes.
pub const MAX_READ_TIME_MINUTES: u32 = 600;

/// Authored fields of a content item, without identity or lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFields {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub body: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub read_time: Option<u32>,
}

impl ContentFields {
    /// Creates a field set with only a title and body, the rest empty.
    pub fn with_title_and_body(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// True when there is neither a title nor a body worth saving.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }

    /// Serializes into the opaque string stored in `draft_snapshot`.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a value produced by [`ContentFields::to_snapshot`].
    pub fn from_snapshot(snapshot: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(snapshot)
    }

    /// Fills in a slug derived from the title when none was given.
    ///
    /// Titles with no ASCII letters or digits get a random `post-xxxxxxxx`
    /// slug instead.
    pub fn with_default_slug(mut self) -> Self {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
        if self.slug.is_empty() && !self.title.trim().is_empty() {
            self.slug = fallback_slug();
        }
        self
    }

    /// Validates the fields for an explicit (non-autosave) write.
    ///
    /// Autosaved drafts skip this: half-typed content is allowed to be invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        check_length("title", &self.title, MAX_TITLE_LENGTH)?;
        check_length("excerpt", &self.excerpt, MAX_EXCERPT_LENGTH)?;
        check_length("slug", &self.slug, MAX_SLUG_LENGTH)?;

        if self.slug.is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        if !self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::invalid_format(
                "slug",
                "only lowercase letters, digits and '-' are allowed",
            ));
        }

        if let Some(minutes) = self.read_time {
            if minutes > MAX_READ_TIME_MINUTES {
                return Err(ValidationError::out_of_range(
                    "read_time",
                    0,
                    MAX_READ_TIME_MINUTES as i64,
                    minutes as i64,
                ));
            }
        }
        Ok(())
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::out_of_range(field, 0, max as i64, len as i64));
    }
    Ok(())
}

fn fallback_slug() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("post-{}", &id[..8])
}

/// Lowercases and hyphenates a title into a URL slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug.chars().take(MAX_SLUG_LENGTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> ContentFields {
        ContentFields {
            title: "Hello World".to_string(),
            slug: "hello-world".to_string(),
            excerpt: "A greeting".to_string(),
            body: "Long form body".to_string(),
            category: "essays".to_string(),
            cover_image: None,
            read_time: Some(4),
        }
    }

    #[test]
    fn blank_means_no_title_and_no_body() {
        assert!(ContentFields::default().is_blank());
        assert!(ContentFields::with_title_and_body("  ", "\n").is_blank());
        assert!(!ContentFields::with_title_and_body("X", "").is_blank());
        assert!(!ContentFields::with_title_and_body("", "body only").is_blank());
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let mut fields = valid_fields();
        fields.cover_image = Some("cover.png".to_string());
        let snapshot = fields.to_snapshot().unwrap();

        assert!(snapshot.contains("\"coverImage\":\"cover.png\""));
        assert!(snapshot.contains("\"readTime\":4"));
        assert_eq!(ContentFields::from_snapshot(&snapshot).unwrap(), fields);
    }

    #[test]
    fn snapshot_tolerates_missing_keys() {
        let fields = ContentFields::from_snapshot(r#"{"title":"X"}"#).unwrap();
        assert_eq!(fields.title, "X");
        assert!(fields.body.is_empty());
    }

    #[test]
    fn validate_accepts_well_formed_fields() {
        assert!(valid_fields().validate().is_ok());
    }

    #[test]
    fn validate_requires_title() {
        let fields = ContentFields {
            title: String::new(),
            ..valid_fields()
        };
        assert_eq!(
            fields.validate(),
            Err(ValidationError::empty_field("title"))
        );
    }

    #[test]
    fn validate_rejects_bad_slug() {
        let fields = ContentFields {
            slug: "Hello World".to_string(),
            ..valid_fields()
        };
        assert!(matches!(
            fields.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn validate_rejects_absurd_read_time() {
        let fields = ContentFields {
            read_time: Some(MAX_READ_TIME_MINUTES + 1),
            ..valid_fields()
        };
        assert!(matches!(
            fields.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust & Async -- Notes "), "rust-async-notes");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn default_slug_only_fills_empty_slug() {
        let fields = ContentFields::with_title_and_body("My Post", "b").with_default_slug();
        assert_eq!(fields.slug, "my-post");

        let kept = ContentFields {
            slug: "custom".to_string(),
            ..valid_fields()
        }
        .with_default_slug();
        assert_eq!(kept.slug, "custom");
    }

    #[test]
    fn non_ascii_title_gets_a_fallback_slug() {
        let fields = ContentFields::with_title_and_body("日本語", "本文").with_default_slug();

        assert!(fields.slug.starts_with("post-"));
        assert_eq!(fields.slug.len(), "post-".len() + 8);
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn blank_title_is_left_for_validation_to_reject() {
        let fields = ContentFields::with_title_and_body("  ", "b").with_default_slug();
        assert_eq!(fields.slug, "");
        assert!(fields.validate().is_err());
    }
}
