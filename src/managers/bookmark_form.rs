//! Bookmark create form, plus the field handling shared with the edit form.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::services::bookmark_client::BookmarkClientTrait;
use crate::types::bookmark::{Bookmark, BookmarkInput};
use crate::types::errors::FormError;

/// Editable inputs of both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Url,
    Title,
    Description,
    Tags,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(FormField::Url),
            "title" => Ok(FormField::Title),
            "description" => Ok(FormField::Description),
            "tags" => Ok(FormField::Tags),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Raw text of the four inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Comma-delimited.
    pub tags: String,
}

impl FormFields {
    pub fn set(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Url => &mut self.url,
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Tags => &mut self.tags,
        };
        *slot = value.to_string();
    }

    /// Seeds the inputs from an existing record.
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            url: bookmark.url.clone(),
            title: bookmark.title.clone().unwrap_or_default(),
            description: bookmark.description.clone().unwrap_or_default(),
            tags: bookmark.tags.join(", "),
        }
    }

    /// Validates and converts to a request body. Runs before any network call.
    pub fn to_input(&self) -> Result<BookmarkInput, FormError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FormError::MissingUrl);
        }
        reqwest::Url::parse(url).map_err(|e| FormError::InvalidUrl(e.to_string()))?;

        Ok(BookmarkInput {
            url: url.to_string(),
            title: optional_text(&self.title),
            description: optional_text(&self.description),
            tags: Some(split_tags(&self.tags)),
        })
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            format!("URL *: {}", self.url),
            format!("タイトル: {}", self.title),
            format!("説明: {}", self.description),
            format!("タグ (カンマ区切り): {}", self.tags),
        ]
    }
}

/// Splits the comma-delimited tag input. Entries are trimmed but blank
/// entries are kept; an empty input yields no tags.
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// An empty input means "absent".
pub fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Create form. Always starts empty; resets after a successful submit.
#[derive(Debug, Default)]
pub struct BookmarkForm {
    pub fields: FormFields,
    error: Option<String>,
}

impl BookmarkForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FormField, value: &str) {
        self.fields.set(field, value);
    }

    /// Inline error from the last submit, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits the form. On success the fields reset and the created record
    /// is returned; the caller reports success to the controller. On failure
    /// the inline error is set and the inputs are kept.
    pub async fn submit(&mut self, client: &dyn BookmarkClientTrait) -> Result<Bookmark, FormError> {
        self.error = None;
        let input = match self.fields.to_input() {
            Ok(input) => input,
            Err(e) => {
                debug!(error = %e, "create form rejected locally");
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        match client.create_bookmark(&input).await {
            Ok(bookmark) => {
                debug!(id = bookmark.id, "bookmark created");
                self.fields = FormFields::default();
                Ok(bookmark)
            }
            Err(e) => {
                warn!(error = %e, "bookmark create failed");
                let e = FormError::from(e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn render(&self) -> String {
        let mut lines = self.fields.render();
        if let Some(error) = &self.error {
            lines.push(error.clone());
        }
        lines.push("[キャンセル] [ブックマークを追加]".to_string());
        lines.join("\n")
    }
}
