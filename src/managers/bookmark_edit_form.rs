//! Bookmark edit form.
//!
//! Seeded either by a record handed over directly (no fetch) or by an
//! identifier from the route, which must be fetched before the inputs are
//! editable. A lookup that finds nothing ends in `NotFound`, which is not
//! the same as a transport failure.

use tracing::{debug, warn};

use crate::managers::bookmark_form::{FormField, FormFields};
use crate::managers::bookmark_list::LOADING_TEXT;
use crate::services::bookmark_client::BookmarkClientTrait;
use crate::types::bookmark::{Bookmark, BookmarkInput};
use crate::types::errors::FormError;
use crate::types::presentation::EditTarget;

pub const NOT_FOUND_TEXT: &str = "ブックマークが見つかりませんでした。";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditFormState {
    /// Waiting for the fetch-by-id.
    Loading,
    Editing,
    /// The lookup answered, but there is no such bookmark.
    NotFound,
    /// The lookup itself failed.
    Failed(String),
}

#[derive(Debug)]
pub struct BookmarkEditForm {
    target_id: Option<i64>,
    current: Option<Bookmark>,
    pub fields: FormFields,
    state: EditFormState,
    error: Option<String>,
}

impl BookmarkEditForm {
    /// Seeds the form from a record. No fetch will happen.
    pub fn from_record(bookmark: Bookmark) -> Self {
        Self {
            target_id: Some(bookmark.id),
            fields: FormFields::from_bookmark(&bookmark),
            current: Some(bookmark),
            state: EditFormState::Editing,
            error: None,
        }
    }

    /// Seeds the form from a route identifier, if the route carried one.
    ///
    /// With an id the form starts `Loading` until `resolve` runs. Without
    /// one it is editable but cannot be submitted.
    pub fn from_id(id: Option<i64>) -> Self {
        let state = if id.is_some() {
            EditFormState::Loading
        } else {
            EditFormState::Editing
        };
        Self {
            target_id: id,
            current: None,
            fields: FormFields::default(),
            state,
            error: None,
        }
    }

    pub fn from_target(target: EditTarget) -> Self {
        match target {
            EditTarget::Record(bookmark) => Self::from_record(bookmark),
            EditTarget::Id(id) => Self::from_id(Some(id)),
        }
    }

    pub fn target_id(&self) -> Option<i64> {
        self.target_id
    }

    pub fn current(&self) -> Option<&Bookmark> {
        self.current.as_ref()
    }

    pub fn state(&self) -> &EditFormState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_field(&mut self, field: FormField, value: &str) {
        self.fields.set(field, value);
    }

    /// Fetches the target when the form was seeded by id. Runs at most once;
    /// returns whether a fetch was issued.
    pub async fn resolve(&mut self, client: &dyn BookmarkClientTrait) -> bool {
        let id = match (&self.state, self.target_id) {
            (EditFormState::Loading, Some(id)) => id,
            _ => return false,
        };

        match client.get_bookmark(id).await {
            Ok(bookmark) => {
                debug!(id, "edit target resolved");
                self.fields = FormFields::from_bookmark(&bookmark);
                self.current = Some(bookmark);
                self.state = EditFormState::Editing;
            }
            Err(e) if e.is_not_found() => {
                debug!(id, "edit target not found");
                self.state = EditFormState::NotFound;
            }
            Err(e) => {
                warn!(id, error = %e, "edit target lookup failed");
                self.state = EditFormState::Failed(e.user_message());
            }
        }
        true
    }

    /// Submits the update. On success the inputs are left as they are and
    /// the updated record is returned; on failure the inline error is set.
    pub async fn submit(&mut self, client: &dyn BookmarkClientTrait) -> Result<Bookmark, FormError> {
        self.error = None;
        let result = match self.prepare() {
            Ok((id, input)) => client
                .update_bookmark(id, &input)
                .await
                .map_err(FormError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(bookmark) => {
                debug!(id = bookmark.id, "bookmark updated");
                self.current = Some(bookmark.clone());
                Ok(bookmark)
            }
            Err(e) => {
                if e.is_validation() {
                    debug!(error = %e, "edit form rejected locally");
                } else {
                    warn!(error = %e, "bookmark update failed");
                }
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn prepare(&self) -> Result<(i64, BookmarkInput), FormError> {
        let id = self.target_id.ok_or(FormError::MissingTarget)?;
        if self.state != EditFormState::Editing {
            return Err(FormError::NotReady);
        }
        Ok((id, self.fields.to_input()?))
    }

    pub fn render(&self) -> String {
        match &self.state {
            EditFormState::Loading => LOADING_TEXT.to_string(),
            EditFormState::NotFound => NOT_FOUND_TEXT.to_string(),
            EditFormState::Failed(message) => format!("エラー: {}", message),
            EditFormState::Editing => {
                let mut lines = self.fields.render();
                if let Some(error) = &self.error {
                    lines.push(error.clone());
                }
                lines.push("[キャンセル] [更新]".to_string());
                lines.join("\n")
            }
        }
    }
}
