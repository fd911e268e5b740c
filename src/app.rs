//! App Core for Fusen.
//!
//! Central struct holding the service client, the presentation controller,
//! the list view and whichever form is open. Forms report their outcomes
//! here; `App` forwards them to the controller and then lets the list catch
//! up with the controller's refresh epoch, so a re-fetch is only ever issued
//! after the mutation that caused it has succeeded.

use std::sync::Arc;

use tracing::debug;

use crate::managers::bookmark_edit_form::BookmarkEditForm;
use crate::managers::bookmark_form::{BookmarkForm, FormField};
use crate::managers::bookmark_list::BookmarkList;
use crate::managers::presentation_controller::{Intent, PresentationController};
use crate::services::bookmark_client::{BookmarkClient, BookmarkClientTrait};
use crate::types::bookmark::Bookmark;
use crate::types::errors::FormError;
use crate::types::presentation::{Editor, EditorKind, Presentation, Route};
use crate::types::settings::ClientSettings;

pub const APP_TITLE: &str = "Fusen App";
pub const NEW_BUTTON_LABEL: &str = "新規作成";
pub const CREATE_MODAL_TITLE: &str = "新しいブックマークを追加";
pub const EDIT_MODAL_TITLE: &str = "ブックマークを編集";

/// The form currently mounted, matching the controller's open editor.
#[derive(Debug)]
pub enum ActiveForm {
    Create(BookmarkForm),
    Edit(BookmarkEditForm),
}

impl ActiveForm {
    pub fn kind(&self) -> EditorKind {
        match self {
            ActiveForm::Create(_) => EditorKind::Create,
            ActiveForm::Edit(_) => EditorKind::Edit,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActiveForm::Create(form) => form.error(),
            ActiveForm::Edit(form) => form.error(),
        }
    }

    fn render(&self) -> String {
        match self {
            ActiveForm::Create(form) => form.render(),
            ActiveForm::Edit(form) => form.render(),
        }
    }
}

/// Central application struct.
pub struct App {
    pub settings: ClientSettings,
    client: Arc<dyn BookmarkClientTrait>,
    pub controller: PresentationController,
    pub list: BookmarkList,
    form: Option<ActiveForm>,
}

impl App {
    /// Creates a new App talking to the API named in `settings`.
    pub fn new(settings: ClientSettings, viewport_width: u32) -> Result<Self, Box<dyn std::error::Error>> {
        let client = BookmarkClient::new(&settings)
            .map_err(|e| format!("BookmarkClient init failed: {}", e))?;
        Ok(Self::with_client(settings, Arc::new(client), viewport_width))
    }

    /// Creates an App around an existing client.
    pub fn with_client(settings: ClientSettings, client: Arc<dyn BookmarkClientTrait>, viewport_width: u32) -> Self {
        let controller = PresentationController::with_breakpoint(viewport_width, settings.desktop_min_width);
        let list = BookmarkList::new(Arc::clone(&client), settings.page_size);
        Self {
            settings,
            client,
            controller,
            list,
            form: None,
        }
    }

    pub fn form(&self) -> Option<&ActiveForm> {
        self.form.as_ref()
    }

    /// First mount: the list fetches, and an editor page entered directly
    /// resolves its target.
    pub async fn mount(&mut self) {
        self.sync_form();
        self.settle().await;
    }

    /// Feeds an intent to the controller, then brings the form and the list
    /// in line with the controller's new state.
    pub async fn dispatch(&mut self, intent: Intent) {
        self.controller.dispatch(intent);
        self.sync_form();
        self.settle().await;
    }

    pub async fn request_create(&mut self) {
        self.dispatch(Intent::RequestCreate).await;
    }

    /// "Edit" chosen in item `id`'s menu. Returns false for unknown items.
    pub async fn request_edit(&mut self, id: i64) -> bool {
        match self.list.request_edit(id) {
            Some(bookmark) => {
                self.dispatch(Intent::RequestEdit(bookmark)).await;
                true
            }
            None => false,
        }
    }

    pub async fn navigate(&mut self, path: &str) -> Route {
        self.dispatch(Intent::Navigate(path.to_string())).await;
        self.controller.current_route()
    }

    pub async fn resize(&mut self, width: u32) {
        self.dispatch(Intent::ViewportResized(width)).await;
    }

    pub async fn cancel_form(&mut self) {
        self.dispatch(Intent::FormCancelled).await;
    }

    pub async fn dismiss_modal(&mut self) {
        self.dispatch(Intent::ModalDismissed).await;
    }

    /// Types into the open form. Returns false when no form is open.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        match self.form.as_mut() {
            Some(ActiveForm::Create(form)) => form.set_field(field, value),
            Some(ActiveForm::Edit(form)) => form.set_field(field, value),
            None => return false,
        }
        true
    }

    /// Submits the open form. `None` when no form is open.
    ///
    /// On success the controller is told, which bumps the refresh epoch and
    /// closes the editor; the list then re-fetches.
    pub async fn submit_form(&mut self) -> Option<Result<Bookmark, FormError>> {
        let client = Arc::clone(&self.client);
        let form = self.form.as_mut()?;
        let kind = form.kind();
        let result = match form {
            ActiveForm::Create(form) => form.submit(client.as_ref()).await,
            ActiveForm::Edit(form) => form.submit(client.as_ref()).await,
        };

        if result.is_ok() {
            self.dispatch(Intent::FormSucceeded(kind)).await;
        }
        Some(result)
    }

    /// Mounts, replaces or unmounts the form so it matches the open editor.
    fn sync_form(&mut self) {
        let wanted = self.controller.presentation().map(Presentation::editor);
        let keep = match (wanted, &self.form) {
            (Some(Editor::Create), Some(ActiveForm::Create(_))) => true,
            (Some(Editor::Edit(target)), Some(ActiveForm::Edit(form))) => {
                form.target_id() == Some(target.id())
            }
            (None, None) => true,
            _ => false,
        };
        if keep {
            return;
        }

        self.form = match wanted {
            Some(Editor::Create) => Some(ActiveForm::Create(BookmarkForm::new())),
            Some(Editor::Edit(target)) => Some(ActiveForm::Edit(BookmarkEditForm::from_target(target.clone()))),
            None => None,
        };
        debug!(form = ?self.form.as_ref().map(ActiveForm::kind), "form remounted");
    }

    /// Resolves a freshly mounted edit form and lets the list observe the
    /// current refresh epoch.
    async fn settle(&mut self) {
        let client = Arc::clone(&self.client);
        if let Some(ActiveForm::Edit(form)) = self.form.as_mut() {
            form.resolve(client.as_ref()).await;
        }
        self.list.sync(self.controller.refresh_epoch()).await;
    }

    /// Renders the whole screen as text.
    pub fn render(&self) -> String {
        let mut sections = vec![format!("{}  [{}]", APP_TITLE, NEW_BUTTON_LABEL)];

        match (self.controller.presentation(), &self.form) {
            (Some(Presentation::Routed(_)), Some(form)) => {
                sections.push(form.render());
            }
            (Some(Presentation::Overlay(editor)), Some(form)) => {
                sections.push(self.list.render());
                let title = match editor.kind() {
                    EditorKind::Create => CREATE_MODAL_TITLE,
                    EditorKind::Edit => EDIT_MODAL_TITLE,
                };
                sections.push(format!("== {} ==\n{}", title, form.render()));
            }
            _ => sections.push(self.list.render()),
        }

        if let Some(notice) = self.list.notice() {
            sections.push(notice.text());
        }
        sections.join("\n\n")
    }
}
