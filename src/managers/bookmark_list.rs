//! Bookmark List View for Fusen.
//!
//! Fetches and renders the full bookmark collection. Re-fetches on first
//! sync, whenever the controller's refresh epoch changes, and after a
//! confirmed delete succeeds. Owns the per-item menus and the delete
//! confirmation flow.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::managers::item_menu::{ItemMenu, MenuAlignment};
use crate::services::bookmark_client::BookmarkClientTrait;
use crate::types::bookmark::Bookmark;
use crate::types::errors::ServiceError;

pub const LOADING_TEXT: &str = "読み込み中...";
pub const LIST_HEADING: &str = "ブックマーク一覧";
pub const EMPTY_TEXT: &str = "ブックマークがありません。";
pub const DELETE_CONFIRM_PROMPT: &str = "このブックマークを削除してもよろしいですか？";
pub const DELETE_SUCCESS_NOTICE: &str = "ブックマークを削除しました。";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum ListState {
    Loading,
    Ready(Vec<Bookmark>),
    /// The fetch failed; nothing from an earlier fetch is shown.
    Failed(String),
}

/// Transient message raised by the delete flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::Success(message) => message.clone(),
            Notice::Error(message) => format!("エラー: {}", message),
        }
    }
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// No delete was awaiting confirmation.
    NothingPending,
    Deleted(i64),
    Failed(ServiceError),
}

pub struct BookmarkList {
    client: Arc<dyn BookmarkClientTrait>,
    page_size: u32,
    state: ListState,
    seen_epoch: Option<u64>,
    menus: HashMap<i64, ItemMenu>,
    pending_delete: Option<i64>,
    notice: Option<Notice>,
}

impl BookmarkList {
    pub fn new(client: Arc<dyn BookmarkClientTrait>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            state: ListState::Loading,
            seen_epoch: None,
            menus: HashMap::new(),
            pending_delete: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Items currently on screen; empty unless the last fetch succeeded.
    pub fn items(&self) -> &[Bookmark] {
        match &self.state {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }

    fn find(&self, id: i64) -> Option<&Bookmark> {
        self.items().iter().find(|b| b.id == id)
    }

    /// Fetches when `epoch` differs from the last one seen, including the
    /// very first call. Returns whether a fetch happened.
    pub async fn sync(&mut self, epoch: u64) -> bool {
        if self.seen_epoch == Some(epoch) {
            return false;
        }
        self.seen_epoch = Some(epoch);
        debug!(epoch, "refresh epoch changed");
        self.fetch().await;
        true
    }

    /// Unconditional re-fetch of the first page.
    pub async fn fetch(&mut self) {
        self.state = ListState::Loading;
        match self.client.list_bookmarks(self.page_size, 0).await {
            Ok(items) => {
                debug!(count = items.len(), "bookmarks fetched");
                self.menus.retain(|id, _| items.iter().any(|b| b.id == *id));
                self.state = ListState::Ready(items);
            }
            Err(e) => {
                warn!(error = %e, "bookmark list fetch failed");
                self.menus.clear();
                self.state = ListState::Failed(e.user_message());
            }
        }
    }

    pub fn menu(&self, id: i64) -> Option<&ItemMenu> {
        self.menus.get(&id)
    }

    /// Toggles the menu of item `id`; every other menu closes as if the
    /// click landed outside it. Returns false for unknown items.
    pub fn toggle_menu(&mut self, id: i64, button_right: u32, viewport_width: u32) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        for (other, menu) in self.menus.iter_mut() {
            if *other != id {
                menu.close();
            }
        }
        self.menus
            .entry(id)
            .or_default()
            .toggle(button_right, viewport_width);
        true
    }

    pub fn close_menus(&mut self) {
        for menu in self.menus.values_mut() {
            menu.close();
        }
    }

    /// "Edit" menu action. Mutates nothing; hands the record to the caller.
    pub fn request_edit(&mut self, id: i64) -> Option<Bookmark> {
        self.close_menus();
        self.find(id).cloned()
    }

    /// "Delete" menu action. Stages the delete behind a confirmation step
    /// and returns the prompt to show.
    pub fn request_delete(&mut self, id: i64) -> Option<&'static str> {
        self.close_menus();
        self.find(id)?;
        self.pending_delete = Some(id);
        Some(DELETE_CONFIRM_PROMPT)
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// The user declined. Nothing else changes.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed. Deletes, then re-fetches only after the delete
    /// succeeded. A failure leaves the list as it was; no retry.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };

        match self.client.delete_bookmark(id).await {
            Ok(()) => {
                info!(id, "bookmark deleted");
                self.notice = Some(Notice::Success(DELETE_SUCCESS_NOTICE.to_string()));
                self.fetch().await;
                DeleteOutcome::Deleted(id)
            }
            Err(e) => {
                warn!(id, error = %e, "bookmark delete failed");
                self.notice = Some(Notice::Error(e.user_message()));
                DeleteOutcome::Failed(e)
            }
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns the notice and clears it.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn render(&self) -> String {
        match &self.state {
            ListState::Loading => LOADING_TEXT.to_string(),
            ListState::Failed(message) => format!("エラー: {}", message),
            ListState::Ready(items) => {
                let mut lines = vec![LIST_HEADING.to_string()];
                if items.is_empty() {
                    lines.push(EMPTY_TEXT.to_string());
                }
                for item in items {
                    lines.push(format!("- {} <{}>", item.display_title(), item.url));
                    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                        lines.push(format!("  {}", description));
                    }
                    if !item.tags.is_empty() {
                        let tags: Vec<String> = item.tags.iter().map(|t| format!("#{}", t)).collect();
                        lines.push(format!("  {}", tags.join(" ")));
                    }
                    if let Some(menu) = self.menus.get(&item.id).filter(|m| m.is_open()) {
                        let anchor = match menu.alignment() {
                            MenuAlignment::Left => "left",
                            MenuAlignment::Right => "right",
                        };
                        lines.push(format!("  [編集] [削除] ({})", anchor));
                    }
                }
                if self.pending_delete.is_some() {
                    lines.push(DELETE_CONFIRM_PROMPT.to_string());
                }
                lines.join("\n")
            }
        }
    }
}
