use serde::{Deserialize, Serialize};

use crate::types::bookmark::Bookmark;

/// Viewport width (logical pixels) at and above which the layout is desktop.
pub const DEFAULT_DESKTOP_MIN_WIDTH: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Desktop,
    Mobile,
}

impl ViewportClass {
    /// Classifies a viewport width against the desktop breakpoint.
    pub fn from_width(width: u32, desktop_min_width: u32) -> Self {
        if width >= desktop_min_width {
            ViewportClass::Desktop
        } else {
            ViewportClass::Mobile
        }
    }

    pub fn is_desktop(self) -> bool {
        self == ViewportClass::Desktop
    }
}

/// Logical routes of the single-page app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Route {
    List,
    CreatePage,
    EditPage(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::CreatePage => "/new".to_string(),
            Route::EditPage(id) => format!("/edit/{}", id),
        }
    }

    /// Parses a browser path. Query strings and fragments are ignored.
    ///
    /// Returns `None` for paths that match no route at all.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::List);
        }

        let mut segments = trimmed.trim_start_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("new"), None, None) => Some(Route::CreatePage),
            (Some("edit"), Some(id), None) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
                id.parse().ok().map(Route::EditPage)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorKind {
    Create,
    Edit,
}

/// How an edit form learns which bookmark it edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// The record itself, handed over by the list. No fetch needed.
    Record(Bookmark),
    /// Only the identifier, carried by the route. Must be fetched.
    Id(i64),
}

impl EditTarget {
    pub fn id(&self) -> i64 {
        match self {
            EditTarget::Record(bookmark) => bookmark.id,
            EditTarget::Id(id) => *id,
        }
    }

    pub fn record(&self) -> Option<&Bookmark> {
        match self {
            EditTarget::Record(bookmark) => Some(bookmark),
            EditTarget::Id(_) => None,
        }
    }
}

/// The editor that is currently open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editor {
    Create,
    Edit(EditTarget),
}

impl Editor {
    pub fn kind(&self) -> EditorKind {
        match self {
            Editor::Create => EditorKind::Create,
            Editor::Edit(_) => EditorKind::Edit,
        }
    }
}

/// Where the open editor is shown.
///
/// One value describes both "what is open" and "how it is shown", so the
/// modal state and the route state cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Shown in a modal above the list; the route stays on the list.
    Overlay(Editor),
    /// Shown as its own page; the route names the editor.
    Routed(Editor),
}

impl Presentation {
    pub fn editor(&self) -> &Editor {
        match self {
            Presentation::Overlay(editor) | Presentation::Routed(editor) => editor,
        }
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self, Presentation::Overlay(_))
    }

    /// The route implied by this presentation.
    pub fn route(&self) -> Route {
        match self {
            Presentation::Overlay(_) => Route::List,
            Presentation::Routed(Editor::Create) => Route::CreatePage,
            Presentation::Routed(Editor::Edit(target)) => Route::EditPage(target.id()),
        }
    }
}
