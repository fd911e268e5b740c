//! Presentation Controller for Fusen.
//!
//! Owns the desktop/mobile decision and the single `Presentation` value that
//! says which editor is open and how it is shown. Modal flags and the current
//! route are both projections of that one value, so they cannot disagree.
//! The controller performs no I/O; it only sequences outcomes reported by
//! the list and the forms.

use tracing::{debug, info};

use crate::types::bookmark::Bookmark;
use crate::types::presentation::{
    EditTarget, Editor, EditorKind, Presentation, Route, ViewportClass, DEFAULT_DESKTOP_MIN_WIDTH,
};

/// User or host events the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    RequestCreate,
    RequestEdit(Bookmark),
    FormSucceeded(EditorKind),
    FormCancelled,
    ModalDismissed,
    /// New viewport width in logical pixels.
    ViewportResized(u32),
    /// Direct URL entry or history navigation.
    Navigate(String),
}

pub struct PresentationController {
    desktop_min_width: u32,
    viewport_width: u32,
    viewport: ViewportClass,
    refresh_epoch: u64,
    open: Option<Presentation>,
}

impl PresentationController {
    /// Creates a controller for the given viewport width with the default
    /// 768px breakpoint.
    pub fn new(viewport_width: u32) -> Self {
        Self::with_breakpoint(viewport_width, DEFAULT_DESKTOP_MIN_WIDTH)
    }

    pub fn with_breakpoint(viewport_width: u32, desktop_min_width: u32) -> Self {
        Self {
            desktop_min_width,
            viewport_width,
            viewport: ViewportClass::from_width(viewport_width, desktop_min_width),
            refresh_epoch: 0,
            open: None,
        }
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Counter the list watches; bumped once per successful mutation.
    pub fn refresh_epoch(&self) -> u64 {
        self.refresh_epoch
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.open.as_ref()
    }

    pub fn current_route(&self) -> Route {
        self.open.as_ref().map_or(Route::List, Presentation::route)
    }

    pub fn create_modal_open(&self) -> bool {
        matches!(self.open, Some(Presentation::Overlay(Editor::Create)))
    }

    pub fn edit_modal_open(&self) -> bool {
        matches!(self.open, Some(Presentation::Overlay(Editor::Edit(_))))
    }

    /// The bookmark handed over by `RequestEdit`, while its editor is open.
    pub fn editing_target(&self) -> Option<&Bookmark> {
        match self.open.as_ref().map(Presentation::editor) {
            Some(Editor::Edit(target)) => target.record(),
            _ => None,
        }
    }

    /// Whether `route` is navigable under the current viewport class.
    ///
    /// Editor pages exist only on mobile; desktop reaches editors
    /// exclusively through modals.
    pub fn is_registered(&self, route: Route) -> bool {
        match route {
            Route::List => true,
            Route::CreatePage | Route::EditPage(_) => !self.viewport.is_desktop(),
        }
    }

    /// Route patterns currently registered, for hosts that build a router.
    pub fn registered_patterns(&self) -> Vec<&'static str> {
        if self.viewport.is_desktop() {
            vec!["/"]
        } else {
            vec!["/", "/new", "/edit/:id"]
        }
    }

    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::RequestCreate => self.request_create(),
            Intent::RequestEdit(bookmark) => self.request_edit(bookmark),
            Intent::FormSucceeded(kind) => self.form_succeeded(kind),
            Intent::FormCancelled => self.form_cancelled(),
            Intent::ModalDismissed => self.modal_dismissed(),
            Intent::ViewportResized(width) => self.viewport_resized(width),
            Intent::Navigate(path) => {
                self.navigate(&path);
            }
        }
    }

    pub fn request_create(&mut self) {
        let presentation = if self.viewport.is_desktop() {
            Presentation::Overlay(Editor::Create)
        } else {
            Presentation::Routed(Editor::Create)
        };
        debug!(?presentation, "request create");
        self.open = Some(presentation);
    }

    /// Opens the edit editor with the record attached. On mobile the record
    /// travels with the `/edit/{id}` route, so the edit page deliberately
    /// skips the fetch-by-id that direct URL entry performs.
    pub fn request_edit(&mut self, bookmark: Bookmark) {
        let editor = Editor::Edit(EditTarget::Record(bookmark));
        let presentation = if self.viewport.is_desktop() {
            Presentation::Overlay(editor)
        } else {
            Presentation::Routed(editor)
        };
        debug!(route = %presentation.route().path(), overlay = presentation.is_overlay(), "request edit");
        self.open = Some(presentation);
    }

    /// A form reported success: the list is stale. A routed editor always
    /// closes, so the route returns to the list; a modal closes only when it
    /// is the one that reported.
    pub fn form_succeeded(&mut self, kind: EditorKind) {
        self.refresh_epoch += 1;
        let close = match &self.open {
            Some(Presentation::Routed(_)) => true,
            Some(Presentation::Overlay(editor)) => editor.kind() == kind,
            None => false,
        };
        if close {
            self.open = None;
        }
        info!(?kind, refresh_epoch = self.refresh_epoch, "form succeeded");
    }

    /// Closes whatever editor is open. The route always lands on the list,
    /// even when the editor page was entered directly.
    pub fn form_cancelled(&mut self) {
        debug!(from = %self.current_route().path(), "form cancelled");
        self.open = None;
    }

    pub fn modal_dismissed(&mut self) {
        debug!(from = %self.current_route().path(), "modal dismissed");
        self.open = None;
    }

    /// Records the new width. An open editor keeps its representation even
    /// when the class flips; it is not force-closed or migrated.
    pub fn viewport_resized(&mut self, width: u32) {
        let previous = self.viewport;
        self.viewport_width = width;
        self.viewport = ViewportClass::from_width(width, self.desktop_min_width);
        if previous != self.viewport {
            info!(?previous, current = ?self.viewport, width, editor_open = self.open.is_some(), "viewport class changed");
        }
    }

    /// Resolves `path` against the registered routes and moves there.
    ///
    /// Unregistered or unparsable paths resolve to the list. Returns the
    /// route that was actually reached.
    pub fn navigate(&mut self, path: &str) -> Route {
        let route = Route::parse(path)
            .filter(|route| self.is_registered(*route))
            .unwrap_or(Route::List);

        if route == self.current_route() {
            return route;
        }

        match route {
            Route::List => {
                if matches!(self.open, Some(Presentation::Routed(_))) {
                    self.open = None;
                }
            }
            Route::CreatePage => {
                self.open = Some(Presentation::Routed(Editor::Create));
            }
            Route::EditPage(id) => {
                let target = match self.editing_target() {
                    Some(bookmark) if bookmark.id == id => EditTarget::Record(bookmark.clone()),
                    _ => EditTarget::Id(id),
                };
                self.open = Some(Presentation::Routed(Editor::Edit(target)));
            }
        }
        debug!(path, route = %route.path(), "navigated");
        route
    }
}
