// Fusen view-models
// Managers hold UI state: the presentation controller, the list view, its item menus and the two forms.

pub mod bookmark_edit_form;
pub mod bookmark_form;
pub mod bookmark_list;
pub mod item_menu;
pub mod presentation_controller;
