//! Property-based tests for PresentationController.
//!
//! These tests drive the controller with arbitrary intent sequences and
//! check that modal flags, the route and the refresh epoch never disagree.

use proptest::prelude::*;

use fusen::managers::presentation_controller::{Intent, PresentationController};
use fusen::types::bookmark::Bookmark;
use fusen::types::presentation::{EditorKind, Route, ViewportClass};

fn bookmark(id: i64) -> Bookmark {
    Bookmark {
        id,
        url: format!("https://example.com/{}", id),
        title: None,
        description: None,
        tags: vec![],
        created_at: Some("2024-01-01T00:00:00Z".to_string()),
        updated_at: Some("2024-01-01T00:00:00Z".to_string()),
    }
}

fn arb_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("/new".to_string()),
        (1i64..50).prop_map(|id| format!("/edit/{}", id)),
        Just("/edit/abc".to_string()),
        "/[a-z]{1,8}",
    ]
}

/// Intents other than resizes.
fn arb_fixed_width_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::RequestCreate),
        (1i64..50).prop_map(|id| Intent::RequestEdit(bookmark(id))),
        Just(Intent::FormSucceeded(EditorKind::Create)),
        Just(Intent::FormSucceeded(EditorKind::Edit)),
        Just(Intent::FormCancelled),
        Just(Intent::ModalDismissed),
        arb_path().prop_map(Intent::Navigate),
    ]
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        6 => arb_fixed_width_intent(),
        1 => (0u32..2000).prop_map(Intent::ViewportResized),
    ]
}

fn assert_consistent(ctrl: &PresentationController) -> Result<(), TestCaseError> {
    let route = ctrl.current_route();
    prop_assert!(!(ctrl.create_modal_open() && ctrl.edit_modal_open()));
    if ctrl.create_modal_open() || ctrl.edit_modal_open() {
        prop_assert_eq!(route, Route::List);
    }
    if let Route::EditPage(id) = route {
        if let Some(target) = ctrl.editing_target() {
            prop_assert_eq!(target.id, id);
        }
    }
    if ctrl.edit_modal_open() {
        prop_assert!(ctrl.editing_target().is_some());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Classification is a pure function of width and breakpoint.
    #[test]
    fn viewport_class_follows_breakpoint(width in 0u32..4000) {
        let expected = if width >= 768 { ViewportClass::Desktop } else { ViewportClass::Mobile };
        prop_assert_eq!(PresentationController::new(width).viewport_class(), expected);
    }

    // Modal flags and route stay mutually consistent after every step.
    #[test]
    fn state_stays_consistent(width in 0u32..2000, intents in prop::collection::vec(arb_intent(), 0..40)) {
        let mut ctrl = PresentationController::new(width);
        for intent in intents {
            ctrl.dispatch(intent);
            assert_consistent(&ctrl)?;
        }
    }

    // The epoch counts successful submissions and nothing else.
    #[test]
    fn epoch_counts_successes(width in 0u32..2000, intents in prop::collection::vec(arb_intent(), 0..40)) {
        let successes = intents
            .iter()
            .filter(|i| matches!(i, Intent::FormSucceeded(_)))
            .count() as u64;
        let mut ctrl = PresentationController::new(width);
        for intent in intents {
            ctrl.dispatch(intent);
        }
        prop_assert_eq!(ctrl.refresh_epoch(), successes);
    }

    // Without resizes, desktop never leaves the list route.
    #[test]
    fn desktop_stays_on_list(width in 768u32..3000, intents in prop::collection::vec(arb_fixed_width_intent(), 0..40)) {
        let mut ctrl = PresentationController::new(width);
        for intent in intents {
            ctrl.dispatch(intent);
            prop_assert_eq!(ctrl.current_route(), Route::List);
        }
    }

    // Without resizes, mobile never opens a modal.
    #[test]
    fn mobile_never_opens_modal(width in 0u32..768, intents in prop::collection::vec(arb_fixed_width_intent(), 0..40)) {
        let mut ctrl = PresentationController::new(width);
        for intent in intents {
            ctrl.dispatch(intent);
            prop_assert!(!ctrl.create_modal_open());
            prop_assert!(!ctrl.edit_modal_open());
        }
    }

    // Cancelling always lands on the list with nothing open.
    #[test]
    fn cancel_always_returns_to_list(width in 0u32..2000, intents in prop::collection::vec(arb_intent(), 0..20)) {
        let mut ctrl = PresentationController::new(width);
        for intent in intents {
            ctrl.dispatch(intent);
        }
        let epoch = ctrl.refresh_epoch();
        ctrl.dispatch(Intent::FormCancelled);
        prop_assert_eq!(ctrl.current_route(), Route::List);
        prop_assert!(ctrl.presentation().is_none());
        prop_assert_eq!(ctrl.refresh_epoch(), epoch);
    }
}
