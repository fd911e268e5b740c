//! Unit tests for the RPC handler — the JSON-RPC methods dispatched by `handle_method`.
//!
//! These tests exercise the methods through the same code path used by the
//! real `fusen-rpc` binary, with an in-memory bookmark service.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;

use common::{sample_bookmarks, FakeClient};
use fusen::app::App;
use fusen::rpc_handler::handle_method;
use fusen::types::errors::{Operation, ServiceError};
use fusen::types::settings::ClientSettings;

/// Create a fresh App around a fake service, at the given viewport width.
fn setup(width: u32) -> (Arc<FakeClient>, Mutex<App>) {
    let client = Arc::new(FakeClient::with_bookmarks(sample_bookmarks()));
    let app = App::with_client(ClientSettings::default(), client.clone(), width);
    (client, Mutex::new(app))
}

// ─── Ping ───

#[tokio::test]
async fn test_ping() {
    let (_client, app) = setup(1280);
    let res = handle_method(&app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

// ─── Unknown method ───

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let (_client, app) = setup(1280);
    let res = handle_method(&app, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── App ───

#[tokio::test]
async fn test_mount_reports_list_state() {
    let (_client, app) = setup(1280);

    let state = handle_method(&app, "app.mount", &json!({})).await.unwrap();

    assert_eq!(state["viewport"], "desktop");
    assert_eq!(state["route"], "/");
    assert_eq!(state["routes"], json!(["/"]));
    assert_eq!(state["list"]["state"], "ready");
    assert_eq!(state["list"]["data"].as_array().unwrap().len(), 3);
    assert_eq!(state["list"]["data"][0]["createdAt"], "2024-01-01T00:00:00Z");
    assert!(state["form"].is_null());
}

#[tokio::test]
async fn test_render_returns_text() {
    let (_client, app) = setup(1280);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();

    let res = handle_method(&app, "app.render", &json!({})).await.unwrap();

    assert!(res["text"].as_str().unwrap().starts_with("Fusen App"));
}

// ─── Controller ───

#[tokio::test]
async fn test_request_create_on_mobile_routes() {
    let (_client, app) = setup(375);

    let state = handle_method(&app, "controller.request_create", &json!({})).await.unwrap();

    assert_eq!(state["viewport"], "mobile");
    assert_eq!(state["route"], "/new");
    assert_eq!(state["create_modal_open"], false);
    assert_eq!(state["form"]["kind"], "create");
}

#[tokio::test]
async fn test_resize_and_navigate() {
    let (_client, app) = setup(1280);

    let res = handle_method(&app, "viewport.resize", &json!({"width": 500})).await.unwrap();
    assert_eq!(res, json!({"viewport": "mobile"}));

    let res = handle_method(&app, "router.navigate", &json!({"path": "/edit/1"})).await.unwrap();
    assert_eq!(res, json!({"route": "/edit/1"}));

    let state = handle_method(&app, "app.state", &json!({})).await.unwrap();
    assert_eq!(state["form"]["kind"], "edit");
    assert_eq!(state["form"]["url"], "https://example.com/mock1");
}

#[tokio::test]
async fn test_resize_requires_width() {
    let (_client, app) = setup(1280);
    let res = handle_method(&app, "viewport.resize", &json!({})).await;
    assert_eq!(res.unwrap_err(), "missing width");
}

// ─── Forms ───

#[tokio::test]
async fn test_create_through_rpc() {
    let (client, app) = setup(1280);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();
    handle_method(&app, "controller.request_create", &json!({})).await.unwrap();

    handle_method(&app, "form.set_field", &json!({"field": "url", "value": "https://example.com"}))
        .await
        .unwrap();
    handle_method(&app, "form.set_field", &json!({"field": "tags", "value": "test, mock"}))
        .await
        .unwrap();
    let created = handle_method(&app, "form.submit", &json!({})).await.unwrap();

    assert_eq!(created["tags"], json!(["test", "mock"]));
    let state = handle_method(&app, "app.state", &json!({})).await.unwrap();
    assert_eq!(state["refresh_epoch"], 1);
    assert_eq!(state["create_modal_open"], false);
    assert_eq!(state["list"]["data"].as_array().unwrap().len(), 4);
    assert_eq!(client.count(Operation::List), 2);
}

#[tokio::test]
async fn test_submit_failure_returns_user_message() {
    let (client, app) = setup(1280);
    client.fail(Operation::Create, ServiceError::server(Operation::Create, 500, None));
    handle_method(&app, "controller.request_create", &json!({})).await.unwrap();
    handle_method(&app, "form.set_field", &json!({"field": "url", "value": "https://example.com"}))
        .await
        .unwrap();

    let res = handle_method(&app, "form.submit", &json!({})).await;

    assert_eq!(res.unwrap_err(), "ブックマークの作成に失敗しました。");
}

#[tokio::test]
async fn test_form_methods_without_open_form() {
    let (_client, app) = setup(1280);
    let res = handle_method(&app, "form.set_field", &json!({"field": "url", "value": "x"})).await;
    assert_eq!(res.unwrap_err(), "no form open");
    let res = handle_method(&app, "form.submit", &json!({})).await;
    assert_eq!(res.unwrap_err(), "no form open");
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let (_client, app) = setup(1280);
    handle_method(&app, "controller.request_create", &json!({})).await.unwrap();
    let res = handle_method(&app, "form.set_field", &json!({"field": "folder", "value": "x"})).await;
    assert_eq!(res.unwrap_err(), "unknown field: folder");
}

#[tokio::test]
async fn test_form_cancel_returns_to_list() {
    let (_client, app) = setup(375);
    handle_method(&app, "router.navigate", &json!({"path": "/new"})).await.unwrap();
    let res = handle_method(&app, "form.cancel", &json!({})).await.unwrap();
    assert_eq!(res, json!({"route": "/"}));
}

// ─── List ───

#[tokio::test]
async fn test_delete_flow_through_rpc() {
    let (_client, app) = setup(1280);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();

    let res = handle_method(&app, "list.request_delete", &json!({"id": 2})).await.unwrap();
    assert_eq!(res["confirm"], "このブックマークを削除してもよろしいですか？");

    let res = handle_method(&app, "list.confirm_delete", &json!({})).await.unwrap();
    assert_eq!(res, json!({"deleted": 2}));

    let res = handle_method(&app, "list.take_notice", &json!({})).await.unwrap();
    assert_eq!(res, json!({"notice": "ブックマークを削除しました。"}));

    let res = handle_method(&app, "list.confirm_delete", &json!({})).await;
    assert_eq!(res.unwrap_err(), "no delete pending");
}

#[tokio::test]
async fn test_cancel_delete_through_rpc() {
    let (client, app) = setup(1280);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();
    handle_method(&app, "list.request_delete", &json!({"id": 1})).await.unwrap();

    handle_method(&app, "list.cancel_delete", &json!({})).await.unwrap();

    let state = handle_method(&app, "app.state", &json!({})).await.unwrap();
    assert!(state["pending_delete"].is_null());
    assert_eq!(client.count(Operation::Delete), 0);
}

#[tokio::test]
async fn test_toggle_menu_reports_alignment() {
    let (_client, app) = setup(375);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();

    let res = handle_method(&app, "list.toggle_menu", &json!({"id": 1, "button_right": 360}))
        .await
        .unwrap();

    assert_eq!(res["menu"]["open"], true);
    assert_eq!(res["menu"]["alignment"], "left");
}

#[tokio::test]
async fn test_request_edit_unknown_item() {
    let (_client, app) = setup(1280);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();
    let res = handle_method(&app, "list.request_edit", &json!({"id": 99})).await;
    assert_eq!(res.unwrap_err(), "bookmark not in list: 99");
}

#[tokio::test]
async fn test_request_edit_opens_modal_on_desktop() {
    let (_client, app) = setup(1280);
    handle_method(&app, "app.mount", &json!({})).await.unwrap();

    let state = handle_method(&app, "list.request_edit", &json!({"id": 3})).await.unwrap();

    assert_eq!(state["edit_modal_open"], true);
    assert_eq!(state["editing_target"], 3);
}
