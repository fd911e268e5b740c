//! RPC method handler for the Fusen JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! `App` view-models, so an external shell can drive the client and draw
//! what `app.render` / `app.state` report.

use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::{ActiveForm, App};
use crate::managers::bookmark_form::FormField;
use crate::managers::bookmark_list::DeleteOutcome;
use crate::types::errors::UNKNOWN_ERROR_MESSAGE;

fn param_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", key))
}

fn param_i64(params: &Value, key: &str) -> Result<i64, String> {
    params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("missing {}", key))
}

fn param_u32(params: &Value, key: &str) -> Result<u32, String> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| format!("missing {}", key))
}

/// Snapshot of everything a shell needs to draw the screen.
pub fn state_snapshot(app: &App) -> Value {
    let ctrl = &app.controller;
    let form = app.form().map(|form| {
        let kind = serde_json::to_value(form.kind()).unwrap_or(Value::Null);
        let fields = match form {
            ActiveForm::Create(f) => &f.fields,
            ActiveForm::Edit(f) => &f.fields,
        };
        json!({
            "kind": kind,
            "url": fields.url,
            "title": fields.title,
            "description": fields.description,
            "tags": fields.tags,
            "error": form.error(),
        })
    });

    json!({
        "viewport": ctrl.viewport_class(),
        "viewport_width": ctrl.viewport_width(),
        "refresh_epoch": ctrl.refresh_epoch(),
        "route": ctrl.current_route().path(),
        "routes": ctrl.registered_patterns(),
        "create_modal_open": ctrl.create_modal_open(),
        "edit_modal_open": ctrl.edit_modal_open(),
        "editing_target": ctrl.editing_target().map(|b| b.id),
        "list": app.list.state(),
        "pending_delete": app.list.pending_delete(),
        "notice": app.list.notice(),
        "form": form,
    })
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── App ───
        "app.mount" => {
            let mut a = app.lock().await;
            a.mount().await;
            Ok(state_snapshot(&a))
        }
        "app.render" => {
            let a = app.lock().await;
            Ok(json!({"text": a.render()}))
        }
        "app.state" => {
            let a = app.lock().await;
            Ok(state_snapshot(&a))
        }

        // ─── Controller ───
        "viewport.resize" => {
            let width = param_u32(params, "width")?;
            let mut a = app.lock().await;
            a.resize(width).await;
            Ok(json!({"viewport": a.controller.viewport_class()}))
        }
        "router.navigate" => {
            let path = param_str(params, "path")?;
            let mut a = app.lock().await;
            let route = a.navigate(path).await;
            Ok(json!({"route": route.path()}))
        }
        "controller.request_create" => {
            let mut a = app.lock().await;
            a.request_create().await;
            Ok(state_snapshot(&a))
        }
        "modal.dismiss" => {
            let mut a = app.lock().await;
            a.dismiss_modal().await;
            Ok(json!({"ok": true}))
        }

        // ─── List ───
        "list.refresh" => {
            let mut a = app.lock().await;
            a.list.fetch().await;
            Ok(json!({"list": a.list.state()}))
        }
        "list.toggle_menu" => {
            let id = param_i64(params, "id")?;
            let button_right = param_u32(params, "button_right")?;
            let mut a = app.lock().await;
            let width = a.controller.viewport_width();
            if !a.list.toggle_menu(id, button_right, width) {
                return Err(format!("bookmark not in list: {}", id));
            }
            let menu = a.list.menu(id).copied();
            Ok(json!({"menu": menu}))
        }
        "list.request_edit" => {
            let id = param_i64(params, "id")?;
            let mut a = app.lock().await;
            if !a.request_edit(id).await {
                return Err(format!("bookmark not in list: {}", id));
            }
            Ok(state_snapshot(&a))
        }
        "list.request_delete" => {
            let id = param_i64(params, "id")?;
            let mut a = app.lock().await;
            let prompt = a
                .list
                .request_delete(id)
                .ok_or_else(|| format!("bookmark not in list: {}", id))?;
            Ok(json!({"confirm": prompt}))
        }
        "list.confirm_delete" => {
            let mut a = app.lock().await;
            match a.list.confirm_delete().await {
                DeleteOutcome::NothingPending => Err("no delete pending".to_string()),
                DeleteOutcome::Deleted(id) => Ok(json!({"deleted": id})),
                DeleteOutcome::Failed(e) => Err(e.user_message()),
            }
        }
        "list.cancel_delete" => {
            let mut a = app.lock().await;
            a.list.cancel_delete();
            Ok(json!({"ok": true}))
        }
        "list.take_notice" => {
            let mut a = app.lock().await;
            let notice = a.list.take_notice();
            Ok(json!({"notice": notice.map(|n| n.text())}))
        }

        // ─── Forms ───
        "form.set_field" => {
            let field: FormField = param_str(params, "field")?.parse()?;
            let value = param_str(params, "value")?;
            let mut a = app.lock().await;
            if !a.set_field(field, value) {
                return Err("no form open".to_string());
            }
            Ok(json!({"ok": true}))
        }
        "form.submit" => {
            let mut a = app.lock().await;
            match a.submit_form().await {
                None => Err("no form open".to_string()),
                Some(Ok(bookmark)) => serde_json::to_value(bookmark).map_err(|_| UNKNOWN_ERROR_MESSAGE.to_string()),
                Some(Err(e)) => Err(e.to_string()),
            }
        }
        "form.cancel" => {
            let mut a = app.lock().await;
            a.cancel_form().await;
            Ok(json!({"route": a.controller.current_route().path()}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
