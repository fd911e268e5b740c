//! Fusen — a headless bookmark manager client.
//!
//! Entry point: loads settings, mounts the app against the configured API and
//! prints the rendered screen, then walks through the desktop and mobile
//! editor presentations. Usage: `fusen [viewport-width]`.

use fusen::app::App;
use fusen::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use fusen::telemetry;
use fusen::types::presentation::DEFAULT_DESKTOP_MIN_WIDTH;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init("fusen=info");

    let width = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<u32>().map_err(|e| format!("invalid viewport width {:?}: {}", raw, e))?,
        None => DEFAULT_DESKTOP_MIN_WIDTH,
    };

    let config_path = std::env::var("FUSEN_CONFIG").ok();
    let mut engine = SettingsEngine::new(config_path);
    let settings = engine.load()?;

    section("Settings");
    println!("  config file: {}", engine.get_config_path());
    println!("  api:         {}", settings.api_base_url);
    println!("  page size:   {}", settings.page_size);
    println!();

    let mut app = App::new(settings, width)?;

    section(&format!("Bookmark list ({}px, {:?})", width, app.controller.viewport_class()));
    app.mount().await;
    println!("{}", app.render());
    println!();

    section("Create editor");
    app.request_create().await;
    println!("  route: {}", app.controller.current_route().path());
    println!("  create modal open: {}", app.controller.create_modal_open());
    println!("{}", app.render());
    app.cancel_form().await;
    println!();

    let other_width = if app.controller.viewport_class().is_desktop() { 375 } else { 1280 };
    section(&format!("Create editor after resize to {}px", other_width));
    app.resize(other_width).await;
    app.request_create().await;
    println!("  route: {}", app.controller.current_route().path());
    println!("  create modal open: {}", app.controller.create_modal_open());
    app.cancel_form().await;

    Ok(())
}
