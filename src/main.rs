use std::sync::Arc;

use anyhow::{Context, Result};
use splash_core::Config;
use splash_services::TodoClient;
use splash_ui::services::TodoService;

fn main() -> Result<()> {
    splash_core::init(&Config::log_path()?)?;

    let (config, _) = Config::load_validated()?;
    tracing::info!(
        "ColorSplash starting against {}",
        config.services.todo_api_url
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("colorsplash-tokio")
        .build()
        .context("Failed to create tokio runtime")?;

    let client = TodoClient::with_timeout(&config.services.todo_api_url, config.request_timeout())
        .context("Failed to create todo client")?;

    let (service, rx) = TodoService::new(Arc::new(client), runtime.handle().clone());
    splash_ui::tui::run_tui(service, rx, &config.ui).context("Terminal UI failed")?;

    tracing::info!("ColorSplash stopped");
    Ok(())
}
