use std::env;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use eyre::WrapErr;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

use ekho_render::Branding;
use ekho_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bind = env::var("EKHO_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let timeout_secs = env_u64("EKHO_RENDER_TIMEOUT_SECS", 30);
    let max_renders = env_u64("EKHO_MAX_CONCURRENT_RENDERS", 4) as usize;
    let default_theme =
        env::var("EKHO_DEFAULT_THEME").unwrap_or_else(|_| "classic".to_string());

    let state = AppState {
        branding: Arc::new(load_branding()?),
        default_theme,
        render_timeout: Duration::from_secs(timeout_secs),
        render_slots: Arc::new(Semaphore::new(max_renders)),
    };

    let app = ekho_server::router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .wrap_err_with(|| format!("failed to bind {bind}"))?;
    tracing::info!(%bind, max_renders, "ekho render service listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Resolve branding once at startup: the logo file, if configured, becomes
/// an immutable data URI injected into every rendered document.
fn load_branding() -> eyre::Result<Branding> {
    let mut branding = Branding::default();

    if let Ok(path) = env::var("EKHO_LOGO_PATH") {
        let bytes = std::fs::read(&path).wrap_err_with(|| format!("failed to read logo {path}"))?;
        let mime = if path.ends_with(".svg") {
            "image/svg+xml"
        } else {
            "image/png"
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        branding.logo_data_uri = Some(format!("data:{mime};base64,{encoded}"));
    }

    if let Ok(name) = env::var("EKHO_PRODUCT_NAME") {
        branding.product_name = name;
    }

    Ok(branding)
}
