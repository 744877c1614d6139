//! Engine process lifecycle: launch, content load with timeout, and
//! guaranteed teardown on every exit path.

use std::future::Future;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;

use ekho_core::config::{RenderConfig, WaitStrategy};

use crate::error::EngineError;

/// One isolated, short-lived process per request: minimal shared memory,
/// single execution process, no GPU. Pooling is deliberately not attempted.
const ENGINE_ARGS: &[&str] = &[
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--single-process",
    "--no-first-run",
    "--disable-extensions",
];

/// A loaded page ready for measurement and capture. Only handed out by
/// [`with_engine`]; it never owns the browser process.
pub struct EngineSession {
    page: Page,
}

impl EngineSession {
    pub(crate) fn page(&self) -> &Page {
        &self.page
    }
}

/// Run `capture` against a freshly launched engine with `markup` loaded.
///
/// The engine process is released on every exit path — success, timeout,
/// and crash. No path returns without attempting teardown.
pub async fn with_engine<T, F, Fut>(
    markup: &str,
    config: &RenderConfig,
    capture: F,
) -> Result<T, EngineError>
where
    F: FnOnce(EngineSession) -> Fut,
    Fut: Future<Output = Result<T, EngineError>>,
{
    let browser_config = BrowserConfig::builder()
        .no_sandbox()
        .window_size(config.viewport_width, config.viewport_height)
        .args(ENGINE_ARGS.iter().copied())
        .build()
        .map_err(|message| EngineError::Crash {
            phase: "launch",
            message,
        })?;

    let (mut browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        EngineError::Crash {
            phase: "launch",
            message: e.to_string(),
        }
    })?;
    tracing::debug!("engine launched");

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    // Everything past launch runs inside one future so the teardown below
    // covers success, timeout, and crash alike.
    let result = drive(&browser, markup, config, capture).await;

    teardown(&mut browser).await;
    handler_task.abort();

    result
}

async fn drive<T, F, Fut>(
    browser: &Browser,
    markup: &str,
    config: &RenderConfig,
    capture: F,
) -> Result<T, EngineError>
where
    F: FnOnce(EngineSession) -> Fut,
    Fut: Future<Output = Result<T, EngineError>>,
{
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| EngineError::Crash {
            phase: "page-open",
            message: e.to_string(),
        })?;

    tokio::time::timeout(config.timeout, load(&page, markup, config.wait))
        .await
        .map_err(|_| EngineError::Timeout {
            timeout: config.timeout,
        })??;
    tracing::debug!(bytes = markup.len(), "content loaded");

    capture(EngineSession { page }).await
}

async fn load(page: &Page, markup: &str, wait: WaitStrategy) -> Result<(), EngineError> {
    page.set_content(markup)
        .await
        .map_err(|e| EngineError::Crash {
            phase: "load",
            message: e.to_string(),
        })?;

    // set_content resolves once the markup is parsed; external fonts and
    // assets may still be in flight at that point.
    if wait == WaitStrategy::NetworkIdle {
        page.wait_for_navigation()
            .await
            .map_err(|e| EngineError::Crash {
                phase: "load",
                message: e.to_string(),
            })?;
    }

    Ok(())
}

async fn teardown(browser: &mut Browser) {
    if let Err(error) = browser.close().await {
        tracing::warn!(%error, "engine close failed, killing process");
        let _ = browser.kill().await;
    }
    match browser.wait().await {
        Ok(_) => tracing::debug!("engine released"),
        Err(error) => tracing::warn!(%error, "engine process wait failed"),
    }
}
