use std::sync::Arc;

use kanal::AsyncReceiver;
use legend_core::Session;
use legend_provider::ProviderSet;
use legend_types::{AppEvent, SessionEvent};
use tokio_util::sync::CancellationToken;

/// App's main loop.
///
/// Target selection is written before the next event is received, so every
/// later translate sees it. Detect and summarize consume the input buffer
/// and run one at a time in arrival order; translations and visibility
/// toggles run in their own tasks and may overlap.
pub async fn event_loop(
    session: Arc<Session>,
    providers: ProviderSet,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let init_session = session.clone();
    tokio::spawn(async move {
        match init_session.initialize(&providers).await {
            Ok(report) => tracing::info!(
                "AI services initialized, ready: {}",
                init_session.is_ready().await && report.failures().next().is_none()
            ),
            Err(e) => tracing::error!("Error initializing AI APIs: {}", e),
        }
    });

    let (input_tx, input_rx) = kanal::unbounded_async();
    tokio::spawn(input_worker(session.clone(), input_rx));

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled, stopping");
                return Ok(());
            }
        };

        tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", event);

        match event {
            AppEvent::Shutdown => {
                cancel.cancel();
                return Ok(());
            }
            AppEvent::SelectTarget(target) => {
                session.store_target(target).await;
                // Publish the selection current at emit time
                let session = session.clone();
                tokio::spawn(async move {
                    let current = session.target().await;
                    session
                        .notifier()
                        .emit(SessionEvent::TargetChanged(current))
                        .await;
                });
            }
            event @ (AppEvent::Detect(_) | AppEvent::Summarize(_)) => {
                input_tx.send(event).await?;
            }
            event => {
                tokio::spawn(handle_event(session.clone(), event));
            }
        }
    }
}

/// Runs input commands one after another
async fn input_worker(session: Arc<Session>, input_rx: AsyncReceiver<AppEvent>) {
    while let Ok(event) = input_rx.recv().await {
        handle_event(session.clone(), event).await;
    }
    tracing::debug!("[EVENT_LOOP] Input worker stopped");
}

async fn handle_event(session: Arc<Session>, event: AppEvent) {
    // Command failures already sit in the session's error slot
    match event {
        AppEvent::Detect(text) => {
            let _ = session.detect(&text).await;
        }
        AppEvent::Translate { id, source } => {
            let _ = session.translate(id, &source).await;
        }
        AppEvent::Summarize(text) => {
            let _ = session.summarize(&text).await;
        }
        AppEvent::SetTranslationVisible { id, visible } => {
            let _ = session.set_translation_visible(id, visible).await;
        }
        AppEvent::SelectTarget(_) | AppEvent::Shutdown => {}
    }
}
