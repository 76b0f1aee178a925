use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use legend_config::language::LanguageConfig;
use legend_core::Session;
use legend_provider::ProviderSet;
use legend_types::{AppEvent, DetectedLanguage, LanguageCode, MessageId, SessionEvent};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use super::fakes::provider_set;
use crate::controller::ChannelSet;
use crate::events::event_loop;

/// Wait for an event matching `want`, skipping the others
async fn wait_for(rx: &AsyncReceiver<SessionEvent>, want: impl Fn(&SessionEvent) -> bool) {
    let result = timeout(Duration::from_secs(2), async {
        loop {
            match rx.recv().await {
                Ok(event) if want(&event) => return,
                Ok(event) => tracing::debug!("Skipping {:?}", event),
                Err(e) => panic!("Channel error: {}", e),
            }
        }
    })
    .await;

    assert!(result.is_ok(), "Timeout - event never arrived!");
}

fn spawn_loop(
    channels: &ChannelSet,
    cancel: &CancellationToken,
) -> (Arc<Session>, tokio::task::JoinHandle<anyhow::Result<()>>) {
    spawn_loop_with(channels, cancel, ProviderSet::default())
}

fn spawn_loop_with(
    channels: &ChannelSet,
    cancel: &CancellationToken,
    providers: ProviderSet,
) -> (Arc<Session>, tokio::task::JoinHandle<anyhow::Result<()>>) {
    let session = Arc::new(
        Session::new(LanguageConfig::default())
            .with_notifier(channels.app_to_ui.0.clone())
            .with_cancel_token(cancel.child_token()),
    );

    let handle = tokio::spawn(event_loop(
        session.clone(),
        providers,
        channels.ui_to_app.1.clone(),
        cancel.clone(),
    ));

    (session, handle)
}

#[tokio::test]
async fn test_initialization_without_providers_reports_error() {
    let channels = ChannelSet::new(16);
    let cancel = CancellationToken::new();
    let (session, _handle) = spawn_loop(&channels, &cancel);

    wait_for(&channels.app_to_ui.1, |event| {
        *event == SessionEvent::ErrorChanged(Some("AI APIs are not available.".to_string()))
    })
    .await;

    assert!(!session.is_ready().await);
    cancel.cancel();
}

#[tokio::test]
async fn test_detect_event_reaches_session() {
    let channels = ChannelSet::new(16);
    let cancel = CancellationToken::new();
    let (session, _handle) = spawn_loop(&channels, &cancel);

    channels
        .ui_to_app
        .0
        .send(AppEvent::Detect("Hola".to_string()))
        .await
        .expect("send failed");

    wait_for(&channels.app_to_ui.1, |event| {
        *event == SessionEvent::InputConsumed
    })
    .await;

    assert!(session.conversation().await.is_empty());
    cancel.cancel();
}

#[tokio::test]
async fn test_select_target_event() {
    let channels = ChannelSet::new(16);
    let cancel = CancellationToken::new();
    let (session, _handle) = spawn_loop(&channels, &cancel);

    channels
        .ui_to_app
        .0
        .send(AppEvent::SelectTarget(LanguageCode::new("pt")))
        .await
        .expect("send failed");

    wait_for(&channels.app_to_ui.1, |event| {
        *event == SessionEvent::TargetChanged(LanguageCode::new("pt"))
    })
    .await;

    assert_eq!(session.target().await, LanguageCode::new("pt"));
    cancel.cancel();
}

#[tokio::test]
async fn test_shutdown_event_stops_loop_and_cancels() {
    let channels = ChannelSet::new(16);
    let cancel = CancellationToken::new();
    let (_session, handle) = spawn_loop(&channels, &cancel);

    channels
        .ui_to_app
        .0
        .send(AppEvent::Shutdown)
        .await
        .expect("send failed");

    let result = timeout(Duration::from_secs(2), handle).await;

    match result {
        Ok(Ok(Ok(()))) => assert!(cancel.is_cancelled()),
        Ok(Ok(Err(e))) => panic!("Event loop failed: {}", e),
        Ok(Err(e)) => panic!("Event loop panicked: {}", e),
        Err(_) => panic!("Timeout - event loop never stopped!"),
    }
}

async fn send(channels: &ChannelSet, event: AppEvent) {
    channels.ui_to_app.0.send(event).await.expect("send failed");
}

async fn wait_until_ready(channels: &ChannelSet) {
    wait_for(&channels.app_to_ui.1, |event| {
        matches!(event, SessionEvent::ReadinessChanged(readiness) if readiness.is_ready())
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_translate_after_select_target_uses_new_target() {
    let channels = ChannelSet::new(256);
    let cancel = CancellationToken::new();
    let (session, _handle) = spawn_loop_with(&channels, &cancel, provider_set("en"));
    wait_until_ready(&channels).await;

    send(&channels, AppEvent::Detect("Hello".to_string())).await;
    wait_for(&channels.app_to_ui.1, |event| {
        *event == SessionEvent::MessageAppended(MessageId(0))
    })
    .await;

    for round in 0..100 {
        let target = if round % 2 == 0 { "ru" } else { "pt" };
        send(&channels, AppEvent::SelectTarget(LanguageCode::new(target))).await;
        send(
            &channels,
            AppEvent::Translate {
                id: MessageId(0),
                source: DetectedLanguage::Known(LanguageCode::new("en")),
            },
        )
        .await;

        wait_for(&channels.app_to_ui.1, |event| {
            *event == SessionEvent::TranslationUpdated(MessageId(0))
        })
        .await;

        let translation = session.message(MessageId(0)).await.unwrap().translation.unwrap();
        assert_eq!(translation.text, format!("{target}:Hello"), "round {round}");
    }

    cancel.cancel();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_detects_append_in_arrival_order() {
    let channels = ChannelSet::new(256);
    let cancel = CancellationToken::new();
    let (session, _handle) = spawn_loop_with(&channels, &cancel, provider_set("es"));
    wait_until_ready(&channels).await;

    for i in 0..50 {
        send(&channels, AppEvent::Detect(format!("mensaje {i}"))).await;
    }

    wait_for(&channels.app_to_ui.1, |event| {
        *event == SessionEvent::MessageAppended(MessageId(49))
    })
    .await;

    let texts: Vec<String> = session
        .conversation()
        .await
        .into_iter()
        .map(|message| message.text)
        .collect();
    let expected: Vec<String> = (0..50).map(|i| format!("mensaje {i}")).collect();
    assert_eq!(texts, expected);

    cancel.cancel();
}
