use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use legend_config::Config;
use legend_core::Session;
use legend_provider::ProviderSet;
use legend_types::{AppEvent, SessionEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<SessionEvent>, AsyncReceiver<SessionEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(event_capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(event_capacity),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    session: Arc<Session>,
    providers: ProviderSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(config: Config) -> Self {
        let channels = ChannelSet::new(config.event_capacity);
        let cancel_token = CancellationToken::new();

        let session = Session::new(config.languages.clone())
            .with_notifier(channels.app_to_ui.0.clone())
            .with_cancel_token(cancel_token.child_token());

        Self {
            providers: legend_remote::provider_set(&config.providers),
            session: Arc::new(session),
            channels,
            cancel_token,
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop, also drives capability initialization
        tasks.spawn(event_loop(
            self.session.clone(),
            self.providers.clone(),
            self.channels.ui_to_app.1.clone(),
            self.cancel_token.clone(),
        ));

        // Console UI
        tasks.spawn(ui_loop(
            self.session.clone(),
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
