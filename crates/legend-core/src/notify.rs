use kanal::AsyncSender;
use legend_types::SessionEvent;

/// Sending half of the state-change channel. A session without a
/// receiver attached simply drops its events.
#[derive(Clone, Default)]
pub struct Notifier {
    tx: Option<AsyncSender<SessionEvent>>,
}

impl Notifier {
    pub fn new(tx: AsyncSender<SessionEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub async fn emit(&self, event: SessionEvent) {
        let Some(tx) = &self.tx else {
            return;
        };

        if let Err(e) = tx.send(event).await {
            tracing::debug!("State change dropped, UI channel closed: {}", e);
        }
    }
}
