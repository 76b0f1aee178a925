use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use kanal::AsyncSender;
use legend_config::language::LanguageConfig;
use legend_provider::{ProviderError, ProviderSet};
use legend_types::{LanguageCode, MessageId, Readiness, SessionEvent};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::capability::{Acquisition, CapabilityRegistry, InitReport};
use crate::conversation::{ConversationStore, Message};
use crate::error::{CommandError, InitError};
use crate::notify::Notifier;

/// Everything a UI needs for one conversation: capabilities, messages,
/// the target selection and the status slots. Shared behind an `Arc`.
pub struct Session {
    pub(crate) languages: LanguageConfig,
    pub(crate) registry: CapabilityRegistry,
    pub(crate) conversation: ConversationStore,
    target: RwLock<LanguageCode>,
    /// Advisory only, overlapping commands may clear it early
    loading: AtomicBool,
    last_error: RwLock<Option<String>>,
    pub(crate) notifier: Notifier,
    cancel: CancellationToken,
}

impl Session {
    pub fn new(languages: LanguageConfig) -> Self {
        Self {
            registry: CapabilityRegistry::new(&languages),
            conversation: ConversationStore::new(),
            target: RwLock::new(languages.default_target.clone()),
            loading: AtomicBool::new(false),
            last_error: RwLock::new(None),
            notifier: Notifier::default(),
            cancel: CancellationToken::new(),
            languages,
        }
    }

    pub fn with_notifier(mut self, tx: AsyncSender<SessionEvent>) -> Self {
        self.notifier = Notifier::new(tx);
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn languages(&self) -> &LanguageConfig {
        &self.languages
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Acquire capabilities. Failed translator pairs are only logged, a
    /// missing detector or summarizer also lands in the error slot.
    pub async fn initialize(&self, providers: &ProviderSet) -> Result<InitReport, InitError> {
        let result = self
            .registry
            .initialize(providers, &self.cancel, &self.notifier)
            .await;

        match &result {
            Ok(report) => {
                let essential = report.outcomes.iter().find_map(|(target, outcome)| {
                    match (target, outcome) {
                        (Acquisition::Detector | Acquisition::Summarizer, Err(e)) => Some(e),
                        _ => None,
                    }
                });
                if let Some(e) = essential {
                    self.report_error(e.to_string()).await;
                }
            }
            Err(e) => self.report_error(e.to_string()).await,
        }

        result
    }

    pub async fn readiness(&self) -> Readiness {
        self.registry.readiness().await
    }

    pub async fn is_ready(&self) -> bool {
        self.registry.is_ready().await
    }

    pub async fn conversation(&self) -> Vec<Message> {
        self.conversation.snapshot().await
    }

    pub async fn message(&self, id: MessageId) -> Option<Message> {
        self.conversation.get(id).await
    }

    pub async fn target(&self) -> LanguageCode {
        self.target.read().await.clone()
    }

    /// Affects every translate resolved from now on, including pending ones
    /// that have not resolved yet
    pub async fn set_target(&self, target: LanguageCode) {
        self.store_target(target.clone()).await;
        self.notifier.emit(SessionEvent::TargetChanged(target)).await;
    }

    /// Write the selection without publishing `TargetChanged`
    pub async fn store_target(&self, target: LanguageCode) {
        if !self.languages.is_supported(&target) {
            tracing::warn!("Target language {} is not configured", target);
        }

        *self.target.write().await = target;
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    pub(crate) async fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
        self.notifier.emit(SessionEvent::LoadingChanged(loading)).await;
    }

    pub(crate) async fn report_error(&self, message: String) {
        *self.last_error.write().await = Some(message.clone());
        self.notifier
            .emit(SessionEvent::ErrorChanged(Some(message)))
            .await;
    }

    pub(crate) async fn clear_error(&self) {
        let previous = self.last_error.write().await.take();
        if previous.is_some() {
            self.notifier.emit(SessionEvent::ErrorChanged(None)).await;
        }
    }

    /// Run a provider call, giving up if the session is cancelled
    pub(crate) async fn call<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<Result<T, ProviderError>, CommandError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(CommandError::Cancelled),
            result = call => Ok(result),
        }
    }
}
