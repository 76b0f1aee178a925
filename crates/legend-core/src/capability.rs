use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use legend_config::language::LanguageConfig;
use legend_provider::{LanguageDetector, ProviderError, ProviderSet, Summarizer, Translator};
use legend_types::{DetectedLanguage, LanguageCode, LanguagePair, Readiness, SessionEvent};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::error::InitError;
use crate::notify::Notifier;
use crate::resolver;

/// Identifies one directional translator; the pivot is always on one side
pub type TranslatorKey = LanguagePair;

/// Handles acquired so far. A missing translator key means that pair
/// failed to acquire, not that the state is broken.
#[derive(Default)]
pub struct CapabilityState {
    pub detector: Option<Arc<dyn LanguageDetector>>,
    pub translators: HashMap<TranslatorKey, Arc<dyn Translator>>,
    pub summarizer: Option<Arc<dyn Summarizer>>,
}

impl CapabilityState {
    pub fn readiness(&self) -> Readiness {
        Readiness {
            detector: self.detector.is_some(),
            translators: self.translators.len(),
            summarizer: self.summarizer.is_some(),
        }
    }
}

/// One step of initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    Detector,
    Translator(TranslatorKey),
    Summarizer,
}

impl fmt::Display for Acquisition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acquisition::Detector => f.write_str("language detector"),
            Acquisition::Translator(key) => write!(f, "translator {key}"),
            Acquisition::Summarizer => f.write_str("summarizer"),
        }
    }
}

/// Outcome of every acquisition attempted by [`CapabilityRegistry::initialize`]
#[derive(Debug, Default)]
pub struct InitReport {
    pub outcomes: Vec<(Acquisition, Result<(), InitError>)>,
}

impl InitReport {
    pub fn acquired(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| outcome.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &InitError> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| outcome.as_ref().err())
    }
}

pub struct CapabilityRegistry {
    pivot: LanguageCode,
    languages: Vec<LanguageCode>,
    state: RwLock<CapabilityState>,
}

impl CapabilityRegistry {
    pub fn new(config: &LanguageConfig) -> Self {
        Self {
            pivot: config.pivot.clone(),
            languages: config.codes().cloned().collect(),
            state: RwLock::new(CapabilityState::default()),
        }
    }

    pub fn pivot(&self) -> &LanguageCode {
        &self.pivot
    }

    /// Detector, then `pivot → L` and `L → pivot` for every language, then summarizer.
    /// A key is planned once even if two directions produce it.
    pub fn plan(&self) -> Vec<Acquisition> {
        let mut plan = vec![Acquisition::Detector];

        for language in &self.languages {
            let from_pivot = LanguagePair::new(self.pivot.clone(), language.clone());
            let to_pivot = LanguagePair::new(language.clone(), self.pivot.clone());

            for key in [from_pivot, to_pivot] {
                let target = Acquisition::Translator(key);
                if !plan.contains(&target) {
                    plan.push(target);
                }
            }
        }

        plan.push(Acquisition::Summarizer);
        plan
    }

    /// Acquire every planned capability in sequence. Individual failures are
    /// recorded in the report and never stop the remaining acquisitions.
    pub async fn initialize(
        &self,
        providers: &ProviderSet,
        cancel: &CancellationToken,
        notifier: &Notifier,
    ) -> Result<InitReport, InitError> {
        if providers.is_empty() {
            tracing::error!("No capability providers installed");
            return Err(InitError::ProvidersUnavailable);
        }

        let mut report = InitReport::default();

        for target in self.plan() {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("Initialization cancelled before {}", target);
                    return Err(InitError::Cancelled);
                }
                outcome = self.acquire(&target, providers) => outcome,
            };

            match outcome {
                Ok(()) => {
                    tracing::info!("{} ready", target);
                    notifier
                        .emit(SessionEvent::ReadinessChanged(self.readiness().await))
                        .await;
                    report.outcomes.push((target, Ok(())));
                }
                Err(source) => {
                    tracing::error!("Failed to acquire {}: {}", target, source);
                    let error = InitError::ProviderAcquisitionFailed {
                        target: target.clone(),
                        source,
                    };
                    report.outcomes.push((target, Err(error)));
                }
            }
        }

        tracing::info!(
            "Initialization finished: {}/{} capabilities acquired",
            report.acquired(),
            report.outcomes.len()
        );

        Ok(report)
    }

    async fn acquire(
        &self,
        target: &Acquisition,
        providers: &ProviderSet,
    ) -> Result<(), ProviderError> {
        match target {
            Acquisition::Detector => {
                let provider = providers.detector.as_ref().ok_or(ProviderError::NotInstalled)?;
                let detector = provider.create().await?;
                self.state.write().await.detector = Some(detector);
            }
            Acquisition::Translator(key) => {
                let provider = providers
                    .translator
                    .as_ref()
                    .ok_or(ProviderError::NotInstalled)?;
                let translator = provider.create(key).await?;
                self.state
                    .write()
                    .await
                    .translators
                    .insert(key.clone(), translator);
            }
            Acquisition::Summarizer => {
                let provider = providers
                    .summarizer
                    .as_ref()
                    .ok_or(ProviderError::NotInstalled)?;
                let summarizer = provider.create().await?;
                self.state.write().await.summarizer = Some(summarizer);
            }
        }

        Ok(())
    }

    pub async fn readiness(&self) -> Readiness {
        self.state.read().await.readiness()
    }

    /// Detector and summarizer acquired; translators may be partial
    pub async fn is_ready(&self) -> bool {
        self.readiness().await.is_ready()
    }

    pub async fn detector(&self) -> Option<Arc<dyn LanguageDetector>> {
        self.state.read().await.detector.clone()
    }

    pub async fn summarizer(&self) -> Option<Arc<dyn Summarizer>> {
        self.state.read().await.summarizer.clone()
    }

    pub async fn has_translators(&self) -> bool {
        !self.state.read().await.translators.is_empty()
    }

    pub async fn has_translator(&self, key: &TranslatorKey) -> bool {
        self.state.read().await.translators.contains_key(key)
    }

    /// Translator for `source` given the requested `target`, see [`resolver::resolve`]
    pub async fn resolve(
        &self,
        source: &DetectedLanguage,
        target: &LanguageCode,
    ) -> Option<(TranslatorKey, Arc<dyn Translator>)> {
        let state = self.state.read().await;
        resolver::resolve(&state, &self.pivot, source, target)
    }
}
