use std::sync::Arc;

use legend_provider::Translator;
use legend_types::{DetectedLanguage, LanguageCode, LanguagePair};

use crate::capability::{CapabilityState, TranslatorKey};

/// Key of the translator used for a `source` message when `target` is selected.
///
/// Translation always runs through the pivot: pivot messages go `pivot → target`,
/// everything else goes `source → pivot` whatever the target is.
pub fn translator_key(
    pivot: &LanguageCode,
    source: &LanguageCode,
    target: &LanguageCode,
) -> TranslatorKey {
    if source == pivot {
        LanguagePair::new(pivot.clone(), target.clone())
    } else {
        LanguagePair::new(source.clone(), pivot.clone())
    }
}

/// `None` when the source is unknown or no translator is installed under the key
pub fn resolve(
    state: &CapabilityState,
    pivot: &LanguageCode,
    source: &DetectedLanguage,
    target: &LanguageCode,
) -> Option<(TranslatorKey, Arc<dyn Translator>)> {
    let source = source.code()?;
    let key = translator_key(pivot, source, target);
    let translator = state.translators.get(&key)?.clone();
    Some((key, translator))
}
