use crate::error::AnalyzerError;
use crate::traits::model_client::ModelClient;
use crate::types::FeedbackRequest;
use async_trait::async_trait;

/// Placeholder answer in the same layout a real model is asked for.
const PLACEHOLDER_FEEDBACK: &str = "\
### Sprache
- [KAPITEL: Unbekannt] Beispiel-Feedback: Der Text ist verständlich formuliert.

### Struktur
- [KAPITEL: Unbekannt] Beispiel-Feedback: Die Gliederung wirkt solide.

### Argumentation
- [KAPITEL: Unbekannt] Beispiel-Feedback: Die Argumente sind nachvollziehbar.

### Zusammenfassung
Beispiel-Zusammenfassung. Es ist kein Sprachmodell konfiguriert; \
setze OPENAI_BASE_URL und OPENAI_API_KEY für echtes Feedback.";

/// Fallback used when no model endpoint is configured.
///
/// Answers every request with fixed example feedback and reports itself as not
/// live, so responses can tell users the feedback is a placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineModelClient;

#[async_trait]
impl ModelClient for OfflineModelClient {
    async fn complete(&self, _request: &FeedbackRequest) -> Result<String, AnalyzerError> {
        Ok(PLACEHOLDER_FEEDBACK.to_string())
    }

    fn is_live(&self) -> bool {
        false
    }
}
