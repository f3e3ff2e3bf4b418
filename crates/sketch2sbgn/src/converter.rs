use std::sync::Arc;

use crate::answer::UntrustedAnswer;
use crate::assets::AssetStore;
use crate::errors::{ConversionError, ProviderError};
use crate::prompt::{compose, ConversionRequest};
use crate::providers::base::Provider;

/// Runs one image-to-SBGN-ML conversion: load the references, compose the
/// conversation, ask the model and hand back its text unchanged.
pub struct Converter {
    assets: AssetStore,
    provider: Arc<dyn Provider>,
}

impl Converter {
    pub fn new(assets: AssetStore, provider: Arc<dyn Provider>) -> Self {
        Self { assets, provider }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<UntrustedAnswer, ConversionError> {
        let references = self.assets.load_references().await?;
        let messages = compose(&references, request);

        let (message, _usage) = self.provider.complete(&messages).await?;
        if message.content.iter().all(|c| c.as_text().is_none()) {
            return Err(ProviderError::EmptyAnswer.into());
        }
        let answer = UntrustedAnswer::new(message.text());
        tracing::info!(model = self.provider.model(), answer = answer.as_str(), "model answer");

        let shape = answer.shape();
        if !shape.is_conforming() {
            tracing::warn!(%shape, "model answer does not follow the answer contract, relaying as-is");
        }

        Ok(answer)
    }
}
