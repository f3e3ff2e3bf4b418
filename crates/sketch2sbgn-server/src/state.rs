use sketch2sbgn::{converter::Converter, grounding::GroundingClient};
use std::sync::Arc;

/// Shared application state, immutable for the lifetime of the process
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
    pub grounding: Arc<GroundingClient>,
    pub null_on_grounding_failure: bool,
}

impl AppState {
    pub fn new(converter: Converter, grounding: GroundingClient) -> Self {
        Self {
            converter: Arc::new(converter),
            grounding: Arc::new(grounding),
            null_on_grounding_failure: false,
        }
    }

    pub fn with_null_on_grounding_failure(mut self, enabled: bool) -> Self {
        self.null_on_grounding_failure = enabled;
        self
    }
}
