// Export route modules
pub mod convert;
pub mod grounding;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(convert::routes(state.clone()))
        .merge(grounding::routes(state))
}
