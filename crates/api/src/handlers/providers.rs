use axum::{extract::State, Json};
use tracing::{debug, instrument};

use crate::dto::ProviderResponse;
use crate::state::AppState;

#[instrument(skip(state), name = "api_get_providers")]
pub async fn get_providers(State(state): State<AppState>) -> Json<Vec<ProviderResponse>> {
    let registry = state.registry.load();
    let total = registry.total_weight();

    let providers: Vec<ProviderResponse> = registry
        .providers()
        .iter()
        .map(|p| ProviderResponse::from_provider(p, total))
        .collect();

    debug!(count = providers.len(), total_weight = total, "Listing providers");
    Json(providers)
}
