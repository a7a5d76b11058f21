use axum::{
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::post,
    Json, Router,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::agents;
use crate::models::{AppState, RunRequest, RunResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/run", post(post_run))
        .with_state(state)
}

/// Run the research → summarize → email pipeline for one query.
///
/// Research failures are absorbed inside the pipeline; the only error
/// that reaches this handler is a failed summary stage.
async fn post_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<ResponseJson<RunResponse>, StatusCode> {
    let request_id = Uuid::new_v4();
    info!(%request_id, query = %request.query, "Received run request");

    match agents::run_pipeline(
        &request.query,
        state.researcher.as_ref(),
        state.summarizer.as_ref(),
    )
    .await
    {
        Ok(response) => {
            info!(%request_id, "Run request completed");
            Ok(Json(response))
        }
        Err(e) => {
            error!(%request_id, error = %e, "Pipeline failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
