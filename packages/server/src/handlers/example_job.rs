use axum::Json;
use axum::extract::State;
use common::ExampleJob;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::example::find_example;
use crate::models::example::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Example Jobs",
    operation_id = "enqueueExampleJob",
    summary = "Queue an example for background processing",
    description = "Checks that the example exists, then publishes an `example_job` task referencing it to the job queue. The broker's message ID is returned. Queue failures are reported, not retried.",
    request_body = CreateExampleJobRequest,
    responses(
        (status = 200, description = "Job queued", body = ExampleJobResponse),
        (status = 400, description = "Missing exampleId (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Example not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Queue not configured or unreachable (QUEUE_NOT_CONFIGURED, QUEUE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn enqueue_example_job(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateExampleJobRequest>,
) -> Result<Json<ExampleJobResponse>, AppError> {
    let example_id = validate_job_request(payload)?;

    // Not atomic with the publish: a concurrent delete can still slip in
    // between, and the consumer has to tolerate a missing example.
    let example = find_example(&state.db, &example_id).await?;

    let Some(ref publisher) = state.mq else {
        return Err(AppError::QueueNotConfigured);
    };

    let job = ExampleJob::new(example.id.clone());
    let message_id =
        mq::publish_message(publisher.as_ref(), &state.config.mq.queue_name, &job).await?;

    info!(
        example_id = %example.id,
        job_id = %job.job_id,
        message_id = %message_id,
        "Example job enqueued"
    );

    Ok(Json(ExampleJobResponse {
        success: true,
        data: ExampleJobData {
            example_id: example.id,
            message_id,
        },
    }))
}
