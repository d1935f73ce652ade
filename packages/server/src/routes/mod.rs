use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Request body cap for example payloads.
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/examples", example_routes())
        .nest("/example-job", example_job_routes())
        .nest("/health", health_routes())
}

fn example_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::example::list_examples,
            handlers::example::create_example
        ))
        .routes(routes!(
            handlers::example::get_example,
            handlers::example::replace_example,
            handlers::example::update_example,
            handlers::example::delete_example
        ))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

fn example_job_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::example_job::enqueue_example_job))
}

fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::health::health_check))
}
