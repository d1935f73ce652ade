use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::store::{ExampleFields, ExamplePatch};

pub use super::shared::{Pagination, normalize_page_params};
use super::shared::{double_option, is_blank, validate_not_blank};

pub const NOT_FOUND_MESSAGE: &str = "Example not found";
pub const REQUIRED_FIELDS_MESSAGE: &str = "Title and content are required";
pub const EXAMPLE_ID_REQUIRED_MESSAGE: &str = "Example ID is required";

/// Body for `POST /examples` and `PUT /examples/{id}`.
///
/// `title` and `content` are optional at the serde level so that a missing
/// field produces the API's own validation message.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ExampleRequest {
    #[schema(example = "Hello world")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(example = "console.log(\"Hello, World!\");")]
    pub content: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: Option<Value>,
}

/// Body for `PATCH /examples/{id}`. Only supplied fields are written.
#[derive(Debug, Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct PatchExampleRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    /// `null` resets metadata to `{}`.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Object)]
    pub metadata: Option<Option<Value>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExampleResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ExampleListResponse {
    pub examples: Vec<ExampleResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExampleListQuery {
    /// Page number, 1-based. Default: 1.
    pub page: Option<u64>,
    /// Items per page, 1-100. Default: 10.
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Example deleted successfully")]
    pub message: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExampleJobRequest {
    pub example_id: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExampleJobData {
    pub example_id: String,
    pub message_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ExampleJobResponse {
    pub success: bool,
    pub data: ExampleJobData,
}

impl From<crate::entity::example::Model> for ExampleResponse {
    fn from(m: crate::entity::example::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            content: m.content,
            metadata: m.metadata,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<PatchExampleRequest> for ExamplePatch {
    fn from(req: PatchExampleRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            content: req.content,
            metadata: req.metadata.map(metadata_or_default),
        }
    }
}

/// Metadata value to store when the client sent none (or `null`).
pub fn metadata_or_default(metadata: Option<Value>) -> Value {
    match metadata {
        Some(Value::Null) | None => Value::Object(Default::default()),
        Some(value) => value,
    }
}

/// Check required fields for create and full update, returning the values to store.
pub fn validate_example_request(req: ExampleRequest) -> Result<ExampleFields, AppError> {
    if is_blank(req.title.as_deref()) || is_blank(req.content.as_deref()) {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
    }

    Ok(ExampleFields {
        title: req.title.unwrap_or_default(),
        description: req.description,
        content: req.content.unwrap_or_default(),
        metadata: metadata_or_default(req.metadata),
    })
}

pub fn validate_patch_example(req: &PatchExampleRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_not_blank(title, "Title")?;
    }
    if let Some(ref content) = req.content {
        validate_not_blank(content, "Content")?;
    }
    Ok(())
}

/// Extract a usable example ID from a job request.
pub fn validate_job_request(req: CreateExampleJobRequest) -> Result<String, AppError> {
    match req.example_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(AppError::Validation(EXAMPLE_ID_REQUIRED_MESSAGE.into())),
    }
}
