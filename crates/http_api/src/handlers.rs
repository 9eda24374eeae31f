use axum::{
    extract::{
        Json, Multipart, Query, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use app_api::{AppContext, CostsRequest, SummaryRequest};

use crate::{errors::HttpError, state::HttpState};

const UPLOAD_FIELD: &str = "file";

async fn run_blocking<T, F>(state: HttpState, task: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&AppContext) -> costwatch_app::Result<T> + Send + 'static,
{
    let context = state.context;
    let result = tokio::task::spawn_blocking(move || task(&context))
        .await
        .map_err(|err| HttpError::internal(err.to_string()))?;
    Ok(result?)
}

fn multipart_error(err: MultipartError) -> HttpError {
    let status = err.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return HttpError::new(status, err.body_text(), Some("payload_too_large".to_string()));
    }
    HttpError::invalid_input(format!("failed to read multipart upload: {}", err.body_text()))
}

async fn read_upload_field(mut multipart: Multipart) -> Result<Vec<u8>, HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(bytes.to_vec());
    }
    Err(HttpError::invalid_input(format!(
        "missing multipart field `{}`",
        UPLOAD_FIELD
    )))
}

pub async fn root() -> impl IntoResponse {
    Json(app_api::root())
}

pub async fn costs(
    State(state): State<HttpState>,
    Query(req): Query<CostsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(state, move |ctx| app_api::costs(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn costs_summary(
    State(state): State<HttpState>,
    Query(req): Query<SummaryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(state, move |ctx| app_api::costs_summary(ctx, req)).await?;
    Ok(Json(response))
}

pub async fn services(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(state, app_api::services).await?;
    Ok(Json(response))
}

pub async fn anomalies(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(state, app_api::anomalies).await?;
    Ok(Json(response))
}

pub async fn upload_csv(
    State(state): State<HttpState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let multipart = multipart.map_err(|err| HttpError::invalid_input(err.body_text()))?;
    let bytes = read_upload_field(multipart).await?;
    let response = run_blocking(state, move |ctx| app_api::upload_csv(ctx, &bytes)).await?;
    Ok(Json(response))
}

pub async fn reset_mock_data(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(state, app_api::reset_mock_data).await?;
    Ok(Json(response))
}
