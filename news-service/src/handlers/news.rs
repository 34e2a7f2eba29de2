use crate::dtos::{DeleteResponse, NewsPayload, NewsResponse};
use crate::error::NewsError;
use crate::models::NewsItem;
use crate::services::record_operation;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Requests without a JSON content type are read as an empty object, so every
/// field ends up `null`. Any other body problem is an internal error.
fn read_payload(payload: Result<Json<NewsPayload>, JsonRejection>) -> Result<NewsPayload, NewsError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(NewsPayload::default()),
        Err(rejection) => Err(NewsError::Internal(anyhow::anyhow!(
            "Failed to parse request body: {}",
            rejection.body_text()
        ))),
    }
}

fn observe<T>(operation: &'static str, result: Result<T, NewsError>) -> Result<T, NewsError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(NewsError::NotFound) => "not_found",
        Err(_) => "error",
    };
    record_operation(operation, outcome);
    result
}

#[tracing::instrument(skip(state))]
pub async fn list_news(State(state): State<AppState>) -> Result<impl IntoResponse, NewsError> {
    let items = observe("list", state.db.list_news().await.map_err(NewsError::Fetch))?;

    tracing::debug!(count = items.len(), "Listed news");

    Ok(Json(
        items
            .into_iter()
            .map(NewsResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<NewsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, NewsError> {
    let item = NewsItem::from(read_payload(payload)?);

    let created = observe(
        "create",
        state.db.insert_news(item).await.map_err(NewsError::Add),
    )?;

    tracing::info!(news_id = ?created.id, "News created");

    // Same shape as the driver's list of inserted documents
    Ok((StatusCode::CREATED, Json(vec![NewsResponse::from(created)])))
}

/// Responds with the document as it was before the overwrite.
#[tracing::instrument(skip(state, payload))]
pub async fn update_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
    payload: Result<Json<NewsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, NewsError> {
    let item = NewsItem::from(read_payload(payload)?);

    let original = observe(
        "update",
        state
            .db
            .replace_news(&news_id, &item)
            .await
            .map_err(NewsError::Update)
            .and_then(|found| found.ok_or(NewsError::NotFound)),
    )?;

    tracing::info!(news_id = %news_id, "News updated");

    Ok(Json(NewsResponse::from(original)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_news(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
) -> Result<impl IntoResponse, NewsError> {
    observe(
        "delete",
        state
            .db
            .delete_news(&news_id)
            .await
            .map_err(NewsError::Delete)
            .and_then(|deleted| deleted.then_some(()).ok_or(NewsError::NotFound)),
    )?;

    tracing::info!(news_id = %news_id, "News deleted");

    Ok(Json(DeleteResponse {
        message: "News deleted successfully".to_string(),
    }))
}
