use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use std::any::Any;
use thiserror::Error;

/// Route-facing failures. Everything except `NotFound` collapses into a 500
/// with a fixed plain-text message; the underlying cause is only logged.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("News not found")]
    NotFound,

    #[error("Error fetching news")]
    Fetch(#[source] AppError),

    #[error("Error adding news")]
    Add(#[source] AppError),

    #[error("Error updating news")]
    Update(#[source] AppError),

    #[error("Error deleting news")]
    Delete(#[source] AppError),

    #[error("Internal Server Error")]
    Internal(#[source] anyhow::Error),
}

impl NewsError {
    pub fn status(&self) -> StatusCode {
        match self {
            NewsError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let cause = std::error::Error::source(&self)
                .map(|e| e.to_string())
                .unwrap_or_default();
            tracing::error!(error = %cause, "{}", self);
        }

        (status, self.to_string()).into_response()
    }
}

/// Last-resort responder for panics escaping a handler.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    NewsError::Internal(anyhow::anyhow!("handler panicked: {}", details)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_plain_404() {
        let response = NewsError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(response).await, "News not found");
    }

    #[tokio::test]
    async fn store_failures_hide_the_cause() {
        let cases = [
            (
                NewsError::Fetch(AppError::DatabaseError(anyhow::anyhow!("conn refused"))),
                "Error fetching news",
            ),
            (
                NewsError::Add(AppError::DatabaseError(anyhow::anyhow!("conn refused"))),
                "Error adding news",
            ),
            (
                NewsError::Update(AppError::DatabaseError(anyhow::anyhow!("bad id"))),
                "Error updating news",
            ),
            (
                NewsError::Delete(AppError::DatabaseError(anyhow::anyhow!("bad id"))),
                "Error deleting news",
            ),
        ];

        for (err, message) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_text(response).await, message);
        }
    }

    async fn explode() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn panics_become_internal_server_error() {
        let app = Router::new()
            .route("/panic", get(explode))
            .layer(CatchPanicLayer::custom(panic_response));

        let response = app
            .oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Internal Server Error");
    }
}
