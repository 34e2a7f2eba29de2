use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Fixed cross-origin headers stamped onto every response.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsHeaders {
    pub fn new(origin: &str, methods: &[Method], headers: &[&str]) -> Result<Self, AppError> {
        let methods = methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let headers = headers.join(", ");

        Ok(Self {
            allow_origin: header_value("origin", origin)?,
            allow_methods: header_value("methods", &methods)?,
            allow_headers: header_value("headers", &headers)?,
        })
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.allow_headers.clone(),
        );
    }
}

fn header_value(kind: &str, value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid CORS allowed {} '{}': {}",
            kind,
            value,
            e
        ))
    })
}

/// Preflight requests are answered here and never reach the router.
pub async fn cors_headers_middleware(
    State(cors): State<CorsHeaders>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    cors.apply(response.headers_mut());
    response
}
