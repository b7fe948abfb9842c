//! Error taxonomy for the HTTP API.
//!
//! Every handler returns `Result<_, AppError>`. Actix turns the error into a
//! JSON `{"detail": ...}` response through the `ResponseError` impl below, so
//! each request fails on its own and nothing is retried.

use actix_web::error::{BlockingError, InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use common::model::error::ErrorDetail;
use log::{error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A referenced template or content item does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request collides with existing data (duplicate template name).
    #[error("{0}")]
    Conflict(String),

    /// The request is well-formed JSON but breaks a content rule.
    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front matter serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("blocking pool unavailable")]
    Blocking(#[from] BlockingError),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        HttpResponse::build(status).json(ErrorDetail::new(self.to_string()))
    }
}

/// Extractor settings so rejected bodies, queries and paths answer with
/// `{"detail": ...}` like every other error.
pub fn configure_extractors(json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(json_limit)
                .error_handler(|err: JsonPayloadError, _req: &HttpRequest| detail_error(err)),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err: QueryPayloadError, _req: &HttpRequest| detail_error(err)),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|err: PathError, _req: &HttpRequest| detail_error(err)),
        );
    }
}

/// Keeps the extractor's status code and swaps its body for an `ErrorDetail`.
fn detail_error<E>(err: E) -> actix_web::Error
where
    E: ResponseError + 'static,
{
    let status = err.status_code();
    warn!("Request rejected ({}): {}", status.as_u16(), err);
    let response = HttpResponse::build(status).json(ErrorDetail::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_status() {
        assert_eq!(
            AppError::not_found("Template not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("Template with this name already exists").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::validation("count mismatch").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = AppError::from(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn detail_is_the_plain_message() {
        let err = AppError::not_found("Content item not found");
        assert_eq!(err.to_string(), "Content item not found");
    }

    #[actix_web::test]
    async fn extractor_rejections_carry_a_detail_body() {
        use actix_web::http::header::ContentType;
        use actix_web::{test, App};
        use common::requests::{Pagination, TemplateCreate};

        async fn create(_: web::Json<TemplateCreate>) -> HttpResponse {
            HttpResponse::Ok().finish()
        }
        async fn list(_: web::Query<Pagination>) -> HttpResponse {
            HttpResponse::Ok().finish()
        }
        async fn one(_: web::Path<i64>) -> HttpResponse {
            HttpResponse::Ok().finish()
        }

        let app = test::init_service(
            App::new()
                .configure(configure_extractors(1024))
                .route("/items", web::post().to(create))
                .route("/items", web::get().to(list))
                .route("/items/{id}", web::get().to(one)),
        )
        .await;

        let requests = [
            test::TestRequest::post()
                .uri("/items")
                .insert_header(ContentType::json())
                .set_payload("{not json")
                .to_request(),
            test::TestRequest::get().uri("/items?skip=-1").to_request(),
            test::TestRequest::get().uri("/items/abc").to_request(),
        ];
        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_client_error(), "{}", resp.status());
            let body: ErrorDetail = test::read_body_json(resp).await;
            assert!(!body.detail.is_empty());
        }
    }

    #[actix_web::test]
    async fn oversized_bodies_keep_their_status() {
        use actix_web::http::header::ContentType;
        use actix_web::{test, App};

        async fn echo(body: web::Json<serde_json::Value>) -> HttpResponse {
            HttpResponse::Ok().json(body.into_inner())
        }

        let app = test::init_service(
            App::new()
                .configure(configure_extractors(16))
                .route("/echo", web::post().to(echo)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(ContentType::json())
            .set_payload(r#"{"text": "far more than sixteen bytes"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: ErrorDetail = test::read_body_json(resp).await;
        assert!(!body.detail.is_empty());
    }
}
