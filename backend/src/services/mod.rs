//! HTTP services. Each sub-module exposes a `configure_routes()` scope that
//! `main.rs` mounts on the `App`.

pub mod content;
pub mod templates;

use actix_web::web::{get, resource};
use actix_web::{HttpResponse, Resource};
use serde_json::json;

/// `GET /api/v1/`: a welcome message, handy as a liveness probe.
pub fn configure_root() -> Resource {
    resource(vec!["/api/v1", "/api/v1/"]).route(get().to(root))
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Welcome to the Blog Management System API" }))
}

#[cfg(test)]
mod tests {
    use super::configure_root;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn root_greets() {
        let app = test::init_service(App::new().service(configure_root())).await;
        let req = test::TestRequest::get().uri("/api/v1/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["message"],
            "Welcome to the Blog Management System API"
        );
    }
}
