//! # Content Service Module
//!
//! Routes for content items under `/api/v1/content`.
//!
//! ## Sub-modules:
//! - `create`: validates values against the template and stores the item.
//! - `front_matter`: YAML writer that keeps strings as strings for YAML 1.1 readers.
//! - `get`: single item with its values.
//! - `list`: paginated listing.
//! - `markdown`: loads an item with value fields and renders it as Markdown.

mod create;
mod front_matter;
mod get;
mod list;
mod markdown;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/v1/content";

/// Configures and returns the Actix `Scope` for content routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: `create::process`. `404` for an unknown template, `400`
///     when the values do not line up with the template's fields.
/// *   **`GET /`**: `list::process`, with `?skip=&limit=`.
/// *   **`GET /{item_id}`**: `get::process`.
/// *   **`GET /{item_id}/markdown`**: `markdown::process`, `text/plain`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/", post().to(create::process))
        .route("", get().to(list::process))
        .route("/", get().to(list::process))
        .route("/{item_id}", get().to(get::process))
        .route("/{item_id}/markdown", get().to(markdown::process))
}

#[cfg(test)]
mod tests {
    use super::configure_routes;
    use crate::db::test_support::temp_database;
    use crate::services::templates;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::content::ContentItem;
    use common::model::error::ErrorDetail;
    use common::model::template::Template;
    use serde_json::json;
    use std::collections::HashMap;

    const BODY: &str = "The new blog management system is now **live**.";

    macro_rules! app {
        ($db:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($db))
                    .service(templates::configure_routes())
                    .service(configure_routes()),
            )
            .await
        };
    }

    fn article_template() -> serde_json::Value {
        json!({
            "name": "Article",
            "description": "A template for news articles.",
            "fields": [
                {"name": "Headline", "data_type": "Text", "required": true},
                {"name": "Body", "data_type": "Rich Text", "required": true},
                {"name": "Author", "data_type": "Text", "required": true},
                {"name": "Is Published", "data_type": "Boolean", "required": true}
            ]
        })
    }

    #[actix_web::test]
    async fn create_content_and_export_markdown() {
        let (_dir, db) = temp_database();
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/v1/templates/")
            .set_json(article_template())
            .to_request();
        let template: Template = test::call_and_read_body_json(&app, req).await;
        let field_ids: HashMap<&str, i64> = template
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.id))
            .collect();

        let req = test::TestRequest::post()
            .uri("/api/v1/content/")
            .set_json(json!({
                "title": "Big News!",
                "template_id": template.id,
                "values": [
                    {"field_id": field_ids["Headline"], "value": "New System is Live"},
                    {"field_id": field_ids["Body"], "value": BODY},
                    {"field_id": field_ids["Author"], "value": "Jules"},
                    {"field_id": field_ids["Is Published"], "value": false}
                ]
            }))
            .to_request();
        let item: ContentItem = test::call_and_read_body_json(&app, req).await;
        assert_eq!(item.title, "Big News!");
        assert_eq!(item.values.len(), 4);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/content/{}/markdown", item.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let markdown = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(markdown.starts_with("---\n"));
        assert!(markdown.ends_with(&format!("---\n\n{BODY}")));

        let front = markdown.split("---").nth(1).unwrap();
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(front).unwrap();
        assert_eq!(parsed.get("title").and_then(|v| v.as_str()), Some("Big News!"));
        assert!(parsed.contains_key("date"));
        assert_eq!(
            parsed.get("template_id").and_then(|v| v.as_i64()),
            Some(template.id)
        );
        assert_eq!(
            parsed.get("Headline").and_then(|v| v.as_str()),
            Some("New System is Live")
        );
        assert_eq!(parsed.get("Author").and_then(|v| v.as_str()), Some("Jules"));
        assert_eq!(
            parsed.get("Is Published").and_then(|v| v.as_bool()),
            Some(false)
        );
    }

    #[actix_web::test]
    async fn get_returns_item_with_values() {
        let (_dir, db) = temp_database();
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/v1/templates")
            .set_json(json!({"name": "Note", "fields": [{"name": "Text", "data_type": "Text"}]}))
            .to_request();
        let template: Template = test::call_and_read_body_json(&app, req).await;
        assert!(template.fields[0].required);

        let req = test::TestRequest::post()
            .uri("/api/v1/content")
            .set_json(json!({
                "title": "Reminder",
                "template_id": template.id,
                "values": [{"field_id": template.fields[0].id, "value": "buy milk"}]
            }))
            .to_request();
        let created: ContentItem = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/content/{}", created.id))
            .to_request();
        let read: ContentItem = test::call_and_read_body_json(&app, req).await;
        assert_eq!(read, created);

        let req = test::TestRequest::get().uri("/api/v1/content/").to_request();
        let all: Vec<ContentItem> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all, vec![created]);
    }

    #[actix_web::test]
    async fn unknown_template_is_not_found() {
        let (_dir, db) = temp_database();
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/v1/content/")
            .set_json(json!({"title": "Nope", "template_id": 404, "values": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let err: ErrorDetail = test::read_body_json(resp).await;
        assert_eq!(err.detail, "Template with id 404 not found");
    }

    #[actix_web::test]
    async fn value_count_mismatch_is_a_bad_request() {
        let (_dir, db) = temp_database();
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/v1/templates/")
            .set_json(article_template())
            .to_request();
        let template: Template = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/content/")
            .set_json(json!({
                "title": "Too short",
                "template_id": template.id,
                "values": [{"field_id": template.fields[0].id, "value": "only one"}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: ErrorDetail = test::read_body_json(resp).await;
        assert_eq!(
            err.detail,
            "Number of values does not match number of template fields"
        );

        let req = test::TestRequest::get().uri("/api/v1/content/").to_request();
        let all: Vec<ContentItem> = test::call_and_read_body_json(&app, req).await;
        assert!(all.is_empty());
    }

    #[actix_web::test]
    async fn missing_items_are_not_found() {
        let (_dir, db) = temp_database();
        let app = app!(db);

        for uri in ["/api/v1/content/5", "/api/v1/content/5/markdown"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            let err: ErrorDetail = test::read_body_json(resp).await;
            assert_eq!(err.detail, "Content item not found");
        }
    }
}
