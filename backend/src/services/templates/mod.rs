//! # Template Service Module
//!
//! Routes for page templates under `/api/v1/templates`. Each sub-module holds
//! one Actix handler (`process`) next to the SQLite function it delegates to.
//!
//! ## Sub-modules:
//! - `create`: inserts a template and its fields in one transaction.
//! - `get`: loads a single template with its fields, by id or by name.
//! - `list`: paginated listing.

pub(crate) mod create;
pub(crate) mod get;
mod list;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/v1/templates";

/// Configures and returns the Actix `Scope` for all template routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**: `create::process`. Body is a `TemplateCreate`. Returns the
///     stored template with field ids, or `400` when the name is taken.
///
/// *   **`GET /`**: `list::process`. Accepts `?skip=&limit=`.
///
/// *   **`GET /{template_id}`**: `get::process`. `404` when absent.
///
/// The collection routes answer with and without the trailing slash.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/", post().to(create::process))
        .route("", get().to(list::process))
        .route("/", get().to(list::process))
        .route("/{template_id}", get().to(get::process))
}
