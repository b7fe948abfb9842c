use super::get::{item_from_row, load_values};
use crate::db::Database;
use crate::error::AppError;
use actix_web::{web, HttpResponse};
use common::model::content::ContentItem;
use common::requests::Pagination;
use log::debug;
use rusqlite::{params, Connection};

/// Actix web handler for `GET /api/v1/content/?skip=&limit=`.
pub async fn process(
    db: web::Data<Database>,
    page: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let page = page.into_inner();
    let items = web::block(move || -> Result<Vec<ContentItem>, AppError> {
        let conn = db.connect()?;
        list_content_items(&conn, page)
    })
        .await??;

    Ok(HttpResponse::Ok().json(items))
}

/// Content items ordered by id, each with its values.
pub fn list_content_items(conn: &Connection, page: Pagination) -> Result<Vec<ContentItem>, AppError> {
    debug!("Listing content items skip={} limit={}", page.skip, page.limit);
    let mut stmt = conn.prepare(
        "SELECT id, title, template_id, created_at FROM content_items
         ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let mut items = stmt
        .query_map(params![page.limit, page.skip], item_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for item in &mut items {
        item.values = load_values(conn, item.id)?;
    }
    Ok(items)
}
