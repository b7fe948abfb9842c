//! # Content Item Retrieval Service
//!
//! Handles `GET /api/v1/content/{item_id}`. Values are loaded eagerly with the
//! item, in the order they were stored.

use crate::db::Database;
use crate::error::AppError;
use actix_web::{web, HttpResponse};
use common::model::content::{ContentItem, ContentValue};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub async fn process(
    db: web::Data<Database>,
    item_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let item_id = item_id.into_inner();
    let item = web::block(move || -> Result<Option<ContentItem>, AppError> {
        let conn = db.connect()?;
        get_content_item(&conn, item_id)
    })
        .await??
        .ok_or_else(|| AppError::not_found("Content item not found"))?;

    Ok(HttpResponse::Ok().json(item))
}

/// Loads a content item with its values, or `None` if the id is unknown.
pub fn get_content_item(conn: &Connection, item_id: i64) -> Result<Option<ContentItem>, AppError> {
    let item = conn
        .query_row(
            "SELECT id, title, template_id, created_at FROM content_items WHERE id = ?1",
            params![item_id],
            item_from_row,
        )
        .optional()?;

    match item {
        Some(mut item) => {
            item.values = load_values(conn, item.id)?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

pub(crate) fn load_values(conn: &Connection, item_id: i64) -> rusqlite::Result<Vec<ContentValue>> {
    let mut stmt = conn.prepare(
        "SELECT id, field_id, value FROM content_values WHERE item_id = ?1 ORDER BY id",
    )?;
    let values = stmt
        .query_map(params![item_id], value_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(values)
}

/// Maps `id, title, template_id, created_at`.
pub(crate) fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ContentItem> {
    Ok(ContentItem {
        id: row.get(0)?,
        title: row.get(1)?,
        template_id: row.get(2)?,
        created_at: row.get(3)?,
        values: Vec::new(),
    })
}

/// Maps `id, field_id, value`.
pub(crate) fn value_from_row(row: &Row<'_>) -> rusqlite::Result<ContentValue> {
    Ok(ContentValue {
        id: row.get(0)?,
        field_id: row.get(1)?,
        value: json_column(row, 2)?,
    })
}

/// Decodes a JSON text column. SQL `NULL` reads as JSON `null`.
pub(crate) fn json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<serde_json::Value> {
    match row.get::<_, Option<String>>(idx)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(serde_json::Value::Null),
    }
}
