//! # Template Retrieval Service
//!
//! Backend logic for `GET /api/v1/templates/{template_id}`, plus the lookups the
//! rest of the crate reuses: by id (with fields) and by name (existence check
//! before creation).
//!
//! Fields are always returned in declaration order (`ORDER BY id`).

use crate::db::Database;
use crate::error::AppError;
use actix_web::{web, HttpResponse};
use common::model::template::{Template, TemplateField};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Actix web handler for the `GET /api/v1/templates/{template_id}` endpoint.
///
/// # Returns
/// - `200 OK` with the `Template` as JSON.
/// - `404 Not Found` when no template has that id.
pub async fn process(
    db: web::Data<Database>,
    template_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let template_id = template_id.into_inner();
    let template = web::block(move || -> Result<Option<Template>, AppError> {
        let conn = db.connect()?;
        get_template(&conn, template_id)
    })
        .await??
        .ok_or_else(|| AppError::not_found("Template not found"))?;

    Ok(HttpResponse::Ok().json(template))
}

/// Loads a template and its fields.
///
/// # Returns
/// - `Ok(Some(Template))` when the template exists.
/// - `Ok(None)` when it does not.
/// - `Err(AppError::Database)` on a storage failure.
pub fn get_template(conn: &Connection, template_id: i64) -> Result<Option<Template>, AppError> {
    debug!("Loading template {}", template_id);
    let template = conn
        .query_row(
            "SELECT id, name, description FROM page_templates WHERE id = ?1",
            params![template_id],
            template_from_row,
        )
        .optional()?;

    match template {
        Some(mut template) => {
            template.fields = load_fields(conn, template.id)?;
            Ok(Some(template))
        }
        None => Ok(None),
    }
}

/// Looks a template up by its unique name. Fields are not loaded.
pub fn get_template_by_name(conn: &Connection, name: &str) -> Result<Option<Template>, AppError> {
    let template = conn
        .query_row(
            "SELECT id, name, description FROM page_templates WHERE name = ?1",
            params![name],
            template_from_row,
        )
        .optional()?;
    Ok(template)
}

/// Fields of one template in declaration order.
pub(crate) fn load_fields(
    conn: &Connection,
    template_id: i64,
) -> rusqlite::Result<Vec<TemplateField>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, data_type, required FROM template_fields
         WHERE template_id = ?1 ORDER BY id",
    )?;
    let fields = stmt
        .query_map(params![template_id], field_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(fields)
}

pub(crate) fn template_from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    Ok(Template {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        fields: Vec::new(),
    })
}

/// Maps `id, name, data_type, required` starting at column `0`.
pub(crate) fn field_from_row(row: &Row<'_>) -> rusqlite::Result<TemplateField> {
    field_from_row_at(row, 0)
}

pub(crate) fn field_from_row_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<TemplateField> {
    Ok(TemplateField {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        data_type: row.get(offset + 2)?,
        required: row.get(offset + 3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;

    #[test]
    fn missing_template_is_none() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        assert!(get_template(&conn, 7).unwrap().is_none());
        assert!(get_template_by_name(&conn, "Nope").unwrap().is_none());
    }

    #[test]
    fn lookup_by_name_finds_the_row() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        conn.execute(
            "INSERT INTO page_templates (name, description) VALUES ('Landing', NULL)",
            [],
        )
        .unwrap();

        let found = get_template_by_name(&conn, "Landing").unwrap().unwrap();
        assert_eq!(found.name, "Landing");
        assert_eq!(found.description, None);
        assert!(found.fields.is_empty());
    }
}
