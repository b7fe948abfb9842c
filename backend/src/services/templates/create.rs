//! # Template Creation Service
//!
//! Handles `POST /api/v1/templates/`. The template row and every field row are
//! written inside a single transaction, so a failure part way leaves nothing
//! behind.

use super::get::get_template_by_name;
use crate::db::Database;
use crate::error::AppError;
use actix_web::{web, HttpResponse};
use common::model::template::{Template, TemplateField};
use common::requests::TemplateCreate;
use log::info;
use rusqlite::{ffi, params, Connection};

const DUPLICATE_NAME: &str = "Template with this name already exists";

pub async fn process(
    db: web::Data<Database>,
    payload: web::Json<TemplateCreate>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let template = web::block(move || -> Result<Template, AppError> {
        let mut conn = db.connect()?;
        create_template(&mut conn, &payload)
    })
        .await??;

    info!(
        "Created template {} ({:?}) with {} fields",
        template.id,
        template.name,
        template.fields.len()
    );
    Ok(HttpResponse::Ok().json(template))
}

/// Inserts a template and its fields, returning the stored template with ids.
///
/// Fails with `AppError::Conflict` when the name is already in use, whether
/// that is seen by the pre-check or by the UNIQUE constraint at insert time.
pub fn create_template(conn: &mut Connection, payload: &TemplateCreate) -> Result<Template, AppError> {
    if get_template_by_name(conn, &payload.name)?.is_some() {
        return Err(AppError::conflict(DUPLICATE_NAME));
    }

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO page_templates (name, description) VALUES (?1, ?2)",
        params![payload.name, payload.description],
    )
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(DUPLICATE_NAME)
            } else {
                AppError::Database(e)
            }
        })?;
    let template_id = tx.last_insert_rowid();

    let mut fields = Vec::with_capacity(payload.fields.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO template_fields (name, data_type, required, template_id)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for field in &payload.fields {
            let id = stmt.insert(params![
                field.name,
                field.data_type,
                field.required,
                template_id
            ])?;
            fields.push(TemplateField {
                id,
                name: field.name.clone(),
                data_type: field.data_type.clone(),
                required: field.required,
            });
        }
    }
    tx.commit()?;

    Ok(Template {
        id: template_id,
        name: payload.name.clone(),
        description: payload.description.clone(),
        fields,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use crate::services::templates::get::get_template;
    use common::requests::TemplateFieldCreate;

    fn payload(name: &str, fields: &[(&str, &str)]) -> TemplateCreate {
        TemplateCreate {
            name: name.to_string(),
            description: None,
            fields: fields
                .iter()
                .map(|(name, data_type)| TemplateFieldCreate {
                    name: name.to_string(),
                    data_type: data_type.to_string(),
                    required: true,
                })
                .collect(),
        }
    }

    #[test]
    fn stored_template_matches_what_is_read_back() {
        let (_dir, db) = temp_database();
        let mut conn = db.connect().unwrap();

        let created = create_template(
            &mut conn,
            &payload("Article", &[("Headline", "Text"), ("Body", "Rich Text")]),
        )
        .unwrap();
        let read = get_template(&conn, created.id).unwrap().unwrap();

        assert_eq!(read, created);
        assert!(read.fields[1].is_rich_text());
    }

    #[test]
    fn duplicate_name_leaves_existing_template_untouched() {
        let (_dir, db) = temp_database();
        let mut conn = db.connect().unwrap();
        let first = create_template(&mut conn, &payload("Page", &[("Title", "Text")])).unwrap();

        let err = create_template(
            &mut conn,
            &payload("Page", &[("Other", "Text"), ("More", "Number")]),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let read = get_template(&conn, first.id).unwrap().unwrap();
        assert_eq!(read, first);
        let field_rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM template_fields", [], |row| row.get(0))
            .unwrap();
        assert_eq!(field_rows, 1);
    }

    #[test]
    fn unique_constraint_is_reported_as_conflict() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        conn.execute("INSERT INTO page_templates (name) VALUES ('Page')", [])
            .unwrap();
        let err = conn
            .execute("INSERT INTO page_templates (name) VALUES ('Page')", [])
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }
}
