//! # Content Item Creation Service
//!
//! Handles `POST /api/v1/content/`.
//!
//! ## Checks, in order:
//! 1. The referenced template exists (`404` otherwise).
//! 2. One value is supplied per template field (`400` otherwise).
//! 3. Every `field_id` names a field of that template (`400` otherwise).
//!
//! Required flags are not checked: a required field can still be covered by a
//! `null` payload, or skipped when another field's id is repeated.
//!
//! The item row and its value rows are written in one transaction.

use crate::db::Database;
use crate::error::AppError;
use crate::services::templates::get::get_template;
use actix_web::{web, HttpResponse};
use chrono::{SubsecRound, Utc};
use common::model::content::{ContentItem, ContentValue};
use common::model::template::Template;
use common::requests::ContentItemCreate;
use log::info;
use rusqlite::{params, Connection};

pub async fn process(
    db: web::Data<Database>,
    payload: web::Json<ContentItemCreate>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let item = web::block(move || -> Result<ContentItem, AppError> {
        let mut conn = db.connect()?;
        create_content_item(&mut conn, &payload)
    })
        .await??;

    info!(
        "Created content item {} ({:?}) from template {}",
        item.id, item.title, item.template_id
    );
    Ok(HttpResponse::Ok().json(item))
}

/// Validates the payload against its template and stores the item with its values.
pub fn create_content_item(
    conn: &mut Connection,
    payload: &ContentItemCreate,
) -> Result<ContentItem, AppError> {
    let template = get_template(conn, payload.template_id)?.ok_or_else(|| {
        AppError::not_found(format!(
            "Template with id {} not found",
            payload.template_id
        ))
    })?;
    validate_values(&template, payload)?;

    // Microsecond precision, matching the front-matter `date` format.
    let created_at = Utc::now().naive_utc().trunc_subsecs(6);
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO content_items (title, created_at, template_id) VALUES (?1, ?2, ?3)",
        params![payload.title, created_at, payload.template_id],
    )?;
    let item_id = tx.last_insert_rowid();

    let mut values = Vec::with_capacity(payload.values.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO content_values (item_id, field_id, value) VALUES (?1, ?2, ?3)",
        )?;
        for value in &payload.values {
            let raw = serde_json::to_string(&value.value)?;
            let id = stmt.insert(params![item_id, value.field_id, raw])?;
            values.push(ContentValue {
                id,
                field_id: value.field_id,
                value: value.value.clone(),
            });
        }
    }
    tx.commit()?;

    Ok(ContentItem {
        id: item_id,
        title: payload.title.clone(),
        template_id: payload.template_id,
        created_at,
        values,
    })
}

fn validate_values(template: &Template, payload: &ContentItemCreate) -> Result<(), AppError> {
    if payload.values.len() != template.fields.len() {
        return Err(AppError::validation(
            "Number of values does not match number of template fields",
        ));
    }

    if let Some(stray) = payload
        .values
        .iter()
        .find(|value| !template.fields.iter().any(|field| field.id == value.field_id))
    {
        return Err(AppError::validation(format!(
            "Field {} does not belong to template {}",
            stray.field_id, template.id
        )));
    }

    Ok(())
}
