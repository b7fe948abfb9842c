//! # Markdown Export Service
//!
//! Handles `GET /api/v1/content/{item_id}/markdown` and owns the formatting rule:
//!
//! ```text
//! ---
//! title: <item title>
//! date: <created_at, ISO-8601>
//! template_id: <id>
//! <field name>: <value>      one line per non "Rich Text" value, in value order
//! ---
//!
//! <Rich Text value>
//! ```
//!
//! With no "Rich Text" value the body is empty. With several, the last one in
//! value order wins. A field named like one of the fixed keys overwrites that
//! key in place.

use super::front_matter;
use super::get::json_column;
use crate::db::Database;
use crate::error::AppError;
use crate::services::templates::get::field_from_row_at;
use actix_web::{web, HttpResponse};
use chrono::{NaiveDateTime, Timelike};
use common::model::template::TemplateField;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// A content item with each value joined to the field it fills.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItemForMarkdown {
    pub id: i64,
    pub title: String,
    pub template_id: i64,
    pub created_at: NaiveDateTime,
    pub values: Vec<ValueWithField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueWithField {
    pub field: TemplateField,
    pub value: serde_json::Value,
}

pub async fn process(
    db: web::Data<Database>,
    item_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let item_id = item_id.into_inner();
    let item = web::block(move || -> Result<Option<ContentItemForMarkdown>, AppError> {
        let conn = db.connect()?;
        get_content_item_for_markdown(&conn, item_id)
    })
        .await??
        .ok_or_else(|| AppError::not_found("Content item not found"))?;

    let markdown = generate_markdown(&item)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(markdown))
}

/// Loads an item with its values and each value's field, in value order.
pub fn get_content_item_for_markdown(
    conn: &Connection,
    item_id: i64,
) -> Result<Option<ContentItemForMarkdown>, AppError> {
    let item = conn
        .query_row(
            "SELECT id, title, template_id, created_at FROM content_items WHERE id = ?1",
            params![item_id],
            |row| {
                Ok(ContentItemForMarkdown {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    template_id: row.get(2)?,
                    created_at: row.get(3)?,
                    values: Vec::new(),
                })
            },
        )
        .optional()?;

    let Some(mut item) = item else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT v.value, f.id, f.name, f.data_type, f.required
         FROM content_values v
         JOIN template_fields f ON f.id = v.field_id
         WHERE v.item_id = ?1
         ORDER BY v.id",
    )?;
    item.values = stmt
        .query_map(params![item.id], |row| {
            Ok(ValueWithField {
                value: json_column(row, 0)?,
                field: field_from_row_at(row, 1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!("Loaded {} values for markdown of item {}", item.values.len(), item.id);
    Ok(Some(item))
}

/// Renders the item as YAML front matter followed by the Rich Text body.
pub fn generate_markdown(item: &ContentItemForMarkdown) -> Result<String, serde_yaml::Error> {
    let mut entries: Vec<(String, Value)> = Vec::with_capacity(item.values.len() + 3);
    set_entry(&mut entries, "title", Value::from(item.title.as_str()));
    set_entry(&mut entries, "date", Value::from(iso_timestamp(&item.created_at)));
    set_entry(&mut entries, "template_id", Value::from(item.template_id));

    let mut body = String::new();
    for entry in &item.values {
        if entry.field.is_rich_text() {
            body = body_text(&entry.value);
        } else {
            set_entry(&mut entries, &entry.field.name, entry.value.clone());
        }
    }

    let yaml = front_matter::render(&entries)?;
    Ok(format!("---\n{yaml}---\n\n{body}"))
}

/// Replaces an existing key in place, otherwise appends.
fn set_entry(entries: &mut Vec<(String, Value)>, key: &str, value: Value) {
    match entries.iter_mut().find(|(existing, _)| existing == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key.to_string(), value)),
    }
}

/// ISO-8601 without offset. The fraction is omitted when it is zero.
fn iso_timestamp(timestamp: &NaiveDateTime) -> String {
    if timestamp.nanosecond() == 0 {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Strings are used verbatim, `null` is empty, anything else is its JSON text.
fn body_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
