use super::get::{load_fields, template_from_row};
use crate::db::Database;
use crate::error::AppError;
use actix_web::{web, HttpResponse};
use common::model::template::Template;
use common::requests::Pagination;
use log::debug;
use rusqlite::{params, Connection};

/// Actix web handler for `GET /api/v1/templates/?skip=&limit=`.
pub async fn process(
    db: web::Data<Database>,
    page: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let page = page.into_inner();
    let templates = web::block(move || -> Result<Vec<Template>, AppError> {
        let conn = db.connect()?;
        list_templates(&conn, page)
    })
        .await??;

    Ok(HttpResponse::Ok().json(templates))
}

/// Templates ordered by id, each with its fields.
pub fn list_templates(conn: &Connection, page: Pagination) -> Result<Vec<Template>, AppError> {
    debug!("Listing templates skip={} limit={}", page.skip, page.limit);
    let mut stmt = conn.prepare(
        "SELECT id, name, description FROM page_templates ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let mut templates = stmt
        .query_map(params![page.limit, page.skip], template_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for template in &mut templates {
        template.fields = load_fields(conn, template.id)?;
    }
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;

    #[test]
    fn empty_store_lists_nothing() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        assert!(list_templates(&conn, Pagination::default()).unwrap().is_empty());
    }

    #[test]
    fn listed_templates_carry_their_fields() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        conn.execute("INSERT INTO page_templates (name) VALUES ('Post')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO template_fields (name, data_type, template_id) VALUES ('Body', 'Rich Text', 1)",
            [],
        )
        .unwrap();

        let templates = list_templates(&conn, Pagination::default()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].fields.len(), 1);
        assert!(templates[0].fields[0].required);
    }
}
