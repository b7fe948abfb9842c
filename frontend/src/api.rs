//! Thin client for the `/api/v1` endpoints.
//!
//! Every call resolves to `Result<_, String>`. On a non-2xx response the error
//! is the server's `detail` message when the body carries one.

use common::model::content::ContentItem;
use common::model::error::ErrorDetail;
use common::model::template::Template;
use common::requests::{ContentItemCreate, TemplateCreate};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

const API_BASE: &str = "/api/v1";

pub async fn fetch_templates() -> Result<Vec<Template>, String> {
    let resp = Request::get(&format!("{API_BASE}/templates/"))
        .send()
        .await
        .map_err(network_error)?;
    read_json(resp).await
}

pub async fn fetch_template(template_id: i64) -> Result<Template, String> {
    let resp = Request::get(&format!("{API_BASE}/templates/{template_id}"))
        .send()
        .await
        .map_err(network_error)?;
    read_json(resp).await
}

pub async fn create_template(payload: &TemplateCreate) -> Result<Template, String> {
    let resp = Request::post(&format!("{API_BASE}/templates/"))
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(network_error)?;
    read_json(resp).await
}

pub async fn fetch_content_items() -> Result<Vec<ContentItem>, String> {
    let resp = Request::get(&format!("{API_BASE}/content/"))
        .send()
        .await
        .map_err(network_error)?;
    read_json(resp).await
}

pub async fn create_content_item(payload: &ContentItemCreate) -> Result<ContentItem, String> {
    let resp = Request::post(&format!("{API_BASE}/content/"))
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(network_error)?;
    read_json(resp).await
}

pub async fn fetch_markdown(item_id: i64) -> Result<String, String> {
    let resp = Request::get(&format!("{API_BASE}/content/{item_id}/markdown"))
        .send()
        .await
        .map_err(network_error)?;
    if resp.ok() {
        resp.text().await.map_err(|e| e.to_string())
    } else {
        Err(error_detail(&resp).await)
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    if resp.ok() {
        resp.json::<T>().await.map_err(|e| e.to_string())
    } else {
        Err(error_detail(&resp).await)
    }
}

async fn error_detail(resp: &Response) -> String {
    match resp.json::<ErrorDetail>().await {
        Ok(err) => err.detail,
        Err(_) => format!("Request failed with status {}", resp.status()),
    }
}

fn network_error(err: gloo_net::Error) -> String {
    let message = format!("Could not reach the server: {err}");
    gloo_console::error!(message.clone());
    message
}
