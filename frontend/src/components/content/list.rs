//! Content items table with a Markdown viewer.
//!
//! The "Markdown" action fetches `/content/{id}/markdown` and opens it in a
//! top sheet: the raw document on the left, the body rendered with
//! `pulldown_cmark` on the right, with raw HTML shown as text.

use crate::api;
use crate::app::Page;
use crate::components::helpers::{
    format_count, format_timestamp, render_markdown, show_toast, split_markdown, ToastKind,
};
use crate::components::PageProps;
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};
use common::model::content::ContentItem;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Loaded(Result<Vec<ContentItem>, String>),
    ShowMarkdown(i64),
    MarkdownLoaded(i64, Result<String, String>),
    CloseMarkdown,
}

struct MarkdownView {
    item_id: i64,
    document: String,
}

pub struct ContentListComponent {
    items: Vec<ContentItem>,
    loading: bool,
    error: Option<String>,
    markdown: Option<MarkdownView>,
    sheet_ref: NodeRef,
}

impl Component for ContentListComponent {
    type Message = Msg;
    type Properties = PageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_content_items().await));
        });

        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            markdown: None,
            sheet_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(items)) => {
                self.items = items;
                self.error = None;
                self.loading = false;
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(format!(
                    "Failed to fetch content items. Is the backend server running? ({e})"
                ));
                self.loading = false;
            }
            Msg::ShowMarkdown(item_id) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::fetch_markdown(item_id).await;
                    link.send_message(Msg::MarkdownLoaded(item_id, result));
                });
                return false;
            }
            Msg::MarkdownLoaded(item_id, Ok(document)) => {
                self.markdown = Some(MarkdownView { item_id, document });
                open_top_sheet(self.sheet_ref.clone());
            }
            Msg::MarkdownLoaded(_, Err(e)) => {
                show_toast(&format!("Could not load Markdown: {e}"), ToastKind::Error);
                return false;
            }
            Msg::CloseMarkdown => {
                close_top_sheet(self.sheet_ref.clone());
                self.markdown = None;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_new = ctx.props().on_navigate.reform(|_: MouseEvent| Page::NewContent);

        html! {
            <section class="page">
                <div class="page-header">
                    <h1>{"Content Items"}</h1>
                    <button class="primary-btn" onclick={on_new}>{"Create New Content"}</button>
                </div>
                { self.view_body(ctx) }
                <YwMaterialTopSheet node_ref={self.sheet_ref.clone()}>
                    { self.view_markdown(ctx) }
                </YwMaterialTopSheet>
            </section>
        }
    }
}

impl ContentListComponent {
    fn view_body(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <div class="spinner" /> };
        }
        if let Some(error) = &self.error {
            return html! { <div class="alert error">{ error.clone() }</div> };
        }

        let link = ctx.link();
        html! {
            <>
                <p class="muted">{ format!("{} content items", format_count(self.items.len())) }</p>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Title"}</th>
                            <th>{"Template ID"}</th>
                            <th>{"Created At"}</th>
                            <th />
                        </tr>
                    </thead>
                    <tbody>
                        {
                            if self.items.is_empty() {
                                html! { <tr><td colspan="4">{"No content items found."}</td></tr> }
                            } else {
                                self.items.iter().map(|item| {
                                    let item_id = item.id;
                                    html! {
                                        <tr key={item.id}>
                                            <td>{ item.title.clone() }</td>
                                            <td>{ item.template_id }</td>
                                            <td>{ format_timestamp(&item.created_at) }</td>
                                            <td>
                                                <button
                                                    class="outlined-btn"
                                                    onclick={link.callback(move |_| Msg::ShowMarkdown(item_id))}
                                                >
                                                    {"Markdown"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect::<Html>()
                            }
                        }
                    </tbody>
                </table>
            </>
        }
    }

    fn view_markdown(&self, ctx: &Context<Self>) -> Html {
        let Some(view) = &self.markdown else {
            return html! {};
        };

        let (_, body) = split_markdown(&view.document);
        let rendered = render_markdown(body);

        html! {
            <div class="markdown-sheet">
                <div class="sheet-header">
                    <h2>{ format!("Content item #{}", view.item_id) }</h2>
                    <button class="icon-btn" onclick={ctx.link().callback(|_| Msg::CloseMarkdown)}>
                        {"✕"}
                    </button>
                </div>
                <div class="sheet-columns">
                    <pre class="markdown-source">{ view.document.clone() }</pre>
                    <div class="markdown-preview">
                        { Html::from_html_unchecked(AttrValue::from(rendered)) }
                    </div>
                </div>
            </div>
        }
    }
}
