//! Two-step form for a new content item: pick a template, then fill one input
//! per template field.
//!
//! Inputs follow the field's data type: a checkbox for `Boolean`, a number
//! input for `Number`, a textarea for `Rich Text` and a text input otherwise.
//! Values are sent in the template's field order.

use crate::api;
use crate::app::Page;
use crate::components::helpers::{show_toast, ToastKind};
use crate::components::PageProps;
use common::model::content::ContentItem;
use common::model::template::{Template, TemplateField};
use common::requests::{ContentItemCreate, ContentValueCreate};
use serde_json::Value;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    TemplatesLoaded(Result<Vec<Template>, String>),
    SelectTemplate(String),
    TemplateLoaded(Result<Template, String>),
    SetTitle(String),
    SetValue(usize, Value),
    Back,
    Submit,
    Saved(Result<ContentItem, String>),
}

pub struct ContentCreateComponent {
    templates: Vec<Template>,
    selected: Option<Template>,
    title: String,
    /// One entry per field of `selected`, same order.
    values: Vec<Value>,
    loading: bool,
    error: Option<String>,
}

/// Starting value for a field's input.
fn initial_value(field: &TemplateField) -> Value {
    match field.data_type.as_str() {
        "Boolean" => Value::Bool(false),
        _ => Value::String(String::new()),
    }
}

/// Number inputs produce JSON numbers when they parse, text otherwise.
fn number_value(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    match raw.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::from(float),
        _ => Value::String(raw.to_string()),
    }
}

fn input_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Component for ContentCreateComponent {
    type Message = Msg;
    type Properties = PageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::TemplatesLoaded(api::fetch_templates().await));
        });

        Self {
            templates: Vec::new(),
            selected: None,
            title: String::new(),
            values: Vec::new(),
            loading: true,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::TemplatesLoaded(Ok(templates)) => {
                self.templates = templates;
                self.loading = false;
            }
            Msg::TemplatesLoaded(Err(e)) => {
                self.error = Some(format!(
                    "Failed to load templates. Is the backend running? ({e})"
                ));
                self.loading = false;
            }
            Msg::SelectTemplate(raw) => {
                let Ok(template_id) = raw.parse::<i64>() else {
                    return false;
                };
                self.loading = true;
                self.error = None;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::TemplateLoaded(api::fetch_template(template_id).await));
                });
            }
            Msg::TemplateLoaded(Ok(template)) => {
                self.values = template.fields.iter().map(initial_value).collect();
                self.selected = Some(template);
                self.loading = false;
            }
            Msg::TemplateLoaded(Err(e)) => {
                self.error = Some(format!("Failed to load template details: {e}"));
                self.loading = false;
            }
            Msg::SetTitle(title) => self.title = title,
            Msg::SetValue(idx, value) => {
                if let Some(slot) = self.values.get_mut(idx) {
                    *slot = value;
                }
            }
            Msg::Back => {
                self.selected = None;
                self.values.clear();
                self.error = None;
            }
            Msg::Submit => {
                let Some(template) = &self.selected else {
                    return false;
                };
                if self.title.trim().is_empty() {
                    self.error = Some("Content Title is required.".to_string());
                    return true;
                }

                let payload = ContentItemCreate {
                    title: self.title.trim().to_string(),
                    template_id: template.id,
                    values: template
                        .fields
                        .iter()
                        .zip(&self.values)
                        .map(|(field, value)| ContentValueCreate {
                            field_id: field.id,
                            value: value.clone(),
                        })
                        .collect(),
                };
                self.loading = true;
                self.error = None;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Saved(api::create_content_item(&payload).await));
                });
            }
            Msg::Saved(Ok(item)) => {
                show_toast(&format!("\"{}\" created.", item.title), ToastKind::Info);
                ctx.props().on_navigate.emit(Page::Content);
                return false;
            }
            Msg::Saved(Err(e)) => {
                self.loading = false;
                self.error = Some(format!("Failed to create content item: {e}"));
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_cancel = ctx.props().on_navigate.reform(|_: MouseEvent| Page::Content);

        html! {
            <section class="page narrow">
                <h1>{"Create New Content"}</h1>
                <ol class="steps">
                    <li class={classes!(self.selected.is_none().then_some("active"))}>{"Select Template"}</li>
                    <li class={classes!(self.selected.is_some().then_some("active"))}>{"Fill Content"}</li>
                </ol>
                {
                    if let Some(error) = &self.error {
                        html! { <div class="alert error">{ error.clone() }</div> }
                    } else {
                        html! {}
                    }
                }
                {
                    match &self.selected {
                        None => self.view_template_picker(link),
                        Some(template) => self.view_form(link, template),
                    }
                }
                <div class="form-actions">
                    <button type="button" class="outlined-btn" onclick={on_cancel}>{"Cancel"}</button>
                </div>
            </section>
        }
    }
}

impl ContentCreateComponent {
    fn view_template_picker(&self, link: &Scope<Self>) -> Html {
        if self.loading {
            return html! { <div class="spinner" /> };
        }

        html! {
            <div class="card">
                <label>
                    {"Template"}
                    <select
                        onchange={link.callback(|e: Event| {
                            Msg::SelectTemplate(e.target_unchecked_into::<HtmlSelectElement>().value())
                        })}
                    >
                        <option value="" selected={true} disabled={true}>{"Choose a template"}</option>
                        {
                            for self.templates.iter().map(|template| html! {
                                <option value={template.id.to_string()}>{ template.name.clone() }</option>
                            })
                        }
                    </select>
                </label>
            </div>
        }
    }

    fn view_form(&self, link: &Scope<Self>, template: &Template) -> Html {
        let on_submit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <form class="card" onsubmit={on_submit} novalidate={true}>
                <h2>{ format!("Template: {}", template.name) }</h2>
                <label>
                    {"Content Title *"}
                    <input
                        type="text"
                        value={self.title.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetTitle(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
                {
                    for template.fields.iter().zip(&self.values).enumerate().map(|(idx, (field, value))| {
                        field_input(link, idx, field, value)
                    })
                }
                <div class="form-actions">
                    <button type="button" class="outlined-btn" onclick={link.callback(|_| Msg::Back)}>
                        {"Back"}
                    </button>
                    <button type="submit" class="primary-btn" disabled={self.loading}>
                        {"Create Content"}
                    </button>
                </div>
            </form>
        }
    }
}

fn field_input(
    link: &Scope<ContentCreateComponent>,
    idx: usize,
    field: &TemplateField,
    value: &Value,
) -> Html {
    let label = if field.required {
        format!("{} *", field.name)
    } else {
        field.name.clone()
    };

    match field.data_type.as_str() {
        "Boolean" => html! {
            <label class="inline">
                <input
                    type="checkbox"
                    checked={value.as_bool().unwrap_or(false)}
                    onchange={link.callback(move |e: Event| {
                        Msg::SetValue(idx, Value::Bool(e.target_unchecked_into::<HtmlInputElement>().checked()))
                    })}
                />
                { label }
            </label>
        },
        "Rich Text" => html! {
            <label>
                { label }
                <textarea
                    rows="5"
                    value={input_text(value)}
                    oninput={link.callback(move |e: InputEvent| {
                        Msg::SetValue(idx, Value::String(e.target_unchecked_into::<HtmlTextAreaElement>().value()))
                    })}
                />
            </label>
        },
        "Number" => html! {
            <label>
                { label }
                <input
                    type="number"
                    value={input_text(value)}
                    oninput={link.callback(move |e: InputEvent| {
                        Msg::SetValue(idx, number_value(&e.target_unchecked_into::<HtmlInputElement>().value()))
                    })}
                />
            </label>
        },
        _ => html! {
            <label>
                { label }
                <input
                    type="text"
                    value={input_text(value)}
                    oninput={link.callback(move |e: InputEvent| {
                        Msg::SetValue(idx, Value::String(e.target_unchecked_into::<HtmlInputElement>().value()))
                    })}
                />
            </label>
        },
    }
}
