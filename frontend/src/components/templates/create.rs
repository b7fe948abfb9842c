//! Form for a new page template: name, description and a dynamic list of
//! field rows (name, data type, required flag).
//!
//! Names are checked for blanks before anything is sent; server-side
//! rejections (a duplicate name) are shown inline with the server's detail.

use crate::api;
use crate::app::Page;
use crate::components::helpers::{show_toast, ToastKind};
use crate::components::PageProps;
use common::model::template::{Template, DATA_TYPES};
use common::requests::{TemplateCreate, TemplateFieldCreate};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    SetName(String),
    SetDescription(String),
    AddField,
    RemoveField(usize),
    SetFieldName(usize, String),
    SetFieldType(usize, String),
    SetFieldRequired(usize, bool),
    Submit,
    Saved(Result<Template, String>),
}

pub struct TemplateCreateComponent {
    name: String,
    description: String,
    fields: Vec<TemplateFieldCreate>,
    error: Option<String>,
    saving: bool,
}

fn blank_field() -> TemplateFieldCreate {
    TemplateFieldCreate {
        name: String::new(),
        data_type: DATA_TYPES[0].to_string(),
        required: true,
    }
}

impl Component for TemplateCreateComponent {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            fields: vec![blank_field()],
            error: None,
            saving: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetName(name) => self.name = name,
            Msg::SetDescription(description) => self.description = description,
            Msg::AddField => self.fields.push(blank_field()),
            Msg::RemoveField(idx) => {
                if idx < self.fields.len() {
                    self.fields.remove(idx);
                }
            }
            Msg::SetFieldName(idx, name) => {
                if let Some(field) = self.fields.get_mut(idx) {
                    field.name = name;
                }
            }
            Msg::SetFieldType(idx, data_type) => {
                if let Some(field) = self.fields.get_mut(idx) {
                    field.data_type = data_type;
                }
            }
            Msg::SetFieldRequired(idx, required) => {
                if let Some(field) = self.fields.get_mut(idx) {
                    field.required = required;
                }
            }
            Msg::Submit => {
                if let Err(e) = self.check() {
                    self.error = Some(e.to_string());
                    return true;
                }
                self.error = None;
                self.saving = true;

                let payload = TemplateCreate {
                    name: self.name.trim().to_string(),
                    description: Some(self.description.trim().to_string())
                        .filter(|d| !d.is_empty()),
                    fields: self.fields.clone(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Saved(api::create_template(&payload).await));
                });
            }
            Msg::Saved(Ok(template)) => {
                show_toast(
                    &format!("Template \"{}\" created.", template.name),
                    ToastKind::Info,
                );
                ctx.props().on_navigate.emit(Page::Templates);
                return false;
            }
            Msg::Saved(Err(e)) => {
                self.saving = false;
                self.error = Some(format!("Failed to create template: {e}"));
                show_toast("Template was not saved.", ToastKind::Error);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_cancel = ctx.props().on_navigate.reform(|_: MouseEvent| Page::Templates);
        let on_submit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <section class="page narrow">
                <h1>{"Create New Page Template"}</h1>
                <form class="card" onsubmit={on_submit} novalidate={true}>
                    <label>
                        {"Template Name *"}
                        <input
                            type="text"
                            value={self.name.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                            })}
                        />
                    </label>
                    <label>
                        {"Description"}
                        <textarea
                            rows="3"
                            value={self.description.clone()}
                            oninput={link.callback(|e: InputEvent| {
                                Msg::SetDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                            })}
                        />
                    </label>

                    <h2>{"Fields"}</h2>
                    { for self.fields.iter().enumerate().map(|(idx, field)| field_row(link, idx, field)) }
                    <button type="button" class="outlined-btn" onclick={link.callback(|_| Msg::AddField)}>
                        {"+ Add Field"}
                    </button>

                    {
                        if let Some(error) = &self.error {
                            html! { <div class="alert error">{ error.clone() }</div> }
                        } else {
                            html! {}
                        }
                    }

                    <div class="form-actions">
                        <button type="button" class="outlined-btn" onclick={on_cancel}>{"Cancel"}</button>
                        <button type="submit" class="primary-btn" disabled={self.saving}>
                            {"Create Template"}
                        </button>
                    </div>
                </form>
            </section>
        }
    }
}

impl TemplateCreateComponent {
    fn check(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Template Name is required.");
        }
        if self.fields.iter().any(|f| f.name.trim().is_empty()) {
            return Err("All fields must have a name.");
        }
        Ok(())
    }
}

fn field_row(link: &Scope<TemplateCreateComponent>, idx: usize, field: &TemplateFieldCreate) -> Html {
    html! {
        <div class="field-row">
            <input
                type="text"
                placeholder="Field Name"
                value={field.name.clone()}
                oninput={link.callback(move |e: InputEvent| {
                    Msg::SetFieldName(idx, e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
            <select
                onchange={link.callback(move |e: Event| {
                    Msg::SetFieldType(idx, e.target_unchecked_into::<HtmlSelectElement>().value())
                })}
            >
                {
                    for DATA_TYPES.iter().map(|data_type| html! {
                        <option value={*data_type} selected={field.data_type == *data_type}>
                            { *data_type }
                        </option>
                    })
                }
            </select>
            <label class="inline">
                <input
                    type="checkbox"
                    checked={field.required}
                    onchange={link.callback(move |e: Event| {
                        Msg::SetFieldRequired(idx, e.target_unchecked_into::<HtmlInputElement>().checked())
                    })}
                />
                {"Required"}
            </label>
            <button
                type="button"
                class="icon-btn danger"
                title="Delete field"
                onclick={link.callback(move |_| Msg::RemoveField(idx))}
            >
                {"✕"}
            </button>
        </div>
    }
}
