use crate::api;
use crate::app::Page;
use crate::components::helpers::format_count;
use crate::components::PageProps;
use common::model::template::Template;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Loaded(Result<Vec<Template>, String>),
}

/// Table of every page template with its field count.
pub struct TemplateListComponent {
    templates: Vec<Template>,
    loading: bool,
    error: Option<String>,
}

impl Component for TemplateListComponent {
    type Message = Msg;
    type Properties = PageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::fetch_templates().await));
        });

        Self {
            templates: Vec::new(),
            loading: true,
            error: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(templates)) => {
                self.templates = templates;
                self.error = None;
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(format!(
                    "Failed to fetch templates. Is the backend server running? ({e})"
                ));
            }
        }
        self.loading = false;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_new = ctx.props().on_navigate.reform(|_: MouseEvent| Page::NewTemplate);

        html! {
            <section class="page">
                <div class="page-header">
                    <h1>{"Page Templates"}</h1>
                    <button class="primary-btn" onclick={on_new}>{"Create New Template"}</button>
                </div>
                { self.view_body() }
            </section>
        }
    }
}

impl TemplateListComponent {
    fn view_body(&self) -> Html {
        if self.loading {
            return html! { <div class="spinner" /> };
        }
        if let Some(error) = &self.error {
            return html! { <div class="alert error">{ error.clone() }</div> };
        }

        html! {
            <>
                <p class="muted">{ format!("{} templates", format_count(self.templates.len())) }</p>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Description"}</th>
                            <th>{"Fields"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {
                            if self.templates.is_empty() {
                                html! { <tr><td colspan="3">{"No templates found."}</td></tr> }
                            } else {
                                self.templates.iter().map(template_row).collect::<Html>()
                            }
                        }
                    </tbody>
                </table>
            </>
        }
    }
}

fn template_row(template: &Template) -> Html {
    let field_names = template
        .fields
        .iter()
        .map(|f| format!("{} ({})", f.name, f.data_type))
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <tr key={template.id}>
            <td>{ template.name.clone() }</td>
            <td>{ template.description.clone().unwrap_or_default() }</td>
            <td title={field_names}>{ template.fields.len() }</td>
        </tr>
    }
}
