//! Root component: a navigation bar and the active view.

use crate::components::content::create::ContentCreateComponent;
use crate::components::content::list::ContentListComponent;
use crate::components::templates::create::TemplateCreateComponent;
use crate::components::templates::list::TemplateListComponent;
use yew::{classes, html, Component, Context, Html};

/// The views the client can show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Templates,
    NewTemplate,
    Content,
    NewContent,
}

pub enum Msg {
    Navigate(Page),
}

pub struct App {
    page: Page,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::Templates,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                let changed = self.page != page;
                self.page = page;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_navigate = link.callback(Msg::Navigate);
        let in_templates = matches!(self.page, Page::Templates | Page::NewTemplate);

        html! {
            <div class="app-root">
                <nav class="app-bar">
                    <span class="app-title">{"Blog Management System"}</span>
                    <button
                        class={classes!("nav-btn", in_templates.then_some("active"))}
                        onclick={link.callback(|_| Msg::Navigate(Page::Templates))}
                    >
                        {"Templates"}
                    </button>
                    <button
                        class={classes!("nav-btn", (!in_templates).then_some("active"))}
                        onclick={link.callback(|_| Msg::Navigate(Page::Content))}
                    >
                        {"Content"}
                    </button>
                </nav>
                <main class="app-main">
                    {
                        match self.page {
                            Page::Templates => html! { <TemplateListComponent {on_navigate} /> },
                            Page::NewTemplate => html! { <TemplateCreateComponent {on_navigate} /> },
                            Page::Content => html! { <ContentListComponent {on_navigate} /> },
                            Page::NewContent => html! { <ContentCreateComponent {on_navigate} /> },
                        }
                    }
                </main>
            </div>
        }
    }
}
