pub mod content;
pub mod helpers;
pub mod templates;

use crate::app::Page;
use yew::{Callback, Properties};

/// Properties shared by every top-level view: a way to switch views.
#[derive(Properties, PartialEq, Clone)]
pub struct PageProps {
    pub on_navigate: Callback<Page>,
}
