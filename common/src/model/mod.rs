pub mod content;
pub mod error;
pub mod template;
