//! HTML rendering: reusable components, full pages and embedded static files.

pub mod assets;
pub mod components;
pub mod pages;

pub use assets::STATIC_FILES;
pub use pages::{about_page, not_found_page, project_page, projects_page};
