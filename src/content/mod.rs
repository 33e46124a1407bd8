//! Content store access and page data loading.
//!
//! - [`store`]: raw reads from the store (HTTP or local directory)
//! - [`fetch`]: the requests each page issues
//! - [`view`]: per-page view state and mount lifetime
//! - [`types`]: manifest records

pub mod fetch;
pub mod store;
pub mod types;
pub mod view;

pub use fetch::{ContentPaths, load_current_projects, load_project, load_projects, select_current};
pub use store::Store;
pub use types::Project;
pub use view::{Mount, ViewState};
