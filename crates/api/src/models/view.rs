use super::ids::PageId;
use super::navigation::Breadcrumb;
use serde::{Deserialize, Serialize};

/// Everything the rendering layer reads from the app shell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShellView {
    pub page: PageId,
    pub page_is_loaded: bool,
    pub page_title: String,
    pub show_page_title: bool,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub show_breadcrumbs: bool,
    pub user_is_authenticated: bool,
    pub app_title: String,
}

impl ShellView {
    pub fn new(app_title: impl Into<String>) -> Self {
        Self {
            page: PageId::NOT_LOADED,
            page_is_loaded: false,
            page_title: String::new(),
            show_page_title: false,
            breadcrumbs: Vec::new(),
            show_breadcrumbs: false,
            user_is_authenticated: false,
            app_title: app_title.into(),
        }
    }

    /// Replace the visible page, keeping `page_is_loaded` in step.
    pub fn set_page(&mut self, page: PageId) {
        self.page_is_loaded = page != PageId::NOT_LOADED;
        self.page = page;
    }
}
