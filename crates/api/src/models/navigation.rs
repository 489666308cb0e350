use super::ids::PageId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One emission of the application state channel.
///
/// Only `page` is interpreted by the router; everything else the channel
/// carries is preserved in `extra` so re-emissions stay lossless.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub page: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<PageTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumbs: Option<BreadcrumbTrail>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NavigationState {
    pub fn new(page: impl Into<PageId>) -> Self {
        Self {
            page: page.into(),
            title: None,
            breadcrumbs: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_title(mut self, title: PageTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_breadcrumbs(mut self, breadcrumbs: BreadcrumbTrail) -> Self {
        self.breadcrumbs = Some(breadcrumbs);
        self
    }
}

/// Whether the currently requested page can be rendered
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PageLoadState {
    Loading,
    Loaded,
    Error,
}

/// Payload of `page-state-update`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageStateUpdate {
    pub state: PageLoadState,
    pub page: PageId,
}

/// Payload of `page-title-update`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct PageTitle {
    pub show: bool,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Breadcrumb {
    pub text: String,
    pub link: String,
}

/// Payload of `breadcrumb-update`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct BreadcrumbTrail {
    pub show: bool,
    pub breadcrumbs: Vec<Breadcrumb>,
}
