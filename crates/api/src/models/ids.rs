use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of a routable page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Cow<'static, str>);

impl PageId {
    /// Landing page, rendered without any bundle.
    pub const HOME: PageId = PageId(Cow::Borrowed("home"));
    /// Placeholder shown while the requested page is unavailable.
    pub const NOT_LOADED: PageId = PageId(Cow::Borrowed("page-not-loaded"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Identifier of a lazily loaded group of pages
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(Cow<'static, str>);

impl BundleId {
    pub const ALL: BundleId = BundleId(Cow::Borrowed("all"));
    pub const ADMIN: BundleId = BundleId(Cow::Borrowed("admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BundleId {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl From<String> for BundleId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for BundleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
