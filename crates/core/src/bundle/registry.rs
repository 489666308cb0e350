use std::collections::HashSet;
use waypost_api::{BundleId, PageId};

/// Static mapping from bundle to the pages it contains.
///
/// Built once at startup and never mutated. Bundles keep their declaration
/// order so that a page listed twice resolves to the first bundle.
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: Vec<(BundleId, HashSet<PageId>)>,
}

impl BundleRegistry {
    pub fn new<B, P>(bundles: B) -> Self
    where
        B: IntoIterator<Item = (BundleId, P)>,
        P: IntoIterator<Item = PageId>,
    {
        Self {
            bundles: bundles
                .into_iter()
                .map(|(bundle, pages)| (bundle, pages.into_iter().collect()))
                .collect(),
        }
    }

    /// Bundle that contains `page`, if any.
    pub fn resolve_bundle(&self, page: &PageId) -> Option<&BundleId> {
        self.bundles
            .iter()
            .find(|(_, pages)| pages.contains(page))
            .map(|(bundle, _)| bundle)
    }

    pub fn pages_of(&self, bundle: &BundleId) -> Option<&HashSet<PageId>> {
        self.bundles
            .iter()
            .find(|(id, _)| id == bundle)
            .map(|(_, pages)| pages)
    }

    pub fn bundle_ids(&self) -> impl Iterator<Item = &BundleId> {
        self.bundles.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
