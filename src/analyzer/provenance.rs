//! Origin attribution of elements and API uses

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::models::{Guid, Origin};

/// Which screen or fragment each reconstructed fact belongs to.
///
/// Elements are keyed by guid, API uses by call signature. A fact may have
/// several origins when the same code is reached from several components.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OriginTracker {
    elements: IndexMap<Guid, IndexSet<Origin>>,
    apis: IndexMap<String, IndexSet<Origin>>,
}

impl OriginTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute an element to `origin`. Returns `false` if already known.
    pub fn tag_element(&mut self, guid: Guid, origin: &Origin) -> bool {
        self.elements.entry(guid).or_default().insert(origin.clone())
    }

    /// Attribute an API use to `origin`
    pub fn tag_api(&mut self, signature: &str, origin: &Origin) -> bool {
        self.apis
            .entry(signature.to_string())
            .or_default()
            .insert(origin.clone())
    }

    pub fn origins_of(&self, guid: Guid) -> impl Iterator<Item = &Origin> {
        self.elements.get(&guid).into_iter().flatten()
    }

    pub fn origins_of_api(&self, signature: &str) -> impl Iterator<Item = &Origin> {
        self.apis.get(signature).into_iter().flatten()
    }

    /// Elements attributed to `origin`, in tagging order
    pub fn elements_of<'a>(&'a self, origin: &'a Origin) -> impl Iterator<Item = Guid> + 'a {
        self.elements
            .iter()
            .filter(move |(_, origins)| origins.contains(origin))
            .map(|(guid, _)| *guid)
    }

    /// API signatures attributed to `origin`
    pub fn apis_of<'a>(&'a self, origin: &'a Origin) -> impl Iterator<Item = &'a str> + 'a {
        self.apis
            .iter()
            .filter(move |(_, origins)| origins.contains(origin))
            .map(|(signature, _)| signature.as_str())
    }

    /// Every origin seen so far
    pub fn origins(&self) -> IndexSet<&Origin> {
        self.elements
            .values()
            .chain(self.apis.values())
            .flatten()
            .collect()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn api_count(&self) -> usize {
        self.apis.len()
    }
}
