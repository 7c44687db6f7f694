//! Reconstructed widgets
//!
//! Every widget variant shares one [`ViewElement`] record. Variant-specific
//! data lives in [`ViewKind`]. Children are stored as [`NodeId`]s into the
//! owning [`UiModel`](super::UiModel), which is the only place structure is
//! changed.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::analyzer::input_type;
use crate::constants::TEXT_SEPARATOR;
use crate::models::attr::Attr;
use crate::models::identity::{Guid, UiElement};

/// Handle of a widget inside a [`UiModel`](super::UiModel).
///
/// Only the model creates handles; they serialize as the arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a fragment slot was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentType {
    /// Declared in layout markup
    Xml,
    /// Attached by a fragment transaction
    Dynamic,
}

/// Variant-specific part of a widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViewKind {
    /// Leaf widget
    View,
    /// Container
    Group { children: Vec<NodeId> },
    /// Text-input widget with its raw input-type masks
    Text { input_type_values: IndexSet<i32> },
    /// Fragment slot
    Fragment {
        children: Vec<NodeId>,
        fragment_type: FragmentType,
        tag: String,
    },
}

/// Shared record of every widget variant
#[derive(Debug, Clone, Serialize)]
pub struct ViewElement {
    id: i32,
    guid: Guid,
    /// Type of the underlying widget
    pub view_class: String,
    /// Text evidence, joined by [`ViewElement::text`]
    pub text_attributes: IndexSet<Attr>,
    /// Remaining attributes by name. The first value for a name is kept.
    pub other_attributes: IndexMap<String, Attr>,
    /// Callback declared in a markup attribute
    pub xml_callback: Option<String>,
    /// Listener methods bound in code
    pub listeners: IndexSet<String>,
    /// Local the widget was assigned to, if recoverable
    pub id_variable: String,
    kind: ViewKind,
}

impl ViewElement {
    pub(crate) fn new(id: i32, guid: Guid, view_class: String, kind: ViewKind) -> Self {
        Self {
            id,
            guid,
            view_class,
            text_attributes: IndexSet::new(),
            other_attributes: IndexMap::new(),
            xml_callback: None,
            listeners: IndexSet::new(),
            id_variable: String::new(),
            kind,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn kind(&self) -> &ViewKind {
        &self.kind
    }

    /// Non-blank text attribute values joined by the text separator
    pub fn text(&self) -> String {
        self.text_attributes
            .iter()
            .filter(|attr| !attr.is_blank())
            .map(|attr| attr.value.as_str())
            .collect::<Vec<_>>()
            .join(TEXT_SEPARATOR)
    }

    /// Record a non-text attribute. Existing evidence under the same name is kept.
    pub fn add_other_attr(&mut self, name: impl Into<String>, attr: Attr) -> bool {
        let name = name.into();
        if self.other_attributes.contains_key(&name) {
            return false;
        }
        self.other_attributes.insert(name, attr);
        true
    }

    pub fn add_text_attr(&mut self, attr: Attr) -> bool {
        self.text_attributes.insert(attr)
    }

    pub fn add_listener(&mut self, listener: impl Into<String>) -> bool {
        self.listeners.insert(listener.into())
    }

    /// Can this widget hold children?
    pub fn is_container(&self) -> bool {
        matches!(self.kind, ViewKind::Group { .. } | ViewKind::Fragment { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ViewKind::Text { .. })
    }

    /// Direct children, empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            ViewKind::Group { children } | ViewKind::Fragment { children, .. } => children.as_slice(),
            ViewKind::View | ViewKind::Text { .. } => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            ViewKind::Group { children } | ViewKind::Fragment { children, .. } => Some(children),
            ViewKind::View | ViewKind::Text { .. } => None,
        }
    }

    /// Raw input-type masks of a text widget
    pub fn input_type_values(&self) -> Option<&IndexSet<i32>> {
        match &self.kind {
            ViewKind::Text { input_type_values } => Some(input_type_values),
            _ => None,
        }
    }

    /// Add an input-type mask. Only text widgets take masks.
    pub fn add_input_type(&mut self, mask: i32) -> bool {
        match &mut self.kind {
            ViewKind::Text { input_type_values } => input_type_values.insert(mask),
            _ => false,
        }
    }

    /// Decoded input categories, one per mask
    pub fn input_types(&self) -> Vec<&'static str> {
        self.input_type_values()
            .map(|masks| input_type::decode_all(masks))
            .unwrap_or_default()
    }

    pub fn fragment_type(&self) -> Option<FragmentType> {
        match &self.kind {
            ViewKind::Fragment { fragment_type, .. } => Some(*fragment_type),
            _ => None,
        }
    }

    /// Lookup tag of a fragment slot
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            ViewKind::Fragment { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Same record under a new identity, with no children
    pub(crate) fn duplicate(&self, id: i32, guid: Guid) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.guid = guid;
        if let Some(children) = copy.children_mut() {
            children.clear();
        }
        copy
    }
}

impl UiElement for ViewElement {
    fn id(&self) -> i32 {
        self.id
    }

    fn guid(&self) -> Guid {
        self.guid
    }
}
