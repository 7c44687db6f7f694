//! Arena of reconstructed widgets and the tree operations over it

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexSet;

use crate::errors::{ReconstructionError, ReconstructionResult};
use crate::models::element::{FragmentType, NodeId, ViewElement, ViewKind};
use crate::models::identity::{Guid, IdentityAllocator};

/// Every widget reconstructed for one target, plus the allocator that named them.
///
/// Traversals are iterative and keep a visited set, so they terminate on any
/// shape the arena can hold, including cycles deeper than self-attachment.
#[derive(Debug, Default)]
pub struct UiModel {
    nodes: Vec<ViewElement>,
    allocator: IdentityAllocator,
}

impl UiModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocator(&self) -> &IdentityAllocator {
        &self.allocator
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Was `node` issued by this model?
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    /// Element behind a handle.
    ///
    /// Handles are only produced by this model, so indexing never misses.
    pub fn get(&self, node: NodeId) -> &ViewElement {
        &self.nodes[node.0]
    }

    pub fn get_mut(&mut self, node: NodeId) -> &mut ViewElement {
        &mut self.nodes[node.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ViewElement)> {
        self.nodes.iter().enumerate().map(|(index, e)| (NodeId(index), e))
    }

    fn push(&mut self, element: ViewElement) -> NodeId {
        self.nodes.push(element);
        NodeId(self.nodes.len() - 1)
    }

    fn insert(&mut self, id: i32, view_class: String, kind: ViewKind) -> NodeId {
        let guid = self.allocator.next_guid();
        self.push(ViewElement::new(id, guid, view_class, kind))
    }

    /// New leaf widget
    pub fn create_view(&mut self, id: i32, view_class: impl Into<String>) -> NodeId {
        self.insert(id, view_class.into(), ViewKind::View)
    }

    /// New container
    pub fn create_group(&mut self, id: i32, view_class: impl Into<String>) -> NodeId {
        self.insert(id, view_class.into(), ViewKind::Group { children: Vec::new() })
    }

    /// New text-input widget. Masks are added afterwards.
    pub fn create_text(&mut self, id: i32, view_class: impl Into<String>) -> NodeId {
        self.insert(
            id,
            view_class.into(),
            ViewKind::Text {
                input_type_values: IndexSet::new(),
            },
        )
    }

    /// New fragment slot
    pub fn create_fragment(
        &mut self,
        id: i32,
        fragment_class: impl Into<String>,
        fragment_type: FragmentType,
        tag: impl Into<String>,
    ) -> NodeId {
        self.insert(
            id,
            fragment_class.into(),
            ViewKind::Fragment {
                children: Vec::new(),
                fragment_type,
                tag: tag.into(),
            },
        )
    }

    pub fn find_by_guid(&self, guid: Guid) -> Option<NodeId> {
        self.nodes().find(|(_, e)| e.guid() == guid).map(|(node, _)| node)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).children()
    }

    pub fn has_children(&self, node: NodeId) -> bool {
        self.get(node).has_children()
    }

    /// Attach `child` to `parent`.
    ///
    /// Leaves ignore the request and return `false`. A container rejects
    /// itself as a child. Deeper cycles are not detected.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> ReconstructionResult<bool> {
        if !self.get(parent).is_container() {
            return Ok(false);
        }
        if parent == child {
            return Err(self.self_cycle(parent));
        }
        match self.get_mut(parent).children_mut() {
            Some(children) => {
                children.push(child);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Attach a batch of children. Fails before attaching anything if
    /// `parent` is part of the batch.
    pub fn add_children(&mut self, parent: NodeId, nodes: &[NodeId]) -> ReconstructionResult<bool> {
        if !self.get(parent).is_container() {
            return Ok(false);
        }
        if nodes.contains(&parent) {
            return Err(self.self_cycle(parent));
        }
        match self.get_mut(parent).children_mut() {
            Some(children) => {
                children.extend_from_slice(nodes);
                Ok(!nodes.is_empty())
            }
            None => Ok(false),
        }
    }

    fn self_cycle(&self, node: NodeId) -> ReconstructionError {
        let element = self.get(node);
        ReconstructionError::SelfCycle {
            guid: element.guid(),
            id: element.id(),
        }
    }

    /// The container itself, its children and all of their descendants.
    ///
    /// Empty for leaves. Order is deterministic but not part of the contract.
    pub fn all_children_flatten(&self, node: NodeId) -> IndexSet<NodeId> {
        let mut flat = IndexSet::new();
        if !self.get(node).is_container() {
            return flat;
        }
        flat.insert(node);
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            for &child in self.children(current) {
                if flat.insert(child) {
                    stack.push(child);
                }
            }
        }
        flat
    }

    /// Breadth-first search for `id`, starting at `node` itself.
    ///
    /// Ids may collide; the first match in BFS order wins.
    pub fn get_child(&self, node: NodeId, id: i32) -> Option<NodeId> {
        if !self.get(node).is_container() {
            return None;
        }
        let mut queue = VecDeque::from([node]);
        let mut seen = HashSet::from([node]);
        while let Some(current) = queue.pop_front() {
            if self.get(current).id() == id {
                return Some(current);
            }
            for &child in self.children(current) {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        None
    }

    /// Deep copy keeping the caller-visible id
    pub fn copy(&mut self, node: NodeId) -> NodeId {
        let id = self.get(node).id();
        self.copy_with_id(node, id)
    }

    /// Deep copy under `new_id`.
    ///
    /// Every copied element gets a fresh guid. Descendants keep their own
    /// ids. Attribute sets are cloned, so later evidence on the copy never
    /// reaches the source.
    pub fn copy_with_id(&mut self, node: NodeId, new_id: i32) -> NodeId {
        let root = self.duplicate(node, new_id);
        let mut copies = HashMap::from([(node, root)]);
        let mut pending = vec![node];
        while let Some(source) = pending.pop() {
            let Some(&target) = copies.get(&source) else {
                continue;
            };
            let children = self.children(source).to_vec();
            for child in children {
                let copied = match copies.get(&child) {
                    Some(&copied) => copied,
                    None => {
                        let child_id = self.get(child).id();
                        let copied = self.duplicate(child, child_id);
                        copies.insert(child, copied);
                        pending.push(child);
                        copied
                    }
                };
                if let Some(list) = self.get_mut(target).children_mut() {
                    list.push(copied);
                }
            }
        }
        root
    }

    fn duplicate(&mut self, source: NodeId, id: i32) -> NodeId {
        let guid = self.allocator.next_guid();
        let element = self.get(source).duplicate(id, guid);
        self.push(element)
    }

    /// Nodes that are somebody's child
    pub fn attached_nodes(&self) -> HashSet<NodeId> {
        self.nodes
            .iter()
            .flat_map(|e| e.children().iter().copied())
            .collect()
    }
}
