//! Tree assembler
//!
//! Walks the instructions of one method at a time, classifies them and turns
//! the recognised idioms into widgets, menus and dialogs. Evidence found at
//! the same lookup or allocation site is merged into one node, whichever
//! method or component reaches it.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};
use serde::Serialize;

use crate::analyzer::classifier::{self, call_name, call_params};
use crate::analyzer::provenance::OriginTracker;
use crate::config::{AssemblerConfig, WidgetKind};
use crate::constants::signatures::signatures;
use crate::constants::widgets::{ADAPTER_ROW_CLASS, LIST_VIEW_CLASS};
use crate::constants::MISSING_UI_ID;
use crate::errors::{ErrorContext, ReconstructionError, ReconstructionResult};
use crate::models::{
    Attr, ButtonType, Dialog, DialogButton, FragmentType, Guid, Menu, MenuType, NodeId, Origin, UiModel,
};
use crate::program::{InstructionQuery, Resolution, RhsShape, ValueOracle, ValueRef};

const INT_PARAM: &str = "int";
const STRING_PARAM: &str = "java.lang.String";
const BOOLEAN_PARAM: &str = "boolean";
const VIEW_GROUP_PARAM: &str = "android.view.ViewGroup";

/// Registered layout resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutTemplate {
    /// Layout with a single root widget
    View(NodeId),
    /// `<merge>` layout whose children go straight into the parent
    Merge(Vec<NodeId>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MergeKey<S> {
    /// Construction site of a lookup pair, per resolved id
    Lookup(S, i32),
    Allocation(S),
}

/// One method to assemble, with the component it runs for
#[derive(Debug, Clone)]
pub struct MethodUnit<S> {
    /// Instruction sites of the method, in lexical order
    pub sites: Vec<S>,
    /// Component the method runs for
    pub origin: Origin,
}

impl<S> MethodUnit<S> {
    pub fn new(sites: Vec<S>, origin: Origin) -> Self {
        Self { sites, origin }
    }
}

/// Counters for one assembled method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodStats {
    /// Method signature
    pub method: String,
    pub instructions: usize,
    /// Nodes added to the model while assembling the method
    pub elements_created: usize,
    /// Attachments rejected because a node would become its own child
    pub self_cycles_skipped: usize,
    /// Oracle answers that were `Unknown` or empty
    pub unknown_values: usize,
}

/// A method whose assembly was abandoned
#[derive(Debug, Clone)]
pub struct SkippedMethod {
    /// Where the failure happened
    pub context: ErrorContext,
    /// Rendered error
    pub reason: String,
}

#[derive(Debug, Default)]
struct MethodState {
    locals: HashMap<String, IndexSet<NodeId>>,
    drafts: Vec<Dialog>,
    draft_locals: HashMap<String, usize>,
}

impl MethodState {
    fn bound(&self, local: Option<&str>) -> Vec<NodeId> {
        local
            .and_then(|local| self.locals.get(local))
            .map(|nodes| nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    fn bind(&mut self, local: Option<&str>, nodes: impl IntoIterator<Item = NodeId>) {
        let Some(local) = local else {
            return;
        };
        let nodes: IndexSet<NodeId> = nodes.into_iter().collect();
        if nodes.is_empty() {
            self.locals.remove(local);
        } else {
            self.locals.insert(local.to_string(), nodes);
        }
    }

    fn unbind(&mut self, local: Option<&str>) {
        if let Some(local) = local {
            self.locals.remove(local);
            self.draft_locals.remove(local);
        }
    }
}

/// Builds the UI model of one target from classified instructions.
///
/// Layouts and menus declared in markup are registered up front. Methods are
/// then assembled one at a time; a method failing with a contract violation
/// is skipped and recorded, the rest of the run carries on.
#[derive(Debug)]
pub struct TreeAssembler<S> {
    config: AssemblerConfig,
    model: UiModel,
    tracker: OriginTracker,
    layouts: HashMap<i32, LayoutTemplate>,
    menu_templates: HashMap<i32, Menu>,
    merged: HashMap<MergeKey<S>, NodeId>,
    next_dynamic_id: i32,
    roots: IndexMap<Origin, IndexSet<NodeId>>,
    menus: Vec<(Origin, Menu)>,
    dialogs: Vec<(Origin, Dialog)>,
    skipped: Vec<SkippedMethod>,
}

impl<S> TreeAssembler<S>
where
    S: Copy + Eq + Hash + Debug,
{
    /// Fails with a configuration error if `config` is invalid
    pub fn new(config: AssemblerConfig) -> ReconstructionResult<Self> {
        config.validate()?;
        let next_dynamic_id = config.dynamic_id_start;
        Ok(Self {
            config,
            model: UiModel::new(),
            tracker: OriginTracker::new(),
            layouts: HashMap::new(),
            menu_templates: HashMap::new(),
            merged: HashMap::new(),
            next_dynamic_id,
            roots: IndexMap::new(),
            menus: Vec::new(),
            dialogs: Vec::new(),
            skipped: Vec::new(),
        })
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn model(&self) -> &UiModel {
        &self.model
    }

    /// Arena in which layout templates are built before assembly
    pub fn model_mut(&mut self) -> &mut UiModel {
        &mut self.model
    }

    /// Register a layout built in [`model_mut`](Self::model_mut).
    ///
    /// Handles that do not belong to this assembler's model are rejected.
    pub fn register_layout(&mut self, layout_id: i32, template: LayoutTemplate) -> ReconstructionResult<()> {
        let nodes = match &template {
            LayoutTemplate::View(root) => std::slice::from_ref(root),
            LayoutTemplate::Merge(children) => children.as_slice(),
        };
        if let Some(node) = nodes.iter().find(|&&node| !self.model.contains(node)) {
            return Err(ReconstructionError::UnknownNode {
                index: node.index(),
                len: self.model.len(),
            });
        }
        self.layouts.insert(layout_id, template);
        Ok(())
    }

    /// Register a menu resource.
    ///
    /// The template may come from any allocator. Each inflation hands out a
    /// copy whose items take fresh guids from this assembler's model.
    pub fn register_menu(&mut self, menu_id: i32, menu: Menu) {
        self.menu_templates.insert(menu_id, menu);
    }

    pub fn skipped(&self) -> &[SkippedMethod] {
        &self.skipped
    }

    /// Assemble every unit, skipping the ones that fail
    pub fn assemble<Q, O>(&mut self, query: &Q, oracle: &O, units: &[MethodUnit<S>]) -> Vec<MethodStats>
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let mut stats = Vec::with_capacity(units.len());
        for unit in units {
            match self.assemble_method(query, oracle, &unit.sites, &unit.origin) {
                Ok(method_stats) => stats.push(method_stats),
                Err(err) => self.skip(query, &unit.sites, err),
            }
        }
        info!(
            "Assembled {} of {} methods, {} elements so far",
            stats.len(),
            units.len(),
            self.model.len()
        );
        stats
    }

    fn skip<Q: InstructionQuery<Site = S>>(&mut self, query: &Q, sites: &[S], err: ReconstructionError) {
        let mut context = ErrorContext::new("tree_assembler", "assemble_method");
        if let Some(&first) = sites.first() {
            context = context.in_method(query.method_of(first));
        }
        if err.is_contract_failure() {
            context = context.with_details("contract failure");
        }
        warn!("{}: {}", context, err);
        self.skipped.push(SkippedMethod {
            context,
            reason: err.to_string(),
        });
    }

    /// Assemble the instructions of one method, in order, for `origin`
    pub fn assemble_method<Q, O>(
        &mut self,
        query: &Q,
        oracle: &O,
        sites: &[S],
        origin: &Origin,
    ) -> ReconstructionResult<MethodStats>
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let method = sites
            .first()
            .map_or_else(String::new, |&site| query.method_of(site).to_string());
        debug!("Assembling {} for {}", method, origin);

        let before = self.model.len();
        let mut state = MethodState::default();
        let mut stats = MethodStats {
            method,
            instructions: sites.len(),
            ..MethodStats::default()
        };
        for &site in sites {
            self.process_site(query, oracle, site, origin, &mut state, &mut stats)?;
        }
        for dialog in state.drafts {
            self.dialogs.push((origin.clone(), dialog));
        }
        stats.elements_created = self.model.len() - before;

        debug!(
            "Finished {}: {} new elements, {} unknown values",
            stats.method, stats.elements_created, stats.unknown_values
        );
        Ok(stats)
    }

    fn process_site<Q, O>(
        &mut self,
        query: &Q,
        oracle: &O,
        site: S,
        origin: &Origin,
        state: &mut MethodState,
        stats: &mut MethodStats,
    ) -> ReconstructionResult<()>
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        if self.config.track_api_calls {
            if let Some(signature) = query.call_signature(site) {
                self.tracker.tag_api(signature, origin);
            }
        }

        if classifier::is_find_view_by_id(query, site) {
            let construction = classifier::get_construction_instruction(query, site)?;
            if construction == site {
                self.resolve_lookup(query, oracle, site, origin, state, stats)?;
            }
            return Ok(());
        }
        if classifier::is_get_child_at(query, site) {
            let construction = classifier::get_construction_from_get_child_at(query, site)?;
            if construction == site {
                self.resolve_child_at(query, site, state);
            }
            return Ok(());
        }
        if classifier::is_null_assignment(query, site) {
            state.unbind(query.defined_local(site));
            return Ok(());
        }
        if classifier::is_new_expression(query, site) {
            self.resolve_allocation(query, site, origin, state);
            return Ok(());
        }

        let Some(signature) = query.call_signature(site) else {
            return Ok(());
        };
        if classifier::is_inflate(query, site) {
            return self.resolve_inflate(query, oracle, site, signature, origin, state, stats);
        }
        if classifier::is_add_view(query, site) {
            let parents = state.bound(query.call_receiver(site));
            let children = state.bound(query.call_arg_local(site, 0));
            for &parent in &parents {
                for &child in &children {
                    self.attach(parent, child, stats)?;
                }
            }
            return Ok(());
        }
        if classifier::is_get_view(query, site) {
            return self.resolve_adapter_row(query, site, signature, origin, state, stats);
        }
        if classifier::is_get_list_view(query, site) {
            let node = self.merged_or_create(MergeKey::Allocation(site), |this| {
                let id = this.next_dynamic_id();
                this.model.create_group(id, LIST_VIEW_CLASS)
            });
            self.tag(node, origin);
            state.bind(query.defined_local(site), [node]);
            return Ok(());
        }

        if signature == signatures::SET_CONTENT_VIEW_ID {
            let mut screens = Vec::new();
            for layout_id in self.resolve_ints(oracle, ValueRef::Arg(0), site, stats) {
                screens.extend(self.materialize(layout_id, origin));
            }
            self.add_roots(origin, &screens);
            state.bind(query.call_receiver(site), screens);
        } else if signatures::SET_CONTENT_VIEW.contains(&signature) {
            let views = state.bound(query.call_arg_local(site, 0));
            for &view in &views {
                self.tag_tree(view, origin);
            }
            self.add_roots(origin, &views);
            state.bind(query.call_receiver(site), views);
        } else if signature == signatures::MENU_INFLATE {
            self.resolve_menu(query, oracle, site, origin, stats);
        } else if signatures::FRAGMENT_TRANSACTION.contains(&signature) {
            self.resolve_fragment_transaction(oracle, site, signature, origin, stats)?;
        } else if !self.resolve_dialog_call(query, oracle, site, signature, state, stats) {
            self.resolve_setter(query, oracle, site, signature, state, stats);
        }
        Ok(())
    }

    fn resolve_lookup<Q, O>(
        &mut self,
        query: &Q,
        oracle: &O,
        site: S,
        origin: &Origin,
        state: &mut MethodState,
        stats: &mut MethodStats,
    ) -> ReconstructionResult<()>
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let lookup = classifier::get_lookup_instruction(query, site)?;
        let class_name = match query.rhs_shape(site) {
            Some(RhsShape::NewObject(class_name)) => class_name,
            _ => ADAPTER_ROW_CLASS,
        };

        let mut ids: Vec<i32> = self
            .resolve_ints(oracle, ValueRef::Arg(0), lookup, stats)
            .into_iter()
            .filter_map(|id| i32::try_from(id).ok())
            .collect();
        if ids.is_empty() {
            ids.push(MISSING_UI_ID);
        }

        let containers = state.bound(query.call_receiver(lookup));
        let local = query.defined_local(site);
        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            let found = containers
                .iter()
                .find_map(|&container| self.model.get_child(container, id));
            let node = match found {
                Some(node) => node,
                None => self.merged_or_create(MergeKey::Lookup(site, id), |this| this.create_widget(id, class_name)),
            };
            if let Some(local) = local {
                let element = self.model.get_mut(node);
                if element.id_variable.is_empty() {
                    element.id_variable = local.to_string();
                }
            }
            self.tag(node, origin);
            nodes.push(node);
        }
        state.bind(query.defined_local(lookup), nodes.iter().copied());
        state.bind(local, nodes);
        Ok(())
    }

    fn resolve_child_at<Q: InstructionQuery<Site = S>>(&mut self, query: &Q, site: S, state: &mut MethodState) {
        let is_call = query
            .call_signature(site)
            .map_or(false, |signature| call_name(signature) == signatures::GET_CHILD_AT_NAME);
        let call_site = if is_call {
            site
        } else {
            query.predecessor(site).unwrap_or(site)
        };
        // Any child may be returned
        let children: Vec<NodeId> = state
            .bound(query.call_receiver(call_site))
            .into_iter()
            .flat_map(|parent| self.model.children(parent).to_vec())
            .collect();
        state.bind(query.defined_local(call_site), children.iter().copied());
        state.bind(query.defined_local(site), children);
    }

    fn resolve_allocation<Q: InstructionQuery<Site = S>>(
        &mut self,
        query: &Q,
        site: S,
        origin: &Origin,
        state: &mut MethodState,
    ) {
        let Some(RhsShape::NewObject(class_name)) = query.rhs_shape(site) else {
            return;
        };
        let local = query.defined_local(site);
        if self.config.is_dialog_builder(class_name) {
            state.drafts.push(Dialog::new());
            if let Some(local) = local {
                state.draft_locals.insert(local.to_string(), state.drafts.len() - 1);
            }
            return;
        }
        if !self.config.is_view_class(class_name) {
            state.unbind(local);
            return;
        }

        let node = self.merged_or_create(MergeKey::Allocation(site), |this| {
            let id = this.next_dynamic_id();
            this.create_widget(id, class_name)
        });
        if let Some(local) = local {
            let element = self.model.get_mut(node);
            if element.id_variable.is_empty() {
                element.id_variable = local.to_string();
            }
        }
        self.tag(node, origin);
        state.bind(local, [node]);
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_inflate<Q, O>(
        &mut self,
        query: &Q,
        oracle: &O,
        site: S,
        signature: &str,
        origin: &Origin,
        state: &mut MethodState,
        stats: &mut MethodStats,
    ) -> ReconstructionResult<()>
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let params = call_params(signature);
        let Some(layout_arg) = params.iter().position(|p| *p == INT_PARAM) else {
            return Ok(());
        };
        let parents = params
            .iter()
            .position(|p| *p == VIEW_GROUP_PARAM)
            .map(|index| state.bound(query.call_arg_local(site, index)))
            .unwrap_or_default();
        let attach = match params.iter().position(|p| *p == BOOLEAN_PARAM) {
            Some(flag) => match oracle.resolve(ValueRef::Arg(flag), site) {
                Resolution::Known(values) => values.iter().any(|v| v.as_int() != Some(0)),
                Resolution::Unknown => true,
            },
            None => true,
        };

        let mut inflated = Vec::new();
        for layout_id in self.resolve_ints(oracle, ValueRef::Arg(layout_arg), site, stats) {
            inflated.extend(self.materialize(layout_id, origin));
        }
        if attach {
            for &parent in &parents {
                for &child in &inflated {
                    self.attach(parent, child, stats)?;
                }
            }
        }
        state.bind(query.defined_local(site), inflated);
        Ok(())
    }

    fn resolve_adapter_row<Q: InstructionQuery<Site = S>>(
        &mut self,
        query: &Q,
        site: S,
        signature: &str,
        origin: &Origin,
        state: &mut MethodState,
        stats: &mut MethodStats,
    ) -> ReconstructionResult<()> {
        let row = self.merged_or_create(MergeKey::Allocation(site), |this| {
            let id = this.next_dynamic_id();
            this.model.create_view(id, ADAPTER_ROW_CLASS)
        });
        self.tag(row, origin);
        if let Some(index) = call_params(signature).iter().position(|p| *p == VIEW_GROUP_PARAM) {
            for parent in state.bound(query.call_arg_local(site, index)) {
                self.attach(parent, row, stats)?;
            }
        }
        state.bind(query.defined_local(site), [row]);
        Ok(())
    }

    fn resolve_menu<Q, O>(&mut self, query: &Q, oracle: &O, site: S, origin: &Origin, stats: &mut MethodStats)
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let menu_type = MenuType::from_callback(query.method_of(site));
        for menu_id in self.resolve_ints(oracle, ValueRef::Arg(0), site, stats) {
            let template = i32::try_from(menu_id)
                .ok()
                .and_then(|id| self.menu_templates.get(&id));
            let Some(template) = template else {
                debug!("No menu registered for id {}", menu_id);
                continue;
            };
            let mut menu = template.copy(self.model.allocator());
            menu.menu_type = menu_type;
            menu.listener = menu_type.listener_subsignature().map(str::to_string);
            self.menus.push((origin.clone(), menu));
        }
    }

    fn resolve_fragment_transaction<O: ValueOracle<S>>(
        &mut self,
        oracle: &O,
        site: S,
        signature: &str,
        origin: &Origin,
        stats: &mut MethodStats,
    ) -> ReconstructionResult<()> {
        let params = call_params(signature);
        let Some(fragment_arg) = params.iter().position(|p| *p != INT_PARAM && *p != STRING_PARAM) else {
            return Ok(());
        };
        let mut classes = self.resolve_labels(oracle, ValueRef::Arg(fragment_arg), site, stats);
        if classes.is_empty() {
            classes.push(params[fragment_arg].to_string());
        }
        let tag = match params.iter().position(|p| *p == STRING_PARAM) {
            Some(index) => self
                .resolve_labels(oracle, ValueRef::Arg(index), site, stats)
                .into_iter()
                .next()
                .unwrap_or_default(),
            None => String::new(),
        };

        // Container ids are looked up in the screens of the same origin
        let mut containers = Vec::new();
        if params.first() == Some(&INT_PARAM) {
            let screens: Vec<NodeId> = self
                .roots
                .get(origin)
                .map(|roots| roots.iter().copied().collect())
                .unwrap_or_default();
            for container_id in self.resolve_ints(oracle, ValueRef::Arg(0), site, stats) {
                let Ok(container_id) = i32::try_from(container_id) else {
                    continue;
                };
                containers.extend(
                    screens
                        .iter()
                        .filter_map(|&screen| self.model.get_child(screen, container_id)),
                );
            }
        }

        for class_name in classes {
            let slot = self
                .model
                .create_fragment(MISSING_UI_ID, class_name, FragmentType::Dynamic, tag.clone());
            self.tag(slot, origin);
            for &container in &containers {
                self.attach(container, slot, stats)?;
            }
        }
        Ok(())
    }

    /// Dialog builder calls on a draft. Returns `false` if the receiver is no draft.
    fn resolve_dialog_call<Q, O>(
        &mut self,
        query: &Q,
        oracle: &O,
        site: S,
        signature: &str,
        state: &mut MethodState,
        stats: &mut MethodStats,
    ) -> bool
    where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let Some(&draft) = query
            .call_receiver(site)
            .and_then(|receiver| state.draft_locals.get(receiver))
        else {
            return false;
        };

        if signatures::DIALOG_SET_TITLE.contains(&signature) {
            let labels = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
            if let Some(dialog) = state.drafts.get_mut(draft) {
                dialog.title.extend(labels);
            }
        } else if signatures::DIALOG_SET_MESSAGE.contains(&signature) {
            let labels = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
            if let Some(dialog) = state.drafts.get_mut(draft) {
                dialog.message.extend(labels);
            }
        } else if signatures::DIALOG_SET_ICON.contains(&signature) {
            let labels = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
            if let Some(dialog) = state.drafts.get_mut(draft) {
                dialog.icon.extend(labels);
            }
        } else if signatures::DIALOG_SET_BUTTON.contains(&signature) {
            if let Some(button_type) = ButtonType::from_method_name(call_name(signature)) {
                let label = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
                let listeners = self.resolve_labels(oracle, ValueRef::Arg(1), site, stats);
                let button = DialogButton::new(
                    self.model.allocator(),
                    label.into_iter().collect(),
                    button_type,
                    listeners.into_iter().collect(),
                );
                if let Some(dialog) = state.drafts.get_mut(draft) {
                    dialog.buttons.push(button);
                }
            }
        }

        // Builder calls return the builder
        if let Some(local) = query.defined_local(site) {
            state.draft_locals.insert(local.to_string(), draft);
        }
        true
    }

    fn resolve_setter<Q, O>(
        &mut self,
        query: &Q,
        oracle: &O,
        site: S,
        signature: &str,
        state: &mut MethodState,
        stats: &mut MethodStats,
    ) where
        Q: InstructionQuery<Site = S>,
        O: ValueOracle<S>,
    {
        let targets: Vec<NodeId> = state
            .bound(query.call_receiver(site))
            .into_iter()
            .filter(|&node| !self.config.is_ignored(&self.model.get(node).view_class))
            .collect();
        if targets.is_empty() {
            return;
        }

        if signatures::SET_TEXT.contains(&signature) {
            let name = text_attr_name(call_name(signature));
            let values = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
            for &node in &targets {
                let element = self.model.get_mut(node);
                for value in &values {
                    element.add_text_attr(Attr::dynamic(name.as_str(), value.as_str()));
                }
            }
        } else if signatures::SET_LISTENER.contains(&signature) {
            let listeners = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
            for &node in &targets {
                let element = self.model.get_mut(node);
                for listener in &listeners {
                    element.add_listener(listener.as_str());
                }
            }
        } else if signatures::SET_INPUT_TYPE.contains(&signature) {
            let masks: Vec<i32> = self
                .resolve_ints(oracle, ValueRef::Arg(0), site, stats)
                .into_iter()
                .filter_map(|mask| i32::try_from(mask).ok())
                .collect();
            for &node in &targets {
                let element = self.model.get_mut(node);
                for &mask in &masks {
                    element.add_input_type(mask);
                }
            }
        } else if signatures::SET_IMAGE.contains(&signature) {
            let values = self.resolve_labels(oracle, ValueRef::Arg(0), site, stats);
            for &node in &targets {
                let element = self.model.get_mut(node);
                for value in &values {
                    let images = element
                        .other_attributes
                        .keys()
                        .filter(|name| name.starts_with("image"))
                        .count();
                    let known = element
                        .other_attributes
                        .values()
                        .any(|attr| attr.name.starts_with("image") && attr.value == *value);
                    if !known {
                        let name = format!("image{}", images);
                        element.add_other_attr(name.as_str(), Attr::dynamic(name.as_str(), value.as_str()));
                    }
                }
            }
        }
    }

    fn resolve_ints<O: ValueOracle<S>>(
        &self,
        oracle: &O,
        value: ValueRef,
        at: S,
        stats: &mut MethodStats,
    ) -> Vec<i64> {
        let ints = oracle.resolve(value, at).ints();
        if ints.is_empty() {
            debug!("Unresolved integer {:?} at {:?}", value, at);
            stats.unknown_values += 1;
        }
        ints
    }

    /// Resolved strings, with integers rendered as decimal resource ids
    fn resolve_labels<O: ValueOracle<S>>(
        &self,
        oracle: &O,
        value: ValueRef,
        at: S,
        stats: &mut MethodStats,
    ) -> Vec<String> {
        let resolution = oracle.resolve(value, at);
        let labels: Vec<String> = resolution
            .values()
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.as_int().map(|i| i.to_string()).unwrap_or_default(),
            })
            .collect();
        if labels.is_empty() {
            debug!("Unresolved value {:?} at {:?}", value, at);
            stats.unknown_values += 1;
        }
        labels
    }

    /// Fresh copies of a registered layout, tagged with `origin`
    fn materialize(&mut self, layout_id: i64, origin: &Origin) -> Vec<NodeId> {
        let template = i32::try_from(layout_id)
            .ok()
            .and_then(|id| self.layouts.get(&id))
            .cloned();
        let sources = match template {
            Some(LayoutTemplate::View(root)) => vec![root],
            Some(LayoutTemplate::Merge(children)) => children,
            None => {
                debug!("No layout registered for id {}", layout_id);
                return Vec::new();
            }
        };
        let copies: Vec<NodeId> = sources.into_iter().map(|node| self.model.copy(node)).collect();
        for &copy in &copies {
            self.tag_tree(copy, origin);
        }
        copies
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, stats: &mut MethodStats) -> ReconstructionResult<()> {
        if self.model.children(parent).contains(&child) {
            return Ok(());
        }
        match self.model.add_child(parent, child) {
            Err(err @ ReconstructionError::SelfCycle { .. }) => {
                warn!("Skipping attachment: {}", err);
                stats.self_cycles_skipped += 1;
                Ok(())
            }
            other => other.map(|_| ()),
        }
    }

    fn merged_or_create(&mut self, key: MergeKey<S>, create: impl FnOnce(&mut Self) -> NodeId) -> NodeId {
        if let Some(&node) = self.merged.get(&key) {
            return node;
        }
        let node = create(self);
        self.merged.insert(key, node);
        node
    }

    fn create_widget(&mut self, id: i32, class_name: &str) -> NodeId {
        match self.config.kind_of(class_name) {
            Some(WidgetKind::Text) => self.model.create_text(id, class_name),
            Some(WidgetKind::Group) => self.model.create_group(id, class_name),
            Some(WidgetKind::View) | None => self.model.create_view(id, class_name),
        }
    }

    fn next_dynamic_id(&mut self) -> i32 {
        let id = self.next_dynamic_id;
        self.next_dynamic_id = self.next_dynamic_id.saturating_sub(1);
        id
    }

    fn tag(&mut self, node: NodeId, origin: &Origin) {
        self.tracker.tag_element(self.model.get(node).guid(), origin);
    }

    fn tag_tree(&mut self, node: NodeId, origin: &Origin) {
        let mut nodes = self.model.all_children_flatten(node);
        nodes.insert(node);
        for node in nodes {
            self.tag(node, origin);
        }
    }

    fn add_roots(&mut self, origin: &Origin, nodes: &[NodeId]) {
        if nodes.is_empty() {
            return;
        }
        self.roots
            .entry(origin.clone())
            .or_default()
            .extend(nodes.iter().copied());
    }

    /// Close the run and hand out the reconstruction
    pub fn finish(self) -> Reconstruction {
        let attached = self.model.attached_nodes();
        let by_guid: HashMap<Guid, NodeId> = self.model.nodes().map(|(node, e)| (e.guid(), node)).collect();

        let mut roots = self.roots;
        for origin in self.tracker.origins() {
            let parentless: Vec<NodeId> = self
                .tracker
                .elements_of(origin)
                .filter_map(|guid| by_guid.get(&guid).copied())
                .filter(|node| !attached.contains(node))
                .collect();
            if !parentless.is_empty() {
                roots.entry(origin.clone()).or_default().extend(parentless);
            }
        }

        info!(
            "Reconstructed {} elements, {} menus and {} dialogs; {} methods skipped",
            self.model.len(),
            self.menus.len(),
            self.dialogs.len(),
            self.skipped.len()
        );
        Reconstruction {
            model: self.model,
            origins: self.tracker,
            roots,
            menus: self.menus,
            dialogs: self.dialogs,
            skipped: self.skipped,
        }
    }
}

fn text_attr_name(setter: &str) -> String {
    let stripped = setter.strip_prefix("set").unwrap_or(setter);
    let stripped = stripped.strip_suffix("KeepState").unwrap_or(stripped);
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => setter.to_string(),
    }
}

/// Result of one assembly run. Read-only.
#[derive(Debug)]
pub struct Reconstruction {
    model: UiModel,
    origins: OriginTracker,
    roots: IndexMap<Origin, IndexSet<NodeId>>,
    menus: Vec<(Origin, Menu)>,
    dialogs: Vec<(Origin, Dialog)>,
    skipped: Vec<SkippedMethod>,
}

impl Reconstruction {
    pub fn model(&self) -> &UiModel {
        &self.model
    }

    pub fn origins(&self) -> &OriginTracker {
        &self.origins
    }

    pub fn roots(&self) -> &IndexMap<Origin, IndexSet<NodeId>> {
        &self.roots
    }

    /// Root widgets of a screen or fragment
    pub fn roots_of(&self, origin: &Origin) -> Vec<NodeId> {
        self.roots
            .get(origin)
            .map(|roots| roots.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every widget attributed to `origin`
    pub fn elements_of(&self, origin: &Origin) -> Vec<NodeId> {
        self.origins
            .elements_of(origin)
            .filter_map(|guid| self.model.find_by_guid(guid))
            .collect()
    }

    pub fn menus(&self) -> &[(Origin, Menu)] {
        &self.menus
    }

    pub fn menus_of<'a>(&'a self, origin: &'a Origin) -> impl Iterator<Item = &'a Menu> + 'a {
        self.menus.iter().filter(move |(o, _)| o == origin).map(|(_, menu)| menu)
    }

    pub fn dialogs(&self) -> &[(Origin, Dialog)] {
        &self.dialogs
    }

    pub fn dialogs_of<'a>(&'a self, origin: &'a Origin) -> impl Iterator<Item = &'a Dialog> + 'a {
        self.dialogs.iter().filter(move |(o, _)| o == origin).map(|(_, dialog)| dialog)
    }

    pub fn skipped(&self) -> &[SkippedMethod] {
        &self.skipped
    }
}
