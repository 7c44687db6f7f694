//! Menus and their items

use serde::{Deserialize, Serialize};

use crate::constants::signatures::signatures;
use crate::models::attr::Attr;
use crate::models::identity::{Guid, IdentityAllocator, UiElement};

/// Where a menu is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MenuType {
    Options,
    Context,
    Popup,
    Panel,
    Other,
    #[default]
    Undefined,
}

impl MenuType {
    /// Type of a menu inflated inside the given callback
    pub fn from_callback(callback_subsignature: &str) -> Self {
        match callback_subsignature {
            signatures::ON_CREATE_OPTIONS_MENU => MenuType::Options,
            signatures::ON_CREATE_CONTEXT_MENU => MenuType::Context,
            signatures::ON_CREATE_PANEL_MENU => MenuType::Panel,
            _ => MenuType::Other,
        }
    }

    /// Callback receiving item selections for this menu type
    pub fn listener_subsignature(self) -> Option<&'static str> {
        match self {
            MenuType::Options | MenuType::Panel => Some(signatures::ON_OPTIONS_ITEM_SELECTED),
            MenuType::Context => Some(signatures::ON_CONTEXT_ITEM_SELECTED),
            MenuType::Popup | MenuType::Other | MenuType::Undefined => None,
        }
    }
}

/// One menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    id: i32,
    guid: Guid,
    pub title: Attr,
    pub group_id: i32,
    pub xml_callback: Option<String>,
    pub attributes: Vec<Attr>,
    pub listeners: Vec<String>,
}

impl MenuItem {
    pub fn new(
        allocator: &IdentityAllocator,
        id: i32,
        title: Attr,
        group_id: i32,
        xml_callback: Option<String>,
        attributes: Vec<Attr>,
    ) -> Self {
        Self {
            id,
            guid: allocator.next_guid(),
            title,
            group_id,
            xml_callback,
            attributes,
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    /// Copy with the same id and a fresh guid
    pub fn copy(&self, allocator: &IdentityAllocator) -> Self {
        self.copy_with_id(allocator, self.id)
    }

    pub fn copy_with_id(&self, allocator: &IdentityAllocator, new_id: i32) -> Self {
        Self {
            id: new_id,
            guid: allocator.next_guid(),
            ..self.clone()
        }
    }
}

impl UiElement for MenuItem {
    fn id(&self) -> i32 {
        self.id
    }

    fn guid(&self) -> Guid {
        self.guid
    }
}

/// Nested menu hanging off a root item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubMenu {
    pub root_item: MenuItem,
    pub items: Vec<MenuItem>,
}

impl SubMenu {
    pub fn new(root_item: MenuItem, items: Vec<MenuItem>) -> Self {
        Self { root_item, items }
    }

    pub fn copy(&self, allocator: &IdentityAllocator) -> Self {
        Self {
            root_item: self.root_item.copy(allocator),
            items: self.items.iter().map(|item| item.copy(allocator)).collect(),
        }
    }
}

/// A menu resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
    pub sub_menu: Option<SubMenu>,
    pub menu_type: MenuType,
    /// Method handling item selection
    pub listener: Option<String>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_sub_menu(mut self, sub_menu: SubMenu) -> Self {
        self.sub_menu = Some(sub_menu);
        self
    }

    /// Own items followed by the submenu's items
    pub fn all_items(&self) -> Vec<&MenuItem> {
        let nested = self.sub_menu.iter().flat_map(|sub| sub.items.iter());
        self.items.iter().chain(nested).collect()
    }

    /// Deep copy: own items and the submenu are copied with fresh guids.
    pub fn copy(&self, allocator: &IdentityAllocator) -> Self {
        Self {
            items: self.items.iter().map(|item| item.copy(allocator)).collect(),
            sub_menu: self.sub_menu.as_ref().map(|sub| sub.copy(allocator)),
            menu_type: self.menu_type,
            listener: self.listener.clone(),
        }
    }
}
