//! Message boxes

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::models::identity::{Guid, IdentityAllocator, UiElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonType {
    Positive,
    Negative,
    Neutral,
}

impl ButtonType {
    /// Button type set by a builder method such as `setPositiveButton`
    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "setPositiveButton" => Some(ButtonType::Positive),
            "setNegativeButton" => Some(ButtonType::Negative),
            "setNeutralButton" => Some(ButtonType::Neutral),
            _ => None,
        }
    }
}

/// Dialog button. Buttons have no caller-visible id and report `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogButton {
    guid: Guid,
    /// Candidate labels
    pub label: IndexSet<String>,
    pub button_type: ButtonType,
    pub listeners: IndexSet<String>,
}

impl DialogButton {
    pub fn new(
        allocator: &IdentityAllocator,
        label: IndexSet<String>,
        button_type: ButtonType,
        listeners: IndexSet<String>,
    ) -> Self {
        Self {
            guid: allocator.next_guid(),
            label,
            button_type,
            listeners,
        }
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn copy(&self, allocator: &IdentityAllocator) -> Self {
        Self {
            guid: allocator.next_guid(),
            ..self.clone()
        }
    }
}

impl UiElement for DialogButton {
    fn id(&self) -> i32 {
        0
    }

    fn guid(&self) -> Guid {
        self.guid
    }
}

/// Reconstructed message box.
///
/// Title, message and icon are candidate sets since several textually
/// distinct values may reach the same builder call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub title: IndexSet<String>,
    pub message: IndexSet<String>,
    pub icon: IndexSet<String>,
    pub buttons: Vec<DialogButton>,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons_of(&self, button_type: ButtonType) -> impl Iterator<Item = &DialogButton> {
        self.buttons.iter().filter(move |b| b.button_type == button_type)
    }
}
