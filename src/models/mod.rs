//! Data model of reconstructed user interfaces

pub mod identity;
pub mod attr;
pub mod element;
pub mod tree;
pub mod menu;
pub mod dialog;
pub mod origin;

pub use self::identity::{Guid, IdentityAllocator, UiElement};
pub use self::attr::Attr;
pub use self::element::{FragmentType, NodeId, ViewElement, ViewKind};
pub use self::tree::UiModel;
pub use self::menu::{Menu, MenuItem, MenuType, SubMenu};
pub use self::dialog::{ButtonType, Dialog, DialogButton};
pub use self::origin::Origin;
