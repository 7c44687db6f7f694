//! Assembler configuration

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::widgets;
use crate::errors::{ReconstructionError, ReconstructionResult};

static DEFAULT_CONFIG: Lazy<AssemblerConfig> = Lazy::new(AssemblerConfig::default);

/// How a widget class is materialised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    View,
    Group,
    Text,
}

/// Knobs of the tree assembler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// First id given to widgets created without a declared id. Later ones descend.
    pub dynamic_id_start: i32,
    /// Packages whose constructors create widgets
    pub view_class_prefixes: Vec<String>,
    /// Classes materialised as text widgets
    pub text_classes: Vec<String>,
    /// Classes materialised as containers
    pub group_classes: Vec<String>,
    /// Widgets whose attribute evidence is dropped
    pub ignored_classes: Vec<String>,
    /// Message-box builder classes
    pub dialog_builder_classes: Vec<String>,
    /// Record every call met in a method as an API use of its origin
    pub track_api_calls: bool,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            dynamic_id_start: -90000,
            view_class_prefixes: widgets::view_class_prefixes(),
            text_classes: widgets::text_classes(),
            group_classes: widgets::group_classes(),
            ignored_classes: widgets::ignored_classes(),
            dialog_builder_classes: widgets::dialog_builder_classes(),
            track_api_calls: true,
        }
    }
}

impl AssemblerConfig {
    /// Shared default configuration
    pub fn shared() -> &'static AssemblerConfig {
        &DEFAULT_CONFIG
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!("Loading assembler configuration from {}", path.display());
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ReconstructionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the assembler relies on
    pub fn validate(&self) -> ReconstructionResult<()> {
        if self.dynamic_id_start >= 0 {
            return Err(ReconstructionError::Config(format!(
                "dynamic_id_start must be negative, got {}",
                self.dynamic_id_start
            )));
        }
        Ok(())
    }

    /// Is `class_name` a widget class?
    pub fn is_view_class(&self, class_name: &str) -> bool {
        self.kind_of(class_name).is_some()
    }

    /// How `class_name` is materialised, `None` for non-widget classes
    pub fn kind_of(&self, class_name: &str) -> Option<WidgetKind> {
        if self.is_dialog_builder(class_name) {
            None
        } else if self.text_classes.iter().any(|c| c == class_name) {
            Some(WidgetKind::Text)
        } else if self.group_classes.iter().any(|c| c == class_name) {
            Some(WidgetKind::Group)
        } else if self.view_class_prefixes.iter().any(|p| class_name.starts_with(p.as_str())) {
            Some(WidgetKind::View)
        } else {
            None
        }
    }

    pub fn is_ignored(&self, class_name: &str) -> bool {
        self.ignored_classes.iter().any(|c| c == class_name)
    }

    pub fn is_dialog_builder(&self, class_name: &str) -> bool {
        self.dialog_builder_classes.iter().any(|c| c == class_name)
    }
}
