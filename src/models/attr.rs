//! Widget attribute evidence

use serde::{Deserialize, Serialize};

/// Provenance marker for attributes discovered in code rather than markup
pub const DYNAMIC_VARIABLE: &str = "dynamic";

/// An attribute value together with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Attr {
    /// Attribute name (e.g., "text", "hint")
    pub name: String,
    /// Resolved value
    pub value: String,
    /// Resource or variable the value was read from
    pub variable: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            variable: variable.into(),
        }
    }

    /// Attribute set programmatically
    pub fn dynamic(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, DYNAMIC_VARIABLE)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}
