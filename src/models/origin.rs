//! Provenance tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Component a reconstructed fact belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Origin {
    /// A screen, with its display label when known
    Activity { value: String, label: String },
    Fragment { value: String },
}

impl Origin {
    pub fn activity(value: impl Into<String>, label: impl Into<String>) -> Self {
        Origin::Activity {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn fragment(value: impl Into<String>) -> Self {
        Origin::Fragment { value: value.into() }
    }

    /// Owning type
    pub fn value(&self) -> &str {
        match self {
            Origin::Activity { value, .. } | Origin::Fragment { value } => value.as_str(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Origin::Activity { label, .. } if !label.is_empty() => Some(label.as_str()),
            _ => None,
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Origin::Fragment { .. })
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Activity { value, label } if !label.is_empty() => write!(f, "{} ({})", value, label),
            Origin::Activity { value, .. } => write!(f, "{}", value),
            Origin::Fragment { value } => write!(f, "fragment {}", value),
        }
    }
}
