//! Error handling for the UI model extractor.
//!
//! Every failure the core can raise is attributable to a single instruction
//! site or element. Callers catch errors at method granularity, log them and
//! carry on with the rest of the analysis run.

use thiserror::Error;
use std::fmt;

use crate::models::Guid;

/// Main error type for UI reconstruction.
#[derive(Error, Debug)]
pub enum ReconstructionError {
    /// A two-instruction idiom whose paired instruction does not have the
    /// required shape. Fatal for the method containing the site.
    #[error("Malformed idiom at {site} in {method}: {reason}")]
    MalformedIdiom {
        /// Offending instruction site
        site: String,
        /// Enclosing method
        method: String,
        /// What was expected
        reason: String,
    },

    /// An element was attached as its own child.
    #[error("Recursive child: element {guid} (id {id}) cannot be attached to itself")]
    SelfCycle {
        /// Identity of the rejected element
        guid: Guid,
        /// Caller-visible id of the rejected element
        id: i32,
    },

    /// A node handle that was not issued by the model it is used with.
    #[error("Unknown node {index}: the model holds {len} elements")]
    UnknownNode {
        /// Arena index of the handle
        index: usize,
        /// Number of elements in the model
        len: usize,
    },

    /// Invalid assembler configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from JSON (de)serialization.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for reconstruction operations.
///
/// Contract failures and configuration errors share this type; file access
/// at the configuration boundary uses `anyhow::Result` instead.
pub type ReconstructionResult<T> = Result<T, ReconstructionError>;

impl ReconstructionError {
    /// Build a malformed-idiom failure for a site.
    pub fn malformed<S: fmt::Debug>(site: S, method: &str, reason: impl Into<String>) -> Self {
        ReconstructionError::MalformedIdiom {
            site: format!("{:?}", site),
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// Is this a per-site contract failure (as opposed to an environment error)?
    pub fn is_contract_failure(&self) -> bool {
        matches!(
            self,
            ReconstructionError::MalformedIdiom { .. } | ReconstructionError::SelfCycle { .. }
        )
    }
}

/// Context information for errors.
///
/// Describes where a failure happened so that a skipped method can be
/// reported without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Component where the error occurred (e.g., "tree_assembler").
    pub component: String,

    /// Operation being performed when the error occurred (e.g., "assemble_method").
    pub operation: String,

    /// Method being analyzed, if applicable.
    pub method: Option<String>,

    /// Additional context details.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context for a component and operation.
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            method: None,
            details: None,
        }
    }

    /// Attach the method under analysis.
    pub fn in_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Attach free-form details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In {} while {}", self.component, self.operation)?;
        if let Some(method) = &self.method {
            write!(f, " for method {}", method)?;
        }
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}
