//! Value-resolution oracle interface

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A program value relative to an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueRef {
    /// The `n`-th argument of the call at the instruction
    Arg(usize),
    /// The base object of the call at the instruction
    Receiver,
    /// The value assigned by the instruction
    Result,
}

/// A statically derivable concrete value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConcreteValue {
    Int(i64),
    Str(String),
}

impl ConcreteValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConcreteValue::Int(value) => Some(*value),
            ConcreteValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConcreteValue::Str(value) => Some(value),
            ConcreteValue::Int(_) => None,
        }
    }
}

/// Answer of the oracle.
///
/// `Unknown` is a legitimate terminal answer meaning the evidence is
/// insufficient. It is never an error and is never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Known(IndexSet<ConcreteValue>),
    Unknown,
}

impl Resolution {
    pub fn known(values: impl IntoIterator<Item = ConcreteValue>) -> Self {
        Resolution::Known(values.into_iter().collect())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown)
    }

    /// All resolved values, none for `Unknown`
    pub fn values(&self) -> impl Iterator<Item = &ConcreteValue> {
        let set = match self {
            Resolution::Known(values) => Some(values),
            Resolution::Unknown => None,
        };
        set.into_iter().flatten()
    }

    /// Resolved integers, in resolution order
    pub fn ints(&self) -> Vec<i64> {
        self.values().filter_map(ConcreteValue::as_int).collect()
    }

    /// Resolved strings, in resolution order
    pub fn strings(&self) -> Vec<String> {
        self.values()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect()
    }
}

/// Deterministic value resolution for a fixed target.
pub trait ValueOracle<S> {
    fn resolve(&self, value: ValueRef, at: S) -> Resolution;
}

impl<S, O: ValueOracle<S> + ?Sized> ValueOracle<S> for &O {
    fn resolve(&self, value: ValueRef, at: S) -> Resolution {
        (**self).resolve(value, at)
    }
}
