//! Element identity

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-unique identity of a reconstructed element.
///
/// Two elements are the same logical node only if they share a guid. The
/// caller-visible `id` of an element may collide and is never an equality key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(u64);

impl Guid {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonically increasing guid source for one analysis run.
///
/// Each target gets its own allocator; guids are never reused within it.
#[derive(Debug)]
pub struct IdentityAllocator {
    next: AtomicU64,
}

impl IdentityAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Hand out the next guid
    pub fn next_guid(&self) -> Guid {
        Guid(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of guids handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Common view of every reconstructed element
pub trait UiElement {
    /// Caller-visible id, `-1` when unassigned
    fn id(&self) -> i32;

    /// Process-unique identity
    fn guid(&self) -> Guid;

    /// Same logical node?
    fn is_same_node(&self, other: &dyn UiElement) -> bool {
        self.guid() == other.guid()
    }
}
