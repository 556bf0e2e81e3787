#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of live orders per side when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// What a mutating call does when the incoming event violates one of the
/// book's preconditions (unknown or duplicate id, full side, over-fill,
/// zero quantity).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Return the error to the caller.
    Propagate,
    /// Log the error and panic. The feed is assumed to be validated
    /// upstream, so any violation is a bug.
    Halt,
    /// Log the error, drop the event and report success.
    DropAndLog,
}

impl Default for ViolationPolicy {
    fn default() -> Self {
        ViolationPolicy::Propagate
    }
}

/// Construction parameters of a [`Book`].
///
/// [`Book`]: struct.Book.html
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Maximum number of live orders on each side. Storage for this many
    /// orders is allocated up front and never grows.
    pub capacity: usize,
    /// How precondition violations are handled.
    pub on_violation: ViolationPolicy,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            on_violation: ViolationPolicy::default(),
        }
    }
}

impl BookConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_policy(mut self, policy: ViolationPolicy) -> Self {
        self.on_violation = policy;
        self
    }
}
