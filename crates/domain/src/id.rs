//! Tab identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of an open tab.
///
/// Ids are plain integers so they stay short enough to type at the console.
/// Id `1` belongs to the permanent first tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    /// The permanent first tab.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the tab that can never be closed.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        self.0 == Self::FIRST.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabId {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        s.trim()
            .parse::<u64>()
            .ok()
            .filter(|raw| *raw > 0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidIdentifier(s.to_string()))
    }
}

/// Hands out tab ids from a counter that only ever moves forward.
///
/// Closing a tab never returns its id to the pool, so two tabs can never
/// share an id within one store.
#[derive(Debug, Clone)]
pub struct TabIdAllocator {
    next: u64,
}

impl TabIdAllocator {
    /// Creates an allocator whose first id is [`TabId::FIRST`].
    #[must_use]
    pub const fn new() -> Self {
        Self { next: TabId::FIRST.0 }
    }

    /// Returns the next unused id.
    pub const fn allocate(&mut self) -> TabId {
        let id = TabId(self.next);
        self.next += 1;
        id
    }
}

impl Default for TabIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
