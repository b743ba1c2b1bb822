//! Record identifier types.
//!
//! Two identity spaces that never intersect by construction: server-assigned
//! identifiers (non-negative serials or UUIDs) and client-minted placeholders
//! (strictly negative integers). A record carries a placeholder from the
//! moment it is created locally until the backing store confirms the write
//! and hands back a real identifier.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier for a record in a draft collection.
///
/// `Serial` and `Uuid` are server-assigned and only ever enter a collection
/// via ingestion of persisted records or a canonical sync response. `Draft`
/// identifiers are minted locally by [`DraftIdAllocator`] and are always
/// strictly negative, so the two spaces cannot collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordId {
    /// Server-assigned integer identifier (non-negative).
    Serial(u64),
    /// Server-assigned UUID identifier.
    Uuid(Uuid),
    /// Client-minted placeholder (strictly negative).
    Draft(i64),
}

impl RecordId {
    /// Returns true if this is a client-minted placeholder.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }

    /// Returns true if this identifier was assigned by the backing store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        !self.is_draft()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial(n) => write!(f, "{n}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Draft(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(if n < 0 {
                Self::Draft(n)
            } else {
                Self::Serial(n as u64)
            });
        }
        Uuid::parse_str(s)
            .map(Self::Uuid)
            .map_err(|_| crate::Error::InvalidId(s.to_string()))
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Serial(n)
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        if n < 0 {
            Self::Draft(n)
        } else {
            Self::Serial(n as u64)
        }
    }
}

impl From<Uuid> for RecordId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

// The wire format is a bare JSON number or string, matching what backing
// stores hand out: `7`, `-2`, `"0192e6a4-..."`. A tagged enum encoding would
// not round-trip against that.
impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Serial(n) => serializer.serialize_u64(*n),
            Self::Draft(n) => serializer.serialize_i64(*n),
            Self::Uuid(u) => serializer.collect_str(u),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or a UUID string")
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<RecordId, E> {
                Ok(RecordId::Serial(n))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<RecordId, E> {
                Ok(if n < 0 {
                    RecordId::Draft(n)
                } else {
                    RecordId::Serial(n as u64)
                })
            }

            // Map keys always arrive as strings, so string input must accept
            // the integer forms as well. Mirrors `FromStr`.
            fn visit_str<E: de::Error>(self, s: &str) -> Result<RecordId, E> {
                s.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Allocator for placeholder identifiers.
///
/// Each call to [`next`](Self::next) returns a value one less than the
/// previous, starting at `-1`. Identifiers are never reused for the lifetime
/// of the allocator, even across deletions. The counter serializes with the
/// draft snapshot so a rehydrated draft continues where it left off instead
/// of re-minting identifiers that may still be referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftIdAllocator {
    next: i64,
}

impl DraftIdAllocator {
    /// Creates an allocator seeded at the sentinel boundary.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: -1 }
    }

    /// Mints the next placeholder identifier. Infallible.
    pub fn next(&mut self) -> RecordId {
        let id = RecordId::Draft(self.next);
        self.next -= 1;
        id
    }

    /// Returns the value the next call to [`next`](Self::next) will mint.
    #[must_use]
    pub const fn peek(&self) -> i64 {
        self.next
    }
}

impl Default for DraftIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
