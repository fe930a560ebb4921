use serde::{Deserialize, Serialize};
use std::fmt;

/// The three collections the fleet store owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Van,
    Route,
    Booking,
}

impl EntityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Van => "van",
            EntityKind::Route => "route",
            EntityKind::Booking => "booking",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Source of fresh entity ids. The store treats the result as opaque and
/// only relies on it being unlikely to repeat; uniqueness within a
/// collection is still checked by the store itself.
pub trait IdGenerator: Send {
    fn next_id(&mut self, kind: EntityKind) -> String;

    /// Told about every id a store is seeded with, before any `next_id`.
    fn observe(&mut self, _kind: EntityKind, _id: &str) {}
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self, kind: EntityKind) -> String {
        (**self).next_id(kind)
    }

    fn observe(&mut self, kind: EntityKind, id: &str) {
        (**self).observe(kind, id)
    }
}
