use crate::domain::ports::{EntityKind, IdGenerator};
use std::collections::HashMap;
use uuid::Uuid;

/// `van-1f0c…` style ids backed by random v4 UUIDs.
#[derive(Debug, Clone, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4().simple())
    }
}

/// Deterministic `van-001`, `van-002`, ... ids, one counter per kind.
///
/// Seeded ids of the same shape push the counter past them, so a store
/// seeded with `van-003` hands out `van-004` next.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    counters: HashMap<EntityKind, u64>,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> String {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        format!("{}-{:03}", kind.prefix(), counter)
    }

    fn observe(&mut self, kind: EntityKind, id: &str) {
        let Some(seen) = id
            .strip_prefix(kind.prefix())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|number| number.parse::<u64>().ok())
        else {
            return;
        };
        let counter = self.counters.entry(kind).or_insert(0);
        *counter = (*counter).max(seen);
    }
}
